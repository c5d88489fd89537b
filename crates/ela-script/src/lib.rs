/// ELA SDK - Authorization scripts.
///
/// Provides the `Script` byte type, ELA opcode constants, builders for
/// standard (single key) and M-of-N multisig redeem scripts, a validating
/// redeem script parser, and program hash derivation.

pub mod script;
pub mod opcodes;
pub mod redeem;

mod error;
pub use error::ScriptError;
pub use script::Script;
pub use redeem::MultisigRedeemScript;
