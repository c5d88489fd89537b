/// ELA SDK - Transaction encoding, hashing, and signing.
///
/// Provides the Transaction aggregate with its attributes, inputs, outputs,
/// cross-chain entries and signature programs; canonical unsigned-payload
/// and full binary serialization; content hashing; single and multisig
/// signing through a pluggable crypto provider; multisig signer recovery;
/// and structured-record (JSON) import and export.

pub mod transaction;
pub mod attribute;
pub mod input;
pub mod output;
pub mod cross_chain;
pub mod program;
pub mod crypto;
pub mod record;

mod error;
pub use error::TransactionError;
pub use transaction::{Transaction, TransactionType, TX_VERSION_09};
pub use attribute::{Attribute, AttributeUsage};
pub use input::UtxoInput;
pub use output::{TxOutput, ELA_ASSET_ID};
pub use cross_chain::CrossChainAsset;
pub use program::Program;
pub use crypto::{CryptoProvider, P256Crypto, Secp256k1Crypto, SIGNATURE_BLOCK_LEN};
pub use record::{ImportPolicy, TransactionRecord};
