#![deny(missing_docs)]

//! ELA Blockchain SDK - Complete SDK.
//!
//! Re-exports all ELA SDK components for convenient single-crate usage.
//!
//! ```
//! use ela_sdk::transaction::{Attribute, P256Crypto, Transaction, TxOutput};
//!
//! let key = [1u8; 32];
//! let crypto = P256Crypto;
//!
//! let mut tx = Transaction::new();
//! tx.attributes.push(Attribute::memo("hello"));
//! tx.outputs.push(TxOutput::new(100_000_000, [0x21; 21]));
//! tx.sign(&crypto, &key).unwrap();
//!
//! assert!(tx.verify_program(&crypto, 0));
//! assert!(tx.programs[0].code.is_standard());
//! ```

/// Hashes, keys, signatures, and the binary reader/writer.
pub use ela_primitives as primitives;
/// Authorization scripts and redeem script parsing.
pub use ela_script as script;
/// Transactions, signing, and record import/export.
pub use ela_transaction as transaction;
