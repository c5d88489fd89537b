/// ELA SDK - Cryptographic primitives, hashing, and binary encoding.
///
/// This crate provides the foundational building blocks for the ELA SDK:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
/// - A 32-byte hash type for transaction and asset identifiers
/// - secp256k1 private keys, public keys, and ECDSA signatures
/// - Variable-length integer encoding with a binary reader and writer

pub mod hash;
pub mod chainhash;
pub mod util;
pub mod ec;

mod error;
pub use error::PrimitivesError;
