//! Hash function primitives for the ELA SDK.
//!
//! The ELA wire protocol uses single SHA-256 for signing digests, double
//! SHA-256 for transaction identifiers, and RIPEMD-160 over SHA-256 for
//! program hashes.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Length in bytes of a SHA-256 digest.
pub const SHA256_LEN: usize = 32;

/// Length in bytes of a RIPEMD-160 digest.
pub const RIPEMD160_LEN: usize = 20;

/// Compute the SHA-256 digest of `data`.
pub fn sha256(data: &[u8]) -> [u8; SHA256_LEN] {
    Sha256::digest(data).into()
}

/// Compute SHA-256(SHA-256(data)).
///
/// This is the content hash of an unsigned transaction payload.
pub fn sha256d(data: &[u8]) -> [u8; SHA256_LEN] {
    sha256(&sha256(data))
}

/// Compute the RIPEMD-160 digest of `data`.
pub fn ripemd160(data: &[u8]) -> [u8; RIPEMD160_LEN] {
    Ripemd160::digest(data).into()
}

/// Compute RIPEMD-160(SHA-256(data)).
///
/// Used to derive program hashes from authorization scripts.
pub fn hash160(data: &[u8]) -> [u8; RIPEMD160_LEN] {
    ripemd160(&sha256(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_DATA: &[u8] = b"this is the data I want to hash";

    #[test]
    fn test_sha256_empty() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_string() {
        assert_eq!(
            hex::encode(sha256(TEST_DATA)),
            "f88eec7ecabf88f9a64c4100cac1e0c0c4581100492137d1b656ea626cad63e3"
        );
    }

    #[test]
    fn test_sha256d_empty() {
        assert_eq!(
            hex::encode(sha256d(b"")),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }

    #[test]
    fn test_sha256d_is_sha256_twice() {
        assert_eq!(sha256d(TEST_DATA), sha256(&sha256(TEST_DATA)));
        assert_ne!(sha256d(TEST_DATA), sha256(TEST_DATA));
    }

    #[test]
    fn test_ripemd160_empty() {
        assert_eq!(
            hex::encode(ripemd160(b"")),
            "9c1185a5c5e9fc54612808977ee8f548b2258d31"
        );
    }

    #[test]
    fn test_hash160() {
        assert_eq!(
            hex::encode(hash160(b"")),
            "b472a266d0bd89c13706a4132ccfb16f7c3b9fcb"
        );
        assert_eq!(
            hex::encode(hash160(TEST_DATA)),
            "e7fb13ef86fef4203f042fbfc2703fa628301e90"
        );
    }
}
