//! 256-bit hash type for transaction and asset identification.
//!
//! A `Hash` stores its bytes in internal (wire) order and displays them
//! byte-reversed, which is how transaction ids and asset ids appear in
//! records and explorers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::hash::{sha256, sha256d};
use crate::PrimitivesError;

/// Size of a Hash in bytes.
pub const HASH_SIZE: usize = 32;

/// A 32-byte hash used for transaction ids and asset ids.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    /// Create a Hash from bytes in internal order.
    pub const fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }

    /// Create a Hash from a slice of exactly 32 bytes in internal order.
    ///
    /// # Returns
    /// `Ok(Hash)`, or `InvalidHash` if the slice has the wrong length.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let arr: [u8; HASH_SIZE] = bytes.try_into().map_err(|_| {
            PrimitivesError::InvalidHash(format!(
                "invalid hash length of {}, want {}",
                bytes.len(),
                HASH_SIZE
            ))
        })?;
        Ok(Hash(arr))
    }

    /// Parse a 64-character display (byte-reversed) hex string.
    ///
    /// # Returns
    /// `Ok(Hash)` in internal byte order, or an error if the string is not
    /// valid hex of exactly 32 bytes.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let mut decoded = hex::decode(hex_str)?;
        decoded.reverse();
        Self::from_bytes(&decoded)
    }

    /// Borrow the bytes in internal order.
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Whether every byte is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Display as byte-reversed hex.
impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        f.write_str(&hex::encode(reversed))
    }
}

impl FromStr for Hash {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash::from_hex(s)
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// SHA-256 of `data` as a Hash.
pub fn hash_h(data: &[u8]) -> Hash {
    Hash(sha256(data))
}

/// Double SHA-256 of `data` as a Hash.
pub fn double_hash_h(data: &[u8]) -> Hash {
    Hash(sha256d(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ELA_ASSET_ID: &str = "a3d0eaa466df74983b5d7c543de6904f4c9418ead5ffd6d25814234a96db37b0";

    #[test]
    fn test_hex_is_byte_reversed() {
        let hash = Hash::from_hex(ELA_ASSET_ID).unwrap();
        assert_eq!(hash.as_bytes()[0], 0xb0);
        assert_eq!(hash.as_bytes()[31], 0xa3);
        assert_eq!(hash.to_string(), ELA_ASSET_ID);
    }

    #[test]
    fn test_from_hex_rejects_wrong_length() {
        assert!(Hash::from_hex("abcd").is_err());
        assert!(Hash::from_hex("").is_err());
        assert!(Hash::from_hex("zz").is_err());
    }

    #[test]
    fn test_from_bytes() {
        let hash = Hash::from_bytes(&[7u8; 32]).unwrap();
        assert_eq!(hash, Hash::new([7u8; 32]));
        assert!(Hash::from_bytes(&[7u8; 31]).is_err());
    }

    #[test]
    fn test_is_zero() {
        assert!(Hash::default().is_zero());
        assert!(!Hash::new([1u8; 32]).is_zero());
    }

    #[test]
    fn test_double_hash_h() {
        assert_eq!(
            hex::encode(double_hash_h(b"").as_bytes()),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
        assert_eq!(hash_h(b"").as_bytes(), &sha256(b""));
    }

    #[test]
    fn test_serde_roundtrip() {
        let hash = Hash::from_hex(ELA_ASSET_ID).unwrap();
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", ELA_ASSET_ID));
        let back: Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }
}
