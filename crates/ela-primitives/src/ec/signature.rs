//! ECDSA signature over secp256k1.
//!
//! Signatures are carried on the ELA wire as the raw 64-byte `r || s`
//! concatenation (no DER). Signing is deterministic (RFC6979) and always
//! yields a low-S value.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa;

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// Length of a raw `r || s` signature.
pub const SIGNATURE_LEN: usize = 64;

/// An ECDSA signature with 32-byte big-endian R and S components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    r: [u8; 32],
    s: [u8; 32],
}

impl Signature {
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Signature { r, s }
    }

    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// Parse a raw 64-byte `r || s` signature.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(PrimitivesError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                SIGNATURE_LEN,
                bytes.len()
            )));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Ok(Signature { r, s })
    }

    /// The raw 64-byte `r || s` encoding.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        let mut out = [0u8; SIGNATURE_LEN];
        out[..32].copy_from_slice(&self.r);
        out[32..].copy_from_slice(&self.s);
        out
    }

    /// Sign a 32-byte digest.
    ///
    /// The digest is used as-is; callers hash the message themselves.
    pub fn sign(digest: &[u8], priv_key: &PrivateKey) -> Result<Self, PrimitivesError> {
        let sig: ecdsa::Signature = priv_key
            .signing_key()
            .sign_prehash(digest)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        let sig = sig.normalize_s().unwrap_or(sig);
        Self::from_bytes(&sig.to_bytes())
    }

    /// Verify against a 32-byte digest and public key.
    ///
    /// Any failure, including a malformed R or S, yields `false`.
    pub fn verify(&self, digest: &[u8], pub_key: &PublicKey) -> bool {
        let sig = match ecdsa::Signature::from_slice(&self.to_bytes()) {
            Ok(sig) => sig,
            Err(_) => return false,
        };
        pub_key
            .verifying_key()
            .verify_prehash(digest, &sig)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::sha256;

    fn test_key() -> PrivateKey {
        PrivateKey::from_hex("c7b8e3d5f0a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b")
            .unwrap()
    }

    #[test]
    fn test_sign_verify() {
        let key = test_key();
        let digest = sha256(b"unsigned payload");
        let sig = key.sign(&digest).unwrap();
        assert!(key.pub_key().verify(&digest, &sig));
    }

    #[test]
    fn test_sign_is_deterministic() {
        let key = test_key();
        let digest = sha256(b"payload");
        assert_eq!(key.sign(&digest).unwrap(), key.sign(&digest).unwrap());
    }

    #[test]
    fn test_wrong_digest_fails() {
        let key = test_key();
        let sig = key.sign(&sha256(b"a")).unwrap();
        assert!(!key.pub_key().verify(&sha256(b"b"), &sig));
    }

    #[test]
    fn test_wrong_key_fails() {
        let digest = sha256(b"a");
        let sig = test_key().sign(&digest).unwrap();
        let other = PrivateKey::from_hex(
            "0000000000000000000000000000000000000000000000000000000000000002",
        )
        .unwrap();
        assert!(!other.pub_key().verify(&digest, &sig));
    }

    #[test]
    fn test_bytes_roundtrip() {
        let sig = test_key().sign(&sha256(b"x")).unwrap();
        let bytes = sig.to_bytes();
        assert_eq!(Signature::from_bytes(&bytes).unwrap(), sig);
        assert!(Signature::from_bytes(&bytes[..63]).is_err());
    }

    #[test]
    fn test_zero_signature_does_not_verify() {
        let sig = Signature::new([0u8; 32], [0u8; 32]);
        assert!(!test_key().pub_key().verify(&sha256(b"x"), &sig));
    }
}
