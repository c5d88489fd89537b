//! The cryptographic seam used by signing and verification.
//!
//! Transactions never touch curve arithmetic directly; they go through a
//! `CryptoProvider`. `P256Crypto` is the stock implementation: ECDSA over
//! NIST P-256, the curve ELA nodes verify with. `Secp256k1Crypto` signs
//! with the `ela-primitives` keys instead.

use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use p256::ecdsa::{Signature as P256Signature, SigningKey, VerifyingKey};

use ela_primitives::ec::{PrivateKey, PublicKey, Signature};
use ela_primitives::hash::{sha256, sha256d};
use ela_script::opcodes::OP_PUSH_SIGNATURE;

use crate::TransactionError;

/// Length of one signature block in a program parameter: a push byte
/// followed by the 64-byte `r || s` signature.
pub const SIGNATURE_BLOCK_LEN: usize = 65;

/// Key derivation, hashing, and ECDSA over fixed-size digests.
pub trait CryptoProvider {
    /// Derive the 33-byte compressed public key for a raw private key.
    fn derive_public_key(&self, private_key: &[u8]) -> Result<[u8; 33], TransactionError>;

    /// One round of the hash primitive. Used for the signing digest.
    fn hash_single(&self, data: &[u8]) -> [u8; 32];

    /// Two rounds of the hash primitive. Used for the content hash.
    fn hash_double(&self, data: &[u8]) -> [u8; 32];

    /// Sign `digest`, returning a 65-byte signature block.
    fn sign(&self, private_key: &[u8], digest: &[u8; 32])
        -> Result<[u8; SIGNATURE_BLOCK_LEN], TransactionError>;

    /// Check a signature block against a public key and digest.
    ///
    /// Malformed keys and signatures verify as `false`.
    fn verify(&self, public_key: &[u8], digest: &[u8; 32], signature: &[u8]) -> bool;
}

/// The 64-byte `r || s` body of a well-formed signature block.
fn block_body(signature: &[u8]) -> Option<&[u8]> {
    match signature {
        [OP_PUSH_SIGNATURE, rest @ ..] if rest.len() == SIGNATURE_BLOCK_LEN - 1 => Some(rest),
        _ => None,
    }
}

fn signature_block(raw: &[u8]) -> [u8; SIGNATURE_BLOCK_LEN] {
    let mut block = [0u8; SIGNATURE_BLOCK_LEN];
    block[0] = OP_PUSH_SIGNATURE;
    block[1..].copy_from_slice(raw);
    block
}

/// NIST P-256 (secp256r1) ECDSA with SHA-256.
#[derive(Clone, Copy, Debug, Default)]
pub struct P256Crypto;

impl P256Crypto {
    fn signing_key(private_key: &[u8]) -> Result<SigningKey, TransactionError> {
        if private_key.len() != 32 {
            return Err(TransactionError::SigningError(format!(
                "private key must be 32 bytes, got {}",
                private_key.len()
            )));
        }
        SigningKey::from_slice(private_key)
            .map_err(|e| TransactionError::SigningError(e.to_string()))
    }
}

impl CryptoProvider for P256Crypto {
    fn derive_public_key(&self, private_key: &[u8]) -> Result<[u8; 33], TransactionError> {
        let key = Self::signing_key(private_key)?;
        let point = key.verifying_key().to_encoded_point(true);
        point.as_bytes().try_into().map_err(|_| {
            TransactionError::SigningError("unexpected compressed point length".into())
        })
    }

    fn hash_single(&self, data: &[u8]) -> [u8; 32] {
        sha256(data)
    }

    fn hash_double(&self, data: &[u8]) -> [u8; 32] {
        sha256d(data)
    }

    fn sign(
        &self,
        private_key: &[u8],
        digest: &[u8; 32],
    ) -> Result<[u8; SIGNATURE_BLOCK_LEN], TransactionError> {
        let key = Self::signing_key(private_key)?;
        let sig: P256Signature = key
            .sign_prehash(digest)
            .map_err(|e| TransactionError::SigningError(e.to_string()))?;
        Ok(signature_block(&sig.to_bytes()))
    }

    fn verify(&self, public_key: &[u8], digest: &[u8; 32], signature: &[u8]) -> bool {
        let Some(raw) = block_body(signature) else {
            return false;
        };
        let (Ok(key), Ok(sig)) = (
            VerifyingKey::from_sec1_bytes(public_key),
            P256Signature::from_slice(raw),
        ) else {
            return false;
        };
        key.verify_prehash(digest, &sig).is_ok()
    }
}

/// secp256k1 ECDSA with SHA-256.
#[derive(Clone, Copy, Debug, Default)]
pub struct Secp256k1Crypto;

impl CryptoProvider for Secp256k1Crypto {
    fn derive_public_key(&self, private_key: &[u8]) -> Result<[u8; 33], TransactionError> {
        let key = PrivateKey::from_bytes(private_key)
            .map_err(|e| TransactionError::SigningError(e.to_string()))?;
        Ok(key.pub_key().to_compressed())
    }

    fn hash_single(&self, data: &[u8]) -> [u8; 32] {
        sha256(data)
    }

    fn hash_double(&self, data: &[u8]) -> [u8; 32] {
        sha256d(data)
    }

    fn sign(
        &self,
        private_key: &[u8],
        digest: &[u8; 32],
    ) -> Result<[u8; SIGNATURE_BLOCK_LEN], TransactionError> {
        let key = PrivateKey::from_bytes(private_key)
            .map_err(|e| TransactionError::SigningError(e.to_string()))?;
        let sig = key
            .sign(digest)
            .map_err(|e| TransactionError::SigningError(e.to_string()))?;
        Ok(signature_block(&sig.to_bytes()))
    }

    fn verify(&self, public_key: &[u8], digest: &[u8; 32], signature: &[u8]) -> bool {
        let Some(raw) = block_body(signature) else {
            return false;
        };
        let (Ok(key), Ok(sig)) = (PublicKey::from_bytes(public_key), Signature::from_bytes(raw))
        else {
            return false;
        };
        key.verify(digest, &sig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 32] = [
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 1,
    ];

    #[test]
    fn test_p256_derive_public_key() {
        // Private key 1 yields the P-256 generator.
        let pk = P256Crypto.derive_public_key(&KEY).unwrap();
        assert_eq!(
            hex::encode(pk),
            "036b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"
        );
        assert!(P256Crypto.derive_public_key(&[0u8; 32]).is_err());
        assert!(P256Crypto.derive_public_key(&[1u8; 5]).is_err());
        assert!(P256Crypto.derive_public_key(&[0xffu8; 32]).is_err());
    }

    #[test]
    fn test_p256_sign_block_shape_and_verify() {
        let crypto = P256Crypto;
        let digest = crypto.hash_single(b"payload");
        let block = crypto.sign(&KEY, &digest).unwrap();
        assert_eq!(block[0], 0x40);

        let pk = crypto.derive_public_key(&KEY).unwrap();
        assert!(crypto.verify(&pk, &digest, &block));
        assert!(!crypto.verify(&pk, &crypto.hash_single(b"other"), &block));
        assert!(!crypto.verify(&pk, &digest, &block[1..]));
        assert!(!crypto.verify(&[0x02; 33], &digest, &block));
    }

    #[test]
    fn test_curves_do_not_cross_verify() {
        let digest = sha256(b"payload");
        let p256_pk = P256Crypto.derive_public_key(&KEY).unwrap();
        let k256_pk = Secp256k1Crypto.derive_public_key(&KEY).unwrap();
        assert_ne!(p256_pk, k256_pk);

        let p256_block = P256Crypto.sign(&KEY, &digest).unwrap();
        let k256_block = Secp256k1Crypto.sign(&KEY, &digest).unwrap();
        assert!(!P256Crypto.verify(&p256_pk, &digest, &k256_block));
        assert!(!Secp256k1Crypto.verify(&k256_pk, &digest, &p256_block));
    }

    #[test]
    fn test_secp256k1_derive_public_key() {
        let pk = Secp256k1Crypto.derive_public_key(&KEY).unwrap();
        assert_eq!(
            hex::encode(pk),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        assert!(Secp256k1Crypto.derive_public_key(&[0u8; 32]).is_err());
        assert!(Secp256k1Crypto.derive_public_key(&[1u8; 5]).is_err());
    }

    #[test]
    fn test_secp256k1_sign_and_verify() {
        let crypto = Secp256k1Crypto;
        let digest = crypto.hash_single(b"payload");
        let block = crypto.sign(&KEY, &digest).unwrap();
        assert_eq!(block[0], 0x40);
        let pk = crypto.derive_public_key(&KEY).unwrap();
        assert!(crypto.verify(&pk, &digest, &block));
        assert!(!crypto.verify(&pk, &digest, &block[1..]));
    }

    #[test]
    fn test_hash_rounds() {
        let crypto = P256Crypto;
        assert_eq!(crypto.hash_double(b"abc"), sha256(&sha256(b"abc")));
        assert_ne!(crypto.hash_single(b"abc"), crypto.hash_double(b"abc"));
    }
}
