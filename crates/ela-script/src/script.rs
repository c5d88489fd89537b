//! ELA authorization script - the `code` half of a signature program.
//!
//! A standard program is `<0x21> <33-byte pubkey> OP_CHECKSIG`. A multisig
//! redeem script is `OP_M <0x21 pubkey>... OP_N OP_CHECKMULTISIG`. The
//! Script wraps the raw bytes and offers builders, classification, and
//! program hash derivation.

use std::fmt;

use ela_primitives::ec::PublicKey;
use ela_primitives::hash::hash160;

use crate::opcodes::*;
use crate::ScriptError;

/// Length of a program hash: one prefix byte plus a 20-byte Hash160.
pub const PROGRAM_HASH_LEN: usize = 21;

const COMPRESSED_PUBKEY_LEN: usize = 33;

/// An ELA script, represented as a byte vector newtype.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Script(Vec<u8>);

impl Script {
    pub fn new() -> Self {
        Script(Vec::new())
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        Ok(Script(hex::decode(hex_str)?))
    }

    /// Build the standard single-key program for a compressed public key.
    ///
    /// # Returns
    /// `<0x21> <pubkey> OP_CHECKSIG`, or an error if `pub_key` is not 33 bytes.
    pub fn standard(pub_key: &[u8]) -> Result<Self, ScriptError> {
        if pub_key.len() != COMPRESSED_PUBKEY_LEN {
            return Err(ScriptError::InvalidPublicKeyLength(pub_key.len()));
        }
        let mut bytes = Vec::with_capacity(COMPRESSED_PUBKEY_LEN + 2);
        bytes.push(OP_PUSH_PUBKEY);
        bytes.extend_from_slice(pub_key);
        bytes.push(OP_CHECKSIG);
        Ok(Script(bytes))
    }

    /// Build the standard program for a `PublicKey`.
    pub fn from_public_key(pub_key: &PublicKey) -> Self {
        let compressed = pub_key.to_compressed();
        let mut bytes = Vec::with_capacity(COMPRESSED_PUBKEY_LEN + 2);
        bytes.push(OP_PUSH_PUBKEY);
        bytes.extend_from_slice(&compressed);
        bytes.push(OP_CHECKSIG);
        Script(bytes)
    }

    /// Build an M-of-N multisig redeem script.
    ///
    /// Keys are embedded in the order given.
    ///
    /// # Arguments
    /// * `required` - Signatures needed (M).
    /// * `pub_keys` - Candidate signers (N of them, at most 16).
    pub fn multisig(required: usize, pub_keys: &[PublicKey]) -> Result<Self, ScriptError> {
        let compressed: Vec<[u8; COMPRESSED_PUBKEY_LEN]> =
            pub_keys.iter().map(PublicKey::to_compressed).collect();
        Self::multisig_from_keys(required, &compressed)
    }

    /// Build an M-of-N multisig redeem script from raw compressed keys.
    ///
    /// Curve-agnostic counterpart of `multisig`; each key must be 33 bytes.
    pub fn multisig_from_keys<K: AsRef<[u8]>>(
        required: usize,
        pub_keys: &[K],
    ) -> Result<Self, ScriptError> {
        let total = pub_keys.len();
        let (m_op, n_op) = match (small_int_op(required), small_int_op(total)) {
            (Some(m), Some(n)) if required <= total => (m, n),
            _ => return Err(ScriptError::InvalidThreshold { required, total }),
        };

        let mut bytes = Vec::with_capacity(3 + total * (COMPRESSED_PUBKEY_LEN + 1));
        bytes.push(m_op);
        for key in pub_keys {
            let key = key.as_ref();
            if key.len() != COMPRESSED_PUBKEY_LEN {
                return Err(ScriptError::InvalidPublicKeyLength(key.len()));
            }
            bytes.push(OP_PUSH_PUBKEY);
            bytes.extend_from_slice(key);
        }
        bytes.push(n_op);
        bytes.push(OP_CHECKMULTISIG);
        Ok(Script(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn to_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this is a standard single-key program.
    pub fn is_standard(&self) -> bool {
        let b = &self.0;
        b.len() == COMPRESSED_PUBKEY_LEN + 2
            && b[0] == OP_PUSH_PUBKEY
            && b[b.len() - 1] == OP_CHECKSIG
    }

    /// Whether the script carries the multisig marker as its last byte.
    ///
    /// This only inspects the marker; use `MultisigRedeemScript::parse` to
    /// validate the full structure.
    pub fn is_multisig(&self) -> bool {
        self.0.last() == Some(&OP_CHECKMULTISIG)
    }

    /// The public key embedded in a standard program.
    pub fn standard_public_key(&self) -> Option<&[u8]> {
        if self.is_standard() {
            Some(&self.0[1..=COMPRESSED_PUBKEY_LEN])
        } else {
            None
        }
    }

    /// Derive the 21-byte program hash: type prefix followed by Hash160.
    ///
    /// The prefix is chosen from the trailing opcode. Scripts with any other
    /// trailing byte use the standard prefix.
    pub fn program_hash(&self) -> [u8; PROGRAM_HASH_LEN] {
        let prefix = match self.0.last() {
            Some(&OP_CHECKMULTISIG) => PREFIX_MULTISIG,
            Some(&OP_CROSSCHAIN) => PREFIX_CROSSCHAIN,
            _ => PREFIX_STANDARD,
        };
        let mut out = [0u8; PROGRAM_HASH_LEN];
        out[0] = prefix;
        out[1..].copy_from_slice(&hash160(&self.0));
        out
    }
}

impl From<Vec<u8>> for Script {
    fn from(bytes: Vec<u8>) -> Self {
        Script(bytes)
    }
}

impl AsRef<[u8]> for Script {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl serde::Serialize for Script {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Script::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
