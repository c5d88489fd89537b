//! Multisig redeem script parsing.
//!
//! Layout: `OP_M [len pubkey]... OP_N OP_CHECKMULTISIG`. The parser walks
//! the entries between the header byte and the count byte, each a one-byte
//! length followed by that many key bytes, and rejects any script whose
//! entries do not tile that region exactly.

use crate::opcodes::{small_int_value, OP_CHECKMULTISIG};
use crate::ScriptError;

/// A decoded M-of-N redeem script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultisigRedeemScript {
    /// Signatures required (M).
    pub required: usize,
    /// Embedded public keys in script order.
    pub public_keys: Vec<Vec<u8>>,
}

impl MultisigRedeemScript {
    /// Parse and validate a redeem script.
    ///
    /// # Returns
    /// `Err(NotMultisig)` when the last byte is not `OP_CHECKMULTISIG`;
    /// `Err(MalformedRedeemScript)` when the header, count, or key entries
    /// do not line up; otherwise the decoded script.
    pub fn parse(code: &[u8]) -> Result<Self, ScriptError> {
        if code.last() != Some(&OP_CHECKMULTISIG) {
            return Err(ScriptError::NotMultisig);
        }
        if code.len() < 3 {
            return Err(malformed(format!("{} bytes is too short", code.len())));
        }

        let keys_end = code.len() - 2;
        let required = small_int_value(code[0])
            .ok_or_else(|| malformed(format!("bad threshold opcode {:#04x}", code[0])))?;
        let total = small_int_value(code[keys_end])
            .ok_or_else(|| malformed(format!("bad key count opcode {:#04x}", code[keys_end])))?;

        let mut public_keys = Vec::with_capacity(total);
        let mut i = 1;
        while i < keys_end {
            let size = code[i] as usize;
            if size == 0 {
                return Err(malformed(format!("empty key entry at offset {}", i)));
            }
            let end = i + 1 + size;
            if end > keys_end {
                return Err(malformed(format!(
                    "key entry at offset {} overruns the key region ({} > {})",
                    i, end, keys_end
                )));
            }
            public_keys.push(code[i + 1..end].to_vec());
            i = end;
        }

        if public_keys.len() != total {
            return Err(malformed(format!(
                "declares {} keys but embeds {}",
                total,
                public_keys.len()
            )));
        }
        if required > total {
            return Err(ScriptError::InvalidThreshold { required, total });
        }

        Ok(MultisigRedeemScript { required, public_keys })
    }

    /// Number of embedded keys (N).
    pub fn total(&self) -> usize {
        self.public_keys.len()
    }

    /// Embedded keys as lowercase hex, in script order.
    pub fn public_keys_hex(&self) -> Vec<String> {
        self.public_keys.iter().map(hex::encode).collect()
    }
}

fn malformed(msg: String) -> ScriptError {
    ScriptError::MalformedRedeemScript(msg)
}
