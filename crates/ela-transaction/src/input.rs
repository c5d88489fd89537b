//! Transaction input referencing a previous output.
//!
//! Contains the referenced transaction ID, output index, and sequence
//! number. An input may also carry the raw private key that controls the
//! referenced output so the caller can find out which keys must sign; the
//! key is never serialized or exported.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use ela_primitives::chainhash::Hash;
use ela_primitives::util::{ElaReader, ElaWriter};

use crate::error::read_err;
use crate::TransactionError;

/// Default sequence number for new inputs.
pub const DEFAULT_SEQUENCE: u32 = 0xFFFF_FFFE;

/// A single input in an ELA transaction.
///
/// # Wire format
///
/// | Field                 | Size          |
/// |-----------------------|---------------|
/// | refer_tx_id           | 32 bytes      |
/// | refer_tx_output_index | 2 bytes (LE)  |
/// | sequence              | 4 bytes (LE)  |
#[derive(Clone, Debug)]
pub struct UtxoInput {
    /// ID of the transaction holding the spent output, internal byte order.
    pub refer_tx_id: Hash,

    /// Index of the spent output within that transaction.
    pub refer_tx_output_index: u16,

    pub sequence: u32,

    private_key: Option<Vec<u8>>,
}

/// Structured form of an input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    /// Referenced transaction ID in display (byte-reversed) hex.
    #[serde(rename = "TxID")]
    pub tx_id: String,
    #[serde(rename = "Index")]
    pub index: u16,
    #[serde(rename = "Sequence", default = "default_sequence")]
    pub sequence: u32,
}

fn default_sequence() -> u32 {
    DEFAULT_SEQUENCE
}

impl UtxoInput {
    pub fn new(refer_tx_id: Hash, refer_tx_output_index: u16) -> Self {
        UtxoInput {
            refer_tx_id,
            refer_tx_output_index,
            sequence: DEFAULT_SEQUENCE,
            private_key: None,
        }
    }

    /// Attach the raw private key that controls the referenced output.
    pub fn with_private_key(mut self, private_key: &[u8]) -> Self {
        self.set_private_key(Some(private_key));
        self
    }

    pub fn set_private_key(&mut self, private_key: Option<&[u8]>) {
        if let Some(old) = self.private_key.as_mut() {
            old.zeroize();
        }
        self.private_key = private_key.map(|k| k.to_vec());
    }

    pub fn private_key(&self) -> Option<&[u8]> {
        self.private_key.as_deref()
    }

    pub fn write_to(&self, writer: &mut ElaWriter) {
        writer.write_bytes(self.refer_tx_id.as_bytes());
        writer.write_u16_le(self.refer_tx_output_index);
        writer.write_u32_le(self.sequence);
    }

    pub fn read_from(reader: &mut ElaReader) -> Result<Self, TransactionError> {
        let tx_id: [u8; 32] = reader.read_array().map_err(read_err("refer tx id"))?;
        let refer_tx_output_index = reader
            .read_u16_le()
            .map_err(read_err("refer output index"))?;
        let sequence = reader.read_u32_le().map_err(read_err("sequence"))?;
        Ok(UtxoInput {
            refer_tx_id: Hash::new(tx_id),
            refer_tx_output_index,
            sequence,
            private_key: None,
        })
    }

    pub fn from_record(record: &InputRecord) -> Result<Self, TransactionError> {
        let refer_tx_id = Hash::from_hex(&record.tx_id)
            .map_err(|e| TransactionError::InvalidRecord(format!("input TxID: {}", e)))?;
        Ok(UtxoInput {
            refer_tx_id,
            refer_tx_output_index: record.index,
            sequence: record.sequence,
            private_key: None,
        })
    }

    pub fn to_record(&self) -> InputRecord {
        InputRecord {
            tx_id: self.refer_tx_id.to_string(),
            index: self.refer_tx_output_index,
            sequence: self.sequence,
        }
    }
}

impl PartialEq for UtxoInput {
    /// Inputs compare by their wire fields; an attached key is not identity.
    fn eq(&self, other: &Self) -> bool {
        self.refer_tx_id == other.refer_tx_id
            && self.refer_tx_output_index == other.refer_tx_output_index
            && self.sequence == other.sequence
    }
}

impl Eq for UtxoInput {}

impl Drop for UtxoInput {
    fn drop(&mut self) {
        if let Some(key) = self.private_key.as_mut() {
            key.zeroize();
        }
    }
}
