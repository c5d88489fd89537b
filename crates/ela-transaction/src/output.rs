//! Transaction output paying an asset amount to a program hash.
//!
//! The wire layout depends on the enclosing transaction's version: from
//! version 9 onward each output also carries a type byte and a payload.

use serde::{Deserialize, Serialize};

use ela_primitives::chainhash::Hash;
use ela_primitives::util::{ElaReader, ElaWriter};
use ela_script::script::PROGRAM_HASH_LEN;

use crate::error::read_err;
use crate::transaction::TX_VERSION_09;
use crate::TransactionError;

/// The ELA asset id, internal byte order.
///
/// Displays as `a3d0eaa466df74983b5d7c543de6904f4c9418ead5ffd6d25814234a96db37b0`.
pub const ELA_ASSET_ID: Hash = Hash::new([
    0xb0, 0x37, 0xdb, 0x96, 0x4a, 0x23, 0x14, 0x58, 0xd2, 0xd6, 0xff, 0xd5, 0xea, 0x18, 0x94,
    0x4c, 0x4f, 0x90, 0xe6, 0x3d, 0x54, 0x7c, 0x5d, 0x3b, 0x98, 0x74, 0xdf, 0x66, 0xa4, 0xea,
    0xd0, 0xa3,
]);

/// A single output in an ELA transaction.
///
/// # Wire format
///
/// | Field        | Size                         |
/// |--------------|------------------------------|
/// | asset_id     | 32 bytes                     |
/// | amount       | 8 bytes (LE, signed)         |
/// | output_lock  | 4 bytes (LE)                 |
/// | program_hash | 21 bytes                     |
/// | output_type  | 1 byte, tx version >= 9 only |
/// | payload      | VarBytes, tx version >= 9 only |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxOutput {
    pub asset_id: Hash,

    /// Amount in sela (1 ELA = 100_000_000 sela).
    pub amount: i64,

    /// Block height before which the output cannot be spent.
    pub output_lock: u32,

    pub program_hash: [u8; PROGRAM_HASH_LEN],

    /// Schema version the output was described with; 9 selects the
    /// extended layout for the whole transaction on import.
    pub version: u8,

    pub output_type: u8,
    pub payload: Vec<u8>,
}

/// Structured form of an output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Asset id in display hex; the import policy's asset id when absent.
    #[serde(rename = "AssetID", default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    #[serde(rename = "Amount")]
    pub amount: i64,
    #[serde(rename = "OutputLock", default)]
    pub output_lock: u32,
    /// 21-byte program hash in hex.
    #[serde(rename = "ProgramHash")]
    pub program_hash: String,
    #[serde(rename = "Version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u8>,
    #[serde(rename = "OutputType", default, skip_serializing_if = "Option::is_none")]
    pub output_type: Option<u8>,
    #[serde(rename = "Payload", default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl TxOutput {
    /// Create an ELA output paying `amount` to `program_hash`.
    pub fn new(amount: i64, program_hash: [u8; PROGRAM_HASH_LEN]) -> Self {
        TxOutput {
            asset_id: ELA_ASSET_ID,
            amount,
            output_lock: 0,
            program_hash,
            version: 0,
            output_type: 0,
            payload: Vec::new(),
        }
    }

    /// Serialize this output for a transaction of version `tx_version`.
    pub fn write_to(&self, writer: &mut ElaWriter, tx_version: u8) {
        writer.write_bytes(self.asset_id.as_bytes());
        writer.write_i64_le(self.amount);
        writer.write_u32_le(self.output_lock);
        writer.write_bytes(&self.program_hash);
        if tx_version >= TX_VERSION_09 {
            writer.write_u8(self.output_type);
            writer.write_var_bytes(&self.payload);
        }
    }

    /// Deserialize an output written for a transaction of version `tx_version`.
    pub fn read_from(reader: &mut ElaReader, tx_version: u8) -> Result<Self, TransactionError> {
        let asset_id: [u8; 32] = reader.read_array().map_err(read_err("asset id"))?;
        let amount = reader.read_i64_le().map_err(read_err("amount"))?;
        let output_lock = reader.read_u32_le().map_err(read_err("output lock"))?;
        let program_hash = reader.read_array().map_err(read_err("program hash"))?;

        let mut output = TxOutput {
            asset_id: Hash::new(asset_id),
            amount,
            output_lock,
            program_hash,
            version: 0,
            output_type: 0,
            payload: Vec::new(),
        };
        if tx_version >= TX_VERSION_09 {
            output.version = tx_version;
            output.output_type = reader.read_u8().map_err(read_err("output type"))?;
            output.payload = reader
                .read_var_bytes()
                .map_err(read_err("output payload"))?
                .to_vec();
        }
        Ok(output)
    }

    /// Build an output from its record, filling a missing asset id with
    /// `default_asset_id`.
    pub fn from_record(
        record: &OutputRecord,
        default_asset_id: &Hash,
    ) -> Result<Self, TransactionError> {
        let asset_id = match &record.asset_id {
            Some(hex_str) => Hash::from_hex(hex_str)
                .map_err(|e| TransactionError::InvalidRecord(format!("output AssetID: {}", e)))?,
            None => *default_asset_id,
        };

        let hash_bytes = hex::decode(&record.program_hash).map_err(|e| {
            TransactionError::InvalidRecord(format!("output ProgramHash: {}", e))
        })?;
        let program_hash: [u8; PROGRAM_HASH_LEN] =
            hash_bytes.as_slice().try_into().map_err(|_| {
                TransactionError::InvalidRecord(format!(
                    "output ProgramHash must be {} bytes, got {}",
                    PROGRAM_HASH_LEN,
                    hash_bytes.len()
                ))
            })?;

        let payload = match &record.payload {
            Some(hex_str) => hex::decode(hex_str).map_err(|e| {
                TransactionError::InvalidRecord(format!("output Payload: {}", e))
            })?,
            None => Vec::new(),
        };

        Ok(TxOutput {
            asset_id,
            amount: record.amount,
            output_lock: record.output_lock,
            program_hash,
            version: record.version.unwrap_or(0),
            output_type: record.output_type.unwrap_or(0),
            payload,
        })
    }

    /// Describe this output as it appears in a transaction of version
    /// `tx_version`.
    ///
    /// `Version`, `OutputType` and `Payload` are present exactly when the
    /// wire form carries the extended layout, so importing the record
    /// restores the transaction version along with the output.
    pub fn to_record(&self, tx_version: u8) -> OutputRecord {
        let extended = tx_version >= TX_VERSION_09;
        OutputRecord {
            asset_id: Some(self.asset_id.to_string()),
            amount: self.amount,
            output_lock: self.output_lock,
            program_hash: hex::encode(self.program_hash),
            version: extended.then_some(tx_version),
            output_type: extended.then_some(self.output_type),
            payload: extended.then(|| hex::encode(&self.payload)),
        }
    }
}
