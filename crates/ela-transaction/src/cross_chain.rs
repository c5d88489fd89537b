//! Cross-chain transfer entries.
//!
//! A `TransferCrossChainAsset` transaction pairs some of its outputs with a
//! destination address on a side chain and the amount to credit there.

use serde::{Deserialize, Serialize};

use ela_primitives::util::{ElaReader, ElaWriter, VarInt};

use crate::error::read_err;
use crate::TransactionError;

/// One cross-chain transfer.
///
/// `index` is the entry's position in the transaction and is not
/// serialized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrossChainAsset {
    pub index: u32,
    pub cross_chain_address: String,
    /// Index of the transaction output funding this transfer.
    pub output_index: u64,
    pub cross_chain_amount: i64,
}

/// Structured form of a cross-chain entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossChainAssetRecord {
    #[serde(rename = "CrossChainAddress")]
    pub cross_chain_address: String,
    #[serde(rename = "CrossChainAmount")]
    pub cross_chain_amount: i64,
    #[serde(rename = "OutputIndex", default, skip_serializing_if = "Option::is_none")]
    pub output_index: Option<u64>,
}

impl CrossChainAsset {
    pub fn new(index: u32, cross_chain_address: &str, output_index: u64, amount: i64) -> Self {
        CrossChainAsset {
            index,
            cross_chain_address: cross_chain_address.to_string(),
            output_index,
            cross_chain_amount: amount,
        }
    }

    pub fn write_to(&self, writer: &mut ElaWriter) {
        writer.write_var_string(&self.cross_chain_address);
        writer.write_varint(VarInt(self.output_index));
        writer.write_i64_le(self.cross_chain_amount);
    }

    pub fn read_from(reader: &mut ElaReader, index: u32) -> Result<Self, TransactionError> {
        let cross_chain_address = reader
            .read_var_string()
            .map_err(read_err("cross chain address"))?;
        let output_index = reader
            .read_varint()
            .map_err(read_err("cross chain output index"))?
            .value();
        let cross_chain_amount = reader
            .read_i64_le()
            .map_err(read_err("cross chain amount"))?;
        Ok(CrossChainAsset {
            index,
            cross_chain_address,
            output_index,
            cross_chain_amount,
        })
    }

    /// Build the entry at position `index`; a record without `OutputIndex`
    /// funds from the output at the same position.
    pub fn from_record(record: &CrossChainAssetRecord, index: u32) -> Self {
        CrossChainAsset {
            index,
            cross_chain_address: record.cross_chain_address.clone(),
            output_index: record.output_index.unwrap_or(index as u64),
            cross_chain_amount: record.cross_chain_amount,
        }
    }

    pub fn to_record(&self) -> CrossChainAssetRecord {
        CrossChainAssetRecord {
            cross_chain_address: self.cross_chain_address.clone(),
            cross_chain_amount: self.cross_chain_amount,
            output_index: Some(self.output_index),
        }
    }
}
