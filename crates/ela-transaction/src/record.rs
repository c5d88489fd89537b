//! Structured-record import and export.
//!
//! Wallet front ends describe transactions as JSON objects (`UTXOInputs`,
//! `Outputs`, optional `Attributes`, `Programs`, `CrossChainAsset`, plus
//! the `Memo` / `Postmark` shorthands). `TransactionRecord` is that object;
//! `ImportPolicy` controls the defaults applied while turning it into a
//! `Transaction`.
//!
//! When a record has no `Attributes`, import synthesizes them:
//!
//! | Record                          | Attributes                              |
//! |---------------------------------|-----------------------------------------|
//! | `Attributes` present            | used as-is                              |
//! | `Memo` non-empty                | one `Memo` attribute                    |
//! | `Memo` empty or missing         | one `Nonce` attribute with empty data   |
//! | `Postmark` present (additional) | `Description` `{"Postmark":<json>}`     |

use serde::{Deserialize, Serialize};

use ela_primitives::chainhash::Hash;

use crate::attribute::{Attribute, AttributeRecord, AttributeUsage};
use crate::cross_chain::{CrossChainAsset, CrossChainAssetRecord};
use crate::input::{InputRecord, UtxoInput};
use crate::output::{OutputRecord, TxOutput, ELA_ASSET_ID};
use crate::program::{Program, ProgramRecord};
use crate::transaction::{Transaction, TransactionType, TX_VERSION_09};
use crate::TransactionError;

/// Defaults applied by `Transaction::from_record`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportPolicy {
    /// Asset id for outputs whose record omits `AssetID`.
    pub default_asset_id: Hash,
    /// Synthesize attributes from `Memo` / `Postmark` when `Attributes` is
    /// absent. When false such a record imports with no attributes.
    pub synthesize_attributes: bool,
}

impl Default for ImportPolicy {
    fn default() -> Self {
        ImportPolicy {
            default_asset_id: ELA_ASSET_ID,
            synthesize_attributes: true,
        }
    }
}

/// The structured form of a transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "UTXOInputs")]
    pub utxo_inputs: Vec<InputRecord>,

    #[serde(rename = "Outputs")]
    pub outputs: Vec<OutputRecord>,

    #[serde(rename = "Attributes", default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<AttributeRecord>>,

    #[serde(rename = "Programs", default, skip_serializing_if = "Option::is_none")]
    pub programs: Option<Vec<ProgramRecord>>,

    #[serde(rename = "CrossChainAsset", default, skip_serializing_if = "Option::is_none")]
    pub cross_chain_asset: Option<Vec<CrossChainAssetRecord>>,

    /// Import-only shorthand for a memo attribute.
    #[serde(rename = "Memo", default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,

    /// Import-only shorthand for a postmark description attribute.
    #[serde(rename = "Postmark", default, skip_serializing_if = "Option::is_none")]
    pub postmark: Option<serde_json::Value>,
}

impl Transaction {
    /// Build a transaction from its structured record.
    ///
    /// # Arguments
    /// * `record` - The parsed record.
    /// * `policy` - Defaults for omitted fields.
    ///
    /// # Returns
    /// The transaction, or `InvalidRecord` when a field cannot be decoded.
    pub fn from_record(
        record: &TransactionRecord,
        policy: &ImportPolicy,
    ) -> Result<Self, TransactionError> {
        let mut tx = Transaction::new();

        tx.inputs = record
            .utxo_inputs
            .iter()
            .map(UtxoInput::from_record)
            .collect::<Result<_, _>>()?;

        tx.outputs = record
            .outputs
            .iter()
            .map(|o| TxOutput::from_record(o, &policy.default_asset_id))
            .collect::<Result<_, _>>()?;

        if let Some(version) = tx
            .outputs
            .iter()
            .map(|o| o.version)
            .filter(|v| *v >= TX_VERSION_09)
            .max()
        {
            tx.version = version;
        }

        if let Some(programs) = &record.programs {
            tx.programs = programs
                .iter()
                .map(Program::from_record)
                .collect::<Result<_, _>>()?;
        }

        tx.attributes = match &record.attributes {
            Some(attributes) => attributes
                .iter()
                .map(Attribute::from_record)
                .collect::<Result<_, _>>()?,
            None if policy.synthesize_attributes => {
                synthesize_attributes(record.memo.as_deref(), record.postmark.as_ref())?
            }
            None => Vec::new(),
        };

        if let Some(entries) = &record.cross_chain_asset {
            tx.tx_type = TransactionType::TransferCrossChainAsset;
            tx.cross_chain_assets = entries
                .iter()
                .enumerate()
                .map(|(i, entry)| -> Result<CrossChainAsset, TransactionError> {
                    let index = u32::try_from(i).map_err(|_| {
                        TransactionError::InvalidRecord("too many cross chain entries".into())
                    })?;
                    Ok(CrossChainAsset::from_record(entry, index))
                })
                .collect::<Result<_, _>>()?;
        }

        Ok(tx)
    }

    /// Parse JSON text as a `TransactionRecord` and import it.
    pub fn from_json(json: &str, policy: &ImportPolicy) -> Result<Self, TransactionError> {
        let record: TransactionRecord = serde_json::from_str(json)?;
        Self::from_record(&record, policy)
    }

    /// Export the structured record.
    ///
    /// `Programs`, `Attributes` and `CrossChainAsset` are present only when
    /// non-empty. Outputs of a version 9 transaction carry `Version`, which
    /// is how import recovers the transaction version. `Memo` and `Postmark` are never emitted; their content is
    /// already in the attributes.
    pub fn to_record(&self) -> TransactionRecord {
        TransactionRecord {
            utxo_inputs: self.inputs.iter().map(UtxoInput::to_record).collect(),
            outputs: self
                .outputs
                .iter()
                .map(|o| o.to_record(self.version))
                .collect(),
            attributes: non_empty(&self.attributes, Attribute::to_record),
            programs: non_empty(&self.programs, Program::to_record),
            cross_chain_asset: non_empty(&self.cross_chain_assets, CrossChainAsset::to_record),
            memo: None,
            postmark: None,
        }
    }

    /// Export the structured record as compact JSON text.
    pub fn to_json(&self) -> Result<String, TransactionError> {
        Ok(serde_json::to_string(&self.to_record())?)
    }
}

fn synthesize_attributes(
    memo: Option<&str>,
    postmark: Option<&serde_json::Value>,
) -> Result<Vec<Attribute>, TransactionError> {
    let mut attributes = vec![match memo {
        Some(memo) if !memo.is_empty() => Attribute::memo(memo),
        _ => Attribute::nonce(),
    }];
    if let Some(postmark) = postmark {
        let description = format!("{{\"Postmark\":{}}}", serde_json::to_string(postmark)?);
        attributes.push(Attribute::new(AttributeUsage::Description, description));
    }
    Ok(attributes)
}

fn non_empty<T, R>(items: &[T], f: impl Fn(&T) -> R) -> Option<Vec<R>> {
    if items.is_empty() {
        None
    } else {
        Some(items.iter().map(f).collect())
    }
}
