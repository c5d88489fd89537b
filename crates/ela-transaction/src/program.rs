//! Signature programs: authorization evidence attached to a transaction.
//!
//! A program pairs an authorization script (`code`) with the signatures
//! that satisfy it (`parameter`). The parameter is a plain concatenation of
//! 65-byte signature blocks in the order they were produced.

use serde::{Deserialize, Serialize};

use ela_primitives::util::{ElaReader, ElaWriter};
use ela_script::Script;

use crate::crypto::SIGNATURE_BLOCK_LEN;
use crate::error::read_err;
use crate::TransactionError;

/// A (script, signatures) pair.
///
/// # Wire format
///
/// | Field     | Size     |
/// |-----------|----------|
/// | parameter | VarBytes |
/// | code      | VarBytes |
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Program {
    pub code: Script,
    pub parameter: Vec<u8>,
}

/// Structured form of a program, both fields hex.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramRecord {
    #[serde(rename = "Code")]
    pub code: Script,
    #[serde(rename = "Parameter")]
    pub parameter: String,
}

impl Program {
    pub fn new(code: Script, parameter: Vec<u8>) -> Self {
        Program { code, parameter }
    }

    /// Iterate the complete signature blocks in `parameter`.
    ///
    /// A trailing partial block is skipped.
    pub fn signature_blocks(&self) -> impl Iterator<Item = &[u8]> {
        self.parameter.chunks_exact(SIGNATURE_BLOCK_LEN)
    }

    pub fn signature_count(&self) -> usize {
        self.parameter.len() / SIGNATURE_BLOCK_LEN
    }

    pub fn write_to(&self, writer: &mut ElaWriter) {
        writer.write_var_bytes(&self.parameter);
        writer.write_var_bytes(self.code.to_bytes());
    }

    pub fn read_from(reader: &mut ElaReader) -> Result<Self, TransactionError> {
        let parameter = reader
            .read_var_bytes()
            .map_err(read_err("program parameter"))?
            .to_vec();
        let code = reader.read_var_bytes().map_err(read_err("program code"))?;
        Ok(Program {
            code: Script::from_bytes(code),
            parameter,
        })
    }

    pub fn from_record(record: &ProgramRecord) -> Result<Self, TransactionError> {
        let parameter = hex::decode(&record.parameter).map_err(|e| {
            TransactionError::InvalidRecord(format!("program Parameter: {}", e))
        })?;
        Ok(Program {
            code: record.code.clone(),
            parameter,
        })
    }

    pub fn to_record(&self) -> ProgramRecord {
        ProgramRecord {
            code: self.code.clone(),
            parameter: hex::encode(&self.parameter),
        }
    }
}
