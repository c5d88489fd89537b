//! Usage-tagged transaction attributes.
//!
//! An attribute is a free-form byte blob tagged with a one-byte usage code.
//! Every ELA transfer carries at least one: a nonce when the sender has
//! nothing to say, otherwise a memo or description.

use serde::{Deserialize, Serialize};

use ela_primitives::util::{ElaReader, ElaWriter};

use crate::error::read_err;
use crate::TransactionError;

/// The usage tag of an attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AttributeUsage {
    Nonce = 0x00,
    Script = 0x20,
    Memo = 0x81,
    Description = 0x90,
    DescriptionUrl = 0x91,
    Confirmations = 0x92,
}

impl AttributeUsage {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for AttributeUsage {
    type Error = TransactionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(AttributeUsage::Nonce),
            0x20 => Ok(AttributeUsage::Script),
            0x81 => Ok(AttributeUsage::Memo),
            0x90 => Ok(AttributeUsage::Description),
            0x91 => Ok(AttributeUsage::DescriptionUrl),
            0x92 => Ok(AttributeUsage::Confirmations),
            other => Err(TransactionError::InvalidTransaction(format!(
                "unknown attribute usage {:#04x}",
                other
            ))),
        }
    }
}

/// A single transaction attribute.
///
/// # Wire format
///
/// | Field  | Size     |
/// |--------|----------|
/// | usage  | 1 byte   |
/// | length | VarInt   |
/// | data   | variable |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub usage: AttributeUsage,
    pub data: Vec<u8>,
}

/// Structured form of an attribute: `{"usage": <u8>, "data": <hex>}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRecord {
    pub usage: u8,
    pub data: String,
}

impl Attribute {
    pub fn new(usage: AttributeUsage, data: impl Into<Vec<u8>>) -> Self {
        Attribute {
            usage,
            data: data.into(),
        }
    }

    /// A nonce attribute with empty data.
    pub fn nonce() -> Self {
        Self::new(AttributeUsage::Nonce, Vec::new())
    }

    /// A memo attribute carrying the UTF-8 bytes of `memo`.
    pub fn memo(memo: &str) -> Self {
        Self::new(AttributeUsage::Memo, memo.as_bytes())
    }

    pub fn write_to(&self, writer: &mut ElaWriter) {
        writer.write_u8(self.usage.as_u8());
        writer.write_var_bytes(&self.data);
    }

    pub fn read_from(reader: &mut ElaReader) -> Result<Self, TransactionError> {
        let usage = reader.read_u8().map_err(read_err("attribute usage"))?;
        let usage = AttributeUsage::try_from(usage)?;
        let data = reader
            .read_var_bytes()
            .map_err(read_err("attribute data"))?
            .to_vec();
        Ok(Attribute { usage, data })
    }

    pub fn from_record(record: &AttributeRecord) -> Result<Self, TransactionError> {
        let usage = AttributeUsage::try_from(record.usage)
            .map_err(|e| TransactionError::InvalidRecord(e.to_string()))?;
        let data = hex::decode(&record.data).map_err(|e| {
            TransactionError::InvalidRecord(format!("attribute data: {}", e))
        })?;
        Ok(Attribute { usage, data })
    }

    pub fn to_record(&self) -> AttributeRecord {
        AttributeRecord {
            usage: self.usage.as_u8(),
            data: hex::encode(&self.data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memo_wire_layout() {
        let attr = Attribute::memo("hi");
        let mut writer = ElaWriter::new();
        attr.write_to(&mut writer);
        assert_eq!(writer.into_bytes(), vec![0x81, 0x02, b'h', b'i']);
    }

    #[test]
    fn test_nonce_is_empty() {
        let attr = Attribute::nonce();
        let mut writer = ElaWriter::new();
        attr.write_to(&mut writer);
        assert_eq!(writer.into_bytes(), vec![0x00, 0x00]);
    }

    #[test]
    fn test_read_back() {
        let attr = Attribute::new(AttributeUsage::Description, b"postmark".to_vec());
        let mut writer = ElaWriter::new();
        attr.write_to(&mut writer);
        let bytes = writer.into_bytes();
        let mut reader = ElaReader::new(&bytes);
        assert_eq!(Attribute::read_from(&mut reader).unwrap(), attr);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_unknown_usage_rejected() {
        let mut reader = ElaReader::new(&[0x42, 0x00]);
        assert!(Attribute::read_from(&mut reader).is_err());
    }

    #[test]
    fn test_record_shape() {
        let attr = Attribute::memo("x");
        let json = serde_json::to_value(attr.to_record()).unwrap();
        assert_eq!(json, serde_json::json!({"usage": 0x81, "data": "78"}));
        let record: AttributeRecord = serde_json::from_value(json).unwrap();
        assert_eq!(Attribute::from_record(&record).unwrap(), attr);
    }

    #[test]
    fn test_record_bad_hex() {
        let record = AttributeRecord {
            usage: 0x81,
            data: "xyz".to_string(),
        };
        assert!(matches!(
            Attribute::from_record(&record),
            Err(TransactionError::InvalidRecord(_))
        ));
    }
}
