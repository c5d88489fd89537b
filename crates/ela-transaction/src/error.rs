/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The transaction structure is invalid (e.g. an unknown type byte).
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),
    /// Signing failed (e.g. the private key bytes are not a valid scalar).
    #[error("signing error: {0}")]
    SigningError(String),
    /// An error occurred during binary/hex serialization or deserialization.
    #[error("serialization error: {0}")]
    SerializationError(String),
    /// A structured record carried a value that could not be converted.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    /// An underlying script error (forwarded from `ela-script`).
    #[error("script error: {0}")]
    Script(#[from] ela_script::ScriptError),
    /// An underlying primitives error (forwarded from `ela-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] ela_primitives::PrimitivesError),
    /// JSON text could not be parsed into, or produced from, a record.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Wrap a reader failure with the name of the field being decoded.
pub(crate) fn read_err(
    field: &'static str,
) -> impl FnOnce(ela_primitives::PrimitivesError) -> TransactionError {
    move |e| TransactionError::SerializationError(format!("reading {}: {}", field, e))
}
