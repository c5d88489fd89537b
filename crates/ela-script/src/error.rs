/// Error types for script operations.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Hex decoding error.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// The script does not end with the multisig marker.
    #[error("not a multisig script")]
    NotMultisig,

    /// A multisig redeem script whose framing does not hold together.
    #[error("malformed redeem script: {0}")]
    MalformedRedeemScript(String),

    /// Threshold outside `1..=n` or key count outside `1..=16`.
    #[error("invalid threshold {required} of {total}")]
    InvalidThreshold { required: usize, total: usize },

    /// A public key with the wrong length for a script push.
    #[error("invalid public key length: {0}")]
    InvalidPublicKeyLength(usize),

    /// Error from primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] ela_primitives::PrimitivesError),
}
