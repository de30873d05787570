use thiserror::Error;

/// Custom error type for the OTXRust crates.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum OtxError {
    /// A constructor or operation received a value outside its domain
    /// (non-positive sizes, rank out of range, degenerate class statistics,
    /// malformed repeat specification).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Index out of bounds: index {index} for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),
}

impl OtxError {
    /// Shorthand for building an `InvalidArgument` from anything printable.
    pub fn invalid(message: impl Into<String>) -> Self {
        OtxError::InvalidArgument(message.into())
    }
}
