//! Error types for the merge crate.
//!
//! The merge itself is total over acyclic trees; errors only arise when
//! moving between a wire format and the [`Value`](crate::Value) model.

/// Errors produced at the decode/encode edge of the merge engine.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The input text was not a valid JSON document.
    #[error("decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// The value could not be serialized.
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// A float that JSON cannot represent (NaN or infinite).
    #[error("unsupported number: {0}")]
    UnsupportedNumber(String),
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
