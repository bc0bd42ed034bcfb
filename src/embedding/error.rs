use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("cannot embed empty text")]
    EmptyInput,

    #[error("embedding request to '{url}' failed: {reason}")]
    RequestFailed { url: String, reason: String },

    #[error("embedding endpoint returned {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("malformed embedding response: {reason}")]
    MalformedResponse { reason: String },

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid embedding configuration: {reason}")]
    InvalidConfig { reason: String },
}
