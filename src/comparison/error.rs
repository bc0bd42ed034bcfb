use thiserror::Error;

use crate::model::JudgmentError;

#[derive(Debug, Error)]
pub enum ComparisonError {
    /// Input rejected before contacting the model.
    #[error("invalid {field} input: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("invalid comparator configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("comparison model '{model}' request failed: {message}")]
    Provider { model: String, message: String },

    #[error("malformed structured output: {reason}")]
    MalformedOutput { reason: String },

    #[error("structured output is missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("malformed judgment: {0}")]
    MalformedJudgment(#[from] JudgmentError),
}

impl ComparisonError {
    /// `true` for errors raised before any backend call.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ComparisonError::InvalidInput { .. })
    }
}
