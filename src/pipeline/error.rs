use std::time::Duration;
use thiserror::Error;

use crate::comparison::ComparisonError;
use crate::retrieval::RetrievalError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("comparison failed: {0}")]
    Comparison(#[from] ComparisonError),

    #[error("pipeline timed out after {} ms", .after.as_millis())]
    TimedOut { after: Duration },
}

/// Coarse classification used by callers and the HTTP gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    /// Rejected by a comparator before any backend call.
    InvalidInput,
    RetrievalFailure,
    /// Also covers malformed judgments.
    ComparisonFailure,
    TimedOut,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::RetrievalFailure => "retrieval_failure",
            ErrorKind::ComparisonFailure => "comparison_failure",
            ErrorKind::TimedOut => "timed_out",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            PipelineError::Retrieval(
                RetrievalError::EmptyQuery | RetrievalError::InvalidLimit { .. },
            ) => ErrorKind::InvalidArgument,
            PipelineError::Retrieval(_) => ErrorKind::RetrievalFailure,
            PipelineError::Comparison(ComparisonError::InvalidInput { .. }) => {
                ErrorKind::InvalidInput
            }
            PipelineError::Comparison(_) => ErrorKind::ComparisonFailure,
            PipelineError::TimedOut { .. } => ErrorKind::TimedOut,
        }
    }

    /// `true` when the model replied but its judgment failed range or type checks.
    pub fn is_malformed_judgment(&self) -> bool {
        matches!(
            self,
            PipelineError::Comparison(ComparisonError::MalformedJudgment(_))
        )
    }
}
