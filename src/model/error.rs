use thiserror::Error;

/// Violations of the [`Item`](super::Item) invariants.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ItemError {
    #[error("item id must not be empty")]
    EmptyId,

    #[error("item '{id}' has an empty description")]
    EmptyDescription { id: String },

    #[error("item '{id}' has retrieval score {value} outside [0, 1]")]
    RetrievalScoreOutOfRange { id: String, value: f32 },
}

/// Violations of the [`Judgment`](super::Judgment) numeric contract.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum JudgmentError {
    #[error("{field} is not a number")]
    NotANumber { field: &'static str },

    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} {value} is outside [0, 1]")]
    OutOfRange { field: &'static str, value: f32 },
}
