use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::model::ItemError;
use crate::vectordb::VectorDbError;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("query must not be empty")]
    EmptyQuery,

    #[error("k must be at least 1, got {k}")]
    InvalidLimit { k: usize },

    #[error("query embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("vector index error: {0}")]
    Index(#[from] VectorDbError),

    #[error("invalid item: {0}")]
    InvalidItem(#[from] ItemError),

    #[error("retriever returned {returned} items for k = {k}")]
    TooManyItems { k: usize, returned: usize },

    #[error("retriever unavailable: {reason}")]
    Unavailable { reason: String },
}
