use thiserror::Error;

use crate::comparison::ComparisonError;
use crate::config::ConfigError;
use crate::embedding::EmbeddingError;
use crate::vectordb::VectorDbError;

/// Failures while assembling a [`MatchClient`](super::MatchClient) from configuration.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("embedding setup failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("vector index setup failed: {0}")]
    VectorDb(#[from] VectorDbError),

    #[error("comparator setup failed: {0}")]
    Comparison(#[from] ComparisonError),
}
