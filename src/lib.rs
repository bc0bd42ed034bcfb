//! Horizon Match library crate (used by the server binary and integration tests).
//!
//! Given a free-text query, candidates are fetched from a vector index, each
//! one is judged against the query by a language model, and the pairs come
//! back ranked by the judged score.
//!
//! # Public API Surface
//!
//! - [`ComparisonPipeline`] - retrieve, compare and rank
//! - [`Retriever`], [`IndexRetriever`] - candidate retrieval over embeddings and Qdrant
//! - [`Comparator`], [`LlmComparator`] - structured LLM judgments
//! - [`MatchClient`] - facade used by the gateway
//! - [`Config`], [`ConfigTree`] - environment and file configuration
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod client;
pub mod comparison;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod gateway;
pub mod hashing;
pub mod model;
pub mod pipeline;
pub mod retrieval;
pub mod vectordb;

pub use client::{ClientError, DefaultMatchClient, MatchClient};
pub use comparison::{
    Comparator, ComparatorConfig, ComparisonError, JudgmentVariant, LlmComparator,
};
pub use config::{Config, ConfigError, ConfigTree};
pub use embedding::{Embedder, EmbeddingConfig, EmbeddingError, OpenAiEmbedder};
pub use gateway::{GatewayError, HandlerState, create_router_with_state};
pub use hashing::{hash_to_u64, point_id_for_item};
pub use model::{Item, ItemError, Judgment, JudgmentError, RankedResult};
pub use pipeline::{
    ComparisonPipeline, ErrorKind, NoopProgress, PipelineConfig, PipelineError,
    ProgressBroadcaster, ProgressObserver,
};
pub use retrieval::{IndexRetriever, RetrievalError, Retriever};
pub use vectordb::{QdrantIndex, VectorDbError, VectorIndex};

#[cfg(any(test, feature = "mock"))]
pub use comparison::MockComparator;
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
#[cfg(any(test, feature = "mock"))]
pub use retrieval::MockRetriever;
#[cfg(any(test, feature = "mock"))]
pub use vectordb::MockVectorIndex;
