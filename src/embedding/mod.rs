//! Text embedding backends.
//!
//! - [`OpenAiEmbedder`] calls an OpenAI-compatible `/embeddings` endpoint.
//! - [`MockEmbedder`] hashes text into a deterministic vector (tests only).

pub mod config;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod openai;


pub use config::EmbeddingConfig;
pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;
pub use openai::OpenAiEmbedder;

/// Turns text into a dense vector.
pub trait Embedder: Send + Sync {
    /// Embeds a single text.
    fn embed(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Vec<f32>, EmbeddingError>> + Send;

    /// Length of every vector this embedder returns.
    fn dimension(&self) -> usize;
}
