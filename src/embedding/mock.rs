use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::Embedder;
use super::error::EmbeddingError;
use crate::hashing::seeded_unit_values;

/// Deterministic embedder: identical texts always produce identical vectors.
#[derive(Debug)]
pub struct MockEmbedder {
    dimension: usize,
    fail: AtomicBool,
    calls: AtomicUsize,
}

impl MockEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            fail: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    /// Makes every following call fail as if the endpoint were down.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(EmbeddingError::RequestFailed {
                url: "mock://embeddings".to_string(),
                reason: "connection refused".to_string(),
            });
        }

        Ok(seeded_unit_values(text, self.dimension))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
