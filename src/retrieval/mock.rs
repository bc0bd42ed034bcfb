use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::Retriever;
use super::error::RetrievalError;
use crate::model::Item;

/// Retriever returning a fixed, already-ordered list of items.
#[derive(Debug, Default)]
pub struct MockRetriever {
    items: Vec<Item>,
    fail: AtomicBool,
    ignore_limit: AtomicBool,
    calls: AtomicUsize,
}

impl MockRetriever {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }

    /// Builds items from `(id, description)` pairs, keeping their order.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let items = pairs
            .iter()
            .map(|(id, description)| Item {
                id: id.to_string(),
                description: description.to_string(),
                title: None,
                updated_at: None,
                retrieval_score: None,
            })
            .collect();
        Self::new(items)
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Returns every item regardless of `k` (a contract violation).
    pub fn set_ignore_limit(&self, ignore: bool) {
        self.ignore_limit.store(ignore, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Retriever for MockRetriever {
    async fn fetch(&self, _query: &str, k: usize) -> Result<Vec<Item>, RetrievalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail.load(Ordering::SeqCst) {
            return Err(RetrievalError::Unavailable {
                reason: "index unreachable".to_string(),
            });
        }

        let take = if self.ignore_limit.load(Ordering::SeqCst) {
            self.items.len()
        } else {
            k.min(self.items.len())
        };
        Ok(self.items[..take].to_vec())
    }
}
