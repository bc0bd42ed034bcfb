//! Candidate retrieval.
//!
//! [`Retriever`] is the capability the pipeline consumes. [`IndexRetriever`]
//! implements it by embedding the query and searching a [`VectorIndex`].
//!
//! [`VectorIndex`]: crate::vectordb::VectorIndex

pub mod error;
pub mod index;
#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use error::RetrievalError;
pub use index::IndexRetriever;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockRetriever;

use crate::model::Item;

/// Fetches the `k` most relevant items for a query.
///
/// Implementations return at most `k` items ordered by their own relevance
/// metric, best first. Fewer than `k` is fine; an unreachable backend is an
/// error, never an empty or padded list.
pub trait Retriever: Send + Sync {
    fn fetch(
        &self,
        query: &str,
        k: usize,
    ) -> impl std::future::Future<Output = Result<Vec<Item>, RetrievalError>> + Send;
}

impl<R: Retriever> Retriever for std::sync::Arc<R> {
    fn fetch(
        &self,
        query: &str,
        k: usize,
    ) -> impl std::future::Future<Output = Result<Vec<Item>, RetrievalError>> + Send {
        (**self).fetch(query, k)
    }
}
