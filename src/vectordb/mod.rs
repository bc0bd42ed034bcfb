//! Qdrant vector index integration.
//!
//! Items are stored as points whose payload carries the item fields; the
//! point id is derived from the item id (see [`crate::hashing`]).

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;


pub use client::{QdrantIndex, VectorIndex};
pub use error::VectorDbError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockVectorIndex, cosine_similarity};
pub use model::{IndexHit, IndexPoint};

pub const DEFAULT_COLLECTION_NAME: &str = crate::constants::DEFAULT_COLLECTION_NAME;

pub const DEFAULT_VECTOR_SIZE: u64 = crate::constants::DEFAULT_VECTOR_SIZE_U64;

/// Payload keys written by [`IndexPoint`] and read back by [`IndexHit`].
pub mod payload_keys {
    pub const ITEM_ID: &str = "item_id";
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const UPDATED_AT: &str = "updated_at";
}
