use tracing::{debug, info, instrument};

use super::Retriever;
use super::error::RetrievalError;
use crate::embedding::Embedder;
use crate::model::Item;
use crate::vectordb::{IndexPoint, VectorIndex};

/// Retriever over an embedding model and a vector index.
pub struct IndexRetriever<E, V> {
    embedder: E,
    index: V,
    collection: String,
}

impl<E, V> std::fmt::Debug for IndexRetriever<E, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexRetriever")
            .field("collection", &self.collection)
            .finish_non_exhaustive()
    }
}

impl<E: Embedder, V: VectorIndex> IndexRetriever<E, V> {
    pub fn new(embedder: E, index: V, collection: impl Into<String>) -> Self {
        Self {
            embedder,
            index,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    pub fn index(&self) -> &V {
        &self.index
    }

    /// Creates the backing collection if it does not exist yet.
    pub async fn ensure_collection(&self) -> Result<(), RetrievalError> {
        self.index
            .ensure_collection(&self.collection, self.embedder.dimension() as u64)
            .await?;
        Ok(())
    }

    /// Embeds the item's description and writes it to the index.
    ///
    /// Items without `updated_at` are stamped with the current UTC time.
    #[instrument(skip(self, item), fields(item_id = %item.id))]
    pub async fn index_item(&self, item: &Item) -> Result<(), RetrievalError> {
        item.validate()?;

        let vector = self.embedder.embed(&item.description).await?;
        let mut point = IndexPoint::from_item(item, vector);
        if point.updated_at.is_none() {
            point = point.with_updated_at(chrono::Utc::now().to_rfc3339());
        }

        self.index
            .upsert_points(&self.collection, vec![point])
            .await?;

        info!(collection = %self.collection, "Item indexed");
        Ok(())
    }
}

impl<E: Embedder, V: VectorIndex> Retriever for IndexRetriever<E, V> {
    async fn fetch(&self, query: &str, k: usize) -> Result<Vec<Item>, RetrievalError> {
        if query.trim().is_empty() {
            return Err(RetrievalError::EmptyQuery);
        }
        if k == 0 {
            return Err(RetrievalError::InvalidLimit { k });
        }

        let vector = self.embedder.embed(query).await?;
        let hits = self
            .index
            .search(&self.collection, vector, k as u64)
            .await?;

        if hits.len() > k {
            return Err(RetrievalError::TooManyItems {
                k,
                returned: hits.len(),
            });
        }

        debug!(
            collection = %self.collection,
            k,
            returned = hits.len(),
            "Vector search complete"
        );

        Ok(hits.into_iter().map(|hit| hit.into_item()).collect())
    }
}
