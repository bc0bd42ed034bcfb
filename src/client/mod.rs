//! High-level facade over retrieval, indexing and ranking.

pub mod error;


pub use error::ClientError;

use std::sync::Arc;
use tracing::info;

use crate::comparison::{Comparator, ComparisonError, LlmComparator};
use crate::config::Config;
use crate::embedding::{Embedder, OpenAiEmbedder};
use crate::model::{Item, Judgment, RankedResult};
use crate::pipeline::{ComparisonPipeline, PipelineConfig, PipelineError, ProgressObserver};
use crate::retrieval::{IndexRetriever, RetrievalError, Retriever};
use crate::vectordb::{QdrantIndex, VectorIndex};

/// Client wired to Qdrant, an OpenAI-compatible embedder and a chat comparator.
pub type DefaultMatchClient = MatchClient<OpenAiEmbedder, QdrantIndex, LlmComparator>;

pub struct MatchClient<E, V, C> {
    retriever: Arc<IndexRetriever<E, V>>,
    pipeline: ComparisonPipeline<IndexRetriever<E, V>, C>,
    default_k: usize,
}

impl<E, V, C> std::fmt::Debug for MatchClient<E, V, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchClient")
            .field("retriever", &self.retriever)
            .field("pipeline", &self.pipeline)
            .field("default_k", &self.default_k)
            .finish()
    }
}

impl<E: Embedder, V: VectorIndex, C: Comparator> MatchClient<E, V, C> {
    pub fn new(retriever: IndexRetriever<E, V>, comparator: C) -> Self {
        let retriever = Arc::new(retriever);
        let pipeline = ComparisonPipeline::new(Arc::clone(&retriever), Arc::new(comparator));
        Self {
            retriever,
            pipeline,
            default_k: crate::constants::DEFAULT_TOP_K,
        }
    }

    pub fn with_pipeline_config(mut self, config: PipelineConfig) -> Self {
        self.pipeline = self.pipeline.with_config(config);
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressObserver>) -> Self {
        self.pipeline = self.pipeline.with_progress(progress);
        self
    }

    /// `k` used by [`match_query`](Self::match_query) and
    /// [`search_items`](Self::search_items) when none is given. Clamped to 1.
    pub fn with_default_k(mut self, k: usize) -> Self {
        self.default_k = k.max(1);
        self
    }

    pub fn default_k(&self) -> usize {
        self.default_k
    }

    pub fn retriever(&self) -> &IndexRetriever<E, V> {
        &self.retriever
    }

    pub fn pipeline(&self) -> &ComparisonPipeline<IndexRetriever<E, V>, C> {
        &self.pipeline
    }

    pub async fn ensure_collection(&self) -> Result<(), RetrievalError> {
        self.retriever.ensure_collection().await
    }

    /// Retrieves and ranks up to `k` items against `query`.
    pub async fn match_query(
        &self,
        query: &str,
        k: Option<usize>,
    ) -> Result<Vec<RankedResult>, PipelineError> {
        self.pipeline
            .execute(query, k.unwrap_or(self.default_k))
            .await
    }

    /// Judges one candidate against `reference` without touching the index.
    pub async fn compare(
        &self,
        reference: &str,
        candidate: &str,
    ) -> Result<Judgment, ComparisonError> {
        self.pipeline.comparator().compare(reference, candidate).await
    }

    /// Plain vector search, no comparisons.
    pub async fn search_items(
        &self,
        query: &str,
        k: Option<usize>,
    ) -> Result<Vec<Item>, RetrievalError> {
        self.retriever
            .fetch(query, k.unwrap_or(self.default_k))
            .await
    }

    pub async fn index_item(&self, item: &Item) -> Result<(), RetrievalError> {
        self.retriever.index_item(item).await
    }
}

impl DefaultMatchClient {
    /// Builds the production stack described by `config`. Does not contact
    /// any backend; call [`ensure_collection`](Self::ensure_collection) for that.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        config.validate()?;

        let embedder = OpenAiEmbedder::new(config.embedding_config())?;
        let index =
            QdrantIndex::with_api_key(&config.qdrant_url, config.qdrant_api_key.as_deref())?;
        let comparator = LlmComparator::new(config.comparator_config())?;

        info!(
            qdrant_url = %config.qdrant_url,
            collection = %config.collection,
            embedding_model = %config.embedding_model,
            comparison_model = %config.comparison_model,
            variant = config.judgment_variant.as_str(),
            "Match client configured"
        );

        let retriever = IndexRetriever::new(embedder, index, config.collection.clone());
        Ok(Self::new(retriever, comparator)
            .with_pipeline_config(config.pipeline_config())
            .with_default_k(config.default_k))
    }
}
