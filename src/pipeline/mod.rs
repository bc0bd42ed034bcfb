//! Retrieve, compare, rank.
//!
//! [`ComparisonPipeline::execute`] fetches up to `k` candidates, asks the
//! comparator to judge each one against the query (at most
//! [`PipelineConfig::concurrency`] at a time) and returns the pairs sorted by
//! score, highest first. Equal scores keep retrieval order regardless of
//! which comparison finished first. Any failure fails the whole call.

pub mod config;
pub mod error;
pub mod progress;

#[cfg(test)]
mod tests;

pub use config::PipelineConfig;
pub use error::{ErrorKind, PipelineError};
pub use progress::{NoopProgress, ProgressBroadcaster, ProgressObserver};

use futures_util::StreamExt;
use futures_util::stream;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::comparison::{Comparator, ComparisonError};
use crate::model::{Item, Judgment, RankedResult};
use crate::retrieval::{RetrievalError, Retriever};

pub struct ComparisonPipeline<R, C> {
    retriever: Arc<R>,
    comparator: Arc<C>,
    progress: Arc<dyn ProgressObserver>,
    config: PipelineConfig,
}

impl<R, C> Clone for ComparisonPipeline<R, C> {
    fn clone(&self) -> Self {
        Self {
            retriever: Arc::clone(&self.retriever),
            comparator: Arc::clone(&self.comparator),
            progress: Arc::clone(&self.progress),
            config: self.config,
        }
    }
}

impl<R, C> std::fmt::Debug for ComparisonPipeline<R, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparisonPipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<R: Retriever, C: Comparator> ComparisonPipeline<R, C> {
    pub fn new(retriever: Arc<R>, comparator: Arc<C>) -> Self {
        Self {
            retriever,
            comparator,
            progress: Arc::new(NoopProgress),
            config: PipelineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressObserver>) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn retriever(&self) -> &Arc<R> {
        &self.retriever
    }

    pub fn comparator(&self) -> &Arc<C> {
        &self.comparator
    }

    /// Ranks up to `k` retrieved items by their judged similarity to `query`.
    ///
    /// Returns an empty list when nothing is retrieved. Dropping the returned
    /// future abandons every in-flight comparison.
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn execute(&self, query: &str, k: usize) -> Result<Vec<RankedResult>, PipelineError> {
        match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, self.run(query, k))
                .await
                .map_err(|_| {
                    warn!(timeout_ms = limit.as_millis() as u64, "Pipeline timed out");
                    PipelineError::TimedOut { after: limit }
                })?,
            None => self.run(query, k).await,
        }
    }

    async fn run(&self, query: &str, k: usize) -> Result<Vec<RankedResult>, PipelineError> {
        if k == 0 {
            return Err(PipelineError::InvalidArgument {
                reason: "k must be at least 1".to_string(),
            });
        }
        if query.trim().is_empty() {
            return Err(PipelineError::InvalidArgument {
                reason: "query must not be empty".to_string(),
            });
        }

        self.progress.on_progress(progress::SEARCHING);
        let items = self.retriever.fetch(query, k).await?;
        if items.len() > k {
            return Err(RetrievalError::TooManyItems {
                k,
                returned: items.len(),
            }
            .into());
        }

        let total = items.len();
        debug!(total, k, "Retrieved candidates");

        let mut comparisons = stream::iter(items.into_iter().enumerate())
            .map(|(index, item)| self.compare_one(query, index, item))
            .buffer_unordered(self.config.concurrency.max(1));

        let mut ranked = Vec::with_capacity(total);
        while let Some((index, item, judgment)) = comparisons.next().await {
            let judgment = judgment.inspect_err(|e| {
                warn!(item_id = %item.id, error = %e, "Comparison failed, aborting run");
            })?;
            debug!(item_id = %item.id, score = judgment.score, "Comparison complete");

            ranked.push((index, RankedResult::new(item, judgment)));
            self.progress
                .on_progress(&progress::comparing(ranked.len(), total));
        }

        self.progress.on_progress(progress::SORTING);
        let results = rank(ranked);

        info!(
            results = results.len(),
            top_score = results.first().map(RankedResult::score),
            "Pipeline complete"
        );
        self.progress.on_progress(progress::DONE);

        Ok(results)
    }

    async fn compare_one(
        &self,
        query: &str,
        index: usize,
        item: Item,
    ) -> (usize, Item, Result<Judgment, ComparisonError>) {
        let judgment = self.comparator.compare(query, &item.description).await;
        (index, item, judgment)
    }
}

/// Score descending; ties fall back to the original retrieval index.
fn rank(mut ranked: Vec<(usize, RankedResult)>) -> Vec<RankedResult> {
    ranked.sort_by(|(index_a, a), (index_b, b)| {
        b.score()
            .total_cmp(&a.score())
            .then_with(|| index_a.cmp(index_b))
    });
    ranked.into_iter().map(|(_, result)| result).collect()
}
