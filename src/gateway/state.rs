use std::sync::Arc;

use crate::client::MatchClient;
use crate::comparison::Comparator;
use crate::embedding::Embedder;
use crate::pipeline::ProgressBroadcaster;
use crate::vectordb::VectorIndex;

pub struct HandlerState<E, V, C> {
    pub client: Arc<MatchClient<E, V, C>>,

    /// Shared with the client's pipeline; polled by `/v1/progress`.
    pub progress: Arc<ProgressBroadcaster>,
}

impl<E, V, C> Clone for HandlerState<E, V, C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            progress: Arc::clone(&self.progress),
        }
    }
}

impl<E, V, C> HandlerState<E, V, C>
where
    E: Embedder,
    V: VectorIndex,
    C: Comparator,
{
    /// Routes the client's pipeline progress through `progress`.
    pub fn new(client: MatchClient<E, V, C>, progress: Arc<ProgressBroadcaster>) -> Self {
        let client = client.with_progress(progress.clone());
        Self {
            client: Arc::new(client),
            progress,
        }
    }
}
