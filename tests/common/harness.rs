//! Test server harness.

use horizon_match::client::MatchClient;
use horizon_match::comparison::MockComparator;
use horizon_match::embedding::MockEmbedder;
use horizon_match::gateway::{HandlerState, create_router_with_state};
use horizon_match::model::Item;
use horizon_match::pipeline::{PipelineConfig, ProgressBroadcaster};
use horizon_match::retrieval::IndexRetriever;
use horizon_match::vectordb::MockVectorIndex;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;
const TEST_COLLECTION_NAME: &str = "horizon_test_items";
const TEST_VECTOR_SIZE: usize = 32;

pub type TestClientStack = MatchClient<MockEmbedder, MockVectorIndex, MockComparator>;

/// The "AI workout app" catalogue: `(id, title, description, score)`.
pub const WORKOUT_CATALOGUE: &[(&str, &str, &str, f32)] = &[
    ("1", "Fitness AI", "Personal trainer app powered by machine learning", 0.60),
    ("2", "Diet tracker", "Tracks meals and suggests healthier diets", 0.85),
    ("3", "Workout planner", "Plans weekly gym sessions for beginners", 0.60),
];

pub struct TestServerConfig {
    pub comparator: MockComparator,
    pub items: Vec<Item>,
    pub concurrency: usize,
    pub timeout: Option<Duration>,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            comparator: MockComparator::new(),
            items: Vec::new(),
            concurrency: 2,
            timeout: None,
        }
    }
}

impl TestServerConfig {
    pub fn workout_catalogue() -> Self {
        let scores: Vec<(&str, f32)> = WORKOUT_CATALOGUE
            .iter()
            .map(|(_, _, description, score)| (*description, *score))
            .collect();

        Self {
            comparator: MockComparator::with_scores(&scores),
            items: workout_items(),
            ..Default::default()
        }
    }
}

pub fn workout_items() -> Vec<Item> {
    WORKOUT_CATALOGUE
        .iter()
        .map(|(id, title, description, _)| {
            Item::new(*id, *description)
                .expect("catalogue item is valid")
                .with_title(*title)
                .with_updated_at("2024-05-01T00:00:00Z")
        })
        .collect()
}

/// Builds a mock-backed client with `items` already indexed.
pub async fn build_client(
    comparator: MockComparator,
    items: &[Item],
) -> Result<TestClientStack, ServerStartupError> {
    let retriever = IndexRetriever::new(
        MockEmbedder::new(TEST_VECTOR_SIZE),
        MockVectorIndex::new(),
        TEST_COLLECTION_NAME,
    );
    let client = MatchClient::new(retriever, comparator);
    client
        .ensure_collection()
        .await
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    for item in items {
        client
            .index_item(item)
            .await
            .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;
    }

    Ok(client)
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub progress: Arc<ProgressBroadcaster>,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

/// Spawns a server on an ephemeral port with every backend mocked in memory.
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;

    let client = build_client(config.comparator, &config.items)
        .await?
        .with_pipeline_config(PipelineConfig::new(config.concurrency).with_timeout(config.timeout));

    let progress = Arc::new(ProgressBroadcaster::default());
    let state = HandlerState::new(client, progress.clone());
    let app = create_router_with_state(state);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let server_handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    wait_for_server_ready(
        addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr,
        progress,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
