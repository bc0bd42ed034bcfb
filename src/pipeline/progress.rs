use parking_lot::RwLock;
use tokio::sync::broadcast;

pub const SEARCHING: &str = "Searching for similar items...";
pub const SORTING: &str = "Sorting results by similarity score...";
pub const DONE: &str = "Done";
pub const IDLE: &str = "Idle";

const DEFAULT_CAPACITY: usize = 64;

pub fn comparing(completed: usize, total: usize) -> String {
    format!("Comparing item {}/{}...", completed, total)
}

/// Receives human-readable phase messages from a running pipeline.
///
/// Implementations must not block; the pipeline calls them inline.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, state: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressObserver for NoopProgress {
    fn on_progress(&self, _state: &str) {}
}

/// Fans progress out to any number of subscribers and keeps the latest state
/// for polling. Sending with no subscribers is not an error.
#[derive(Debug)]
pub struct ProgressBroadcaster {
    sender: broadcast::Sender<String>,
    current: RwLock<String>,
}

impl Default for ProgressBroadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ProgressBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            current: RwLock::new(IDLE.to_string()),
        }
    }

    /// Slow subscribers lose the oldest messages rather than stalling the pipeline.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.sender.subscribe()
    }

    pub fn current(&self) -> String {
        self.current.read().clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl ProgressObserver for ProgressBroadcaster {
    fn on_progress(&self, state: &str) {
        *self.current.write() = state.to_string();
        let _ = self.sender.send(state.to_string());
    }
}
