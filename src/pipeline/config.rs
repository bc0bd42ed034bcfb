use std::time::Duration;

use crate::constants::DEFAULT_CONCURRENCY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Comparisons allowed in flight at once; never below 1.
    pub concurrency: usize,
    /// Bound on a whole `execute` call.
    pub timeout: Option<Duration>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: None,
        }
    }
}

impl PipelineConfig {
    pub fn new(concurrency: usize) -> Self {
        Self::default().with_concurrency(concurrency)
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.concurrency == 0 {
            return Err("concurrency must be at least 1".to_string());
        }
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err("timeout must be greater than zero".to_string());
        }
        Ok(())
    }
}
