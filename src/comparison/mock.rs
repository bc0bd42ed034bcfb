use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::error::ComparisonError;
use super::{Comparator, validate_text};
use crate::constants::DEFAULT_MAX_TEXT_CHARS;
use crate::model::Judgment;

/// Comparator with scripted scores, failures and latencies keyed by candidate text.
#[derive(Debug)]
pub struct MockComparator {
    scores: HashMap<String, f32>,
    default_score: f32,
    delays: HashMap<String, Duration>,
    fail_on: Option<String>,
    max_text_chars: usize,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl Default for MockComparator {
    fn default() -> Self {
        Self {
            scores: HashMap::new(),
            default_score: 0.5,
            delays: HashMap::new(),
            fail_on: None,
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl MockComparator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scores by candidate text, e.g. `[("Fitness AI", 0.6)]`.
    pub fn with_scores(scores: &[(&str, f32)]) -> Self {
        Self {
            scores: scores
                .iter()
                .map(|(text, score)| (text.to_string(), *score))
                .collect(),
            ..Default::default()
        }
    }

    pub fn default_score(mut self, score: f32) -> Self {
        self.default_score = score;
        self
    }

    /// Delays the reply for `candidate`.
    pub fn delay(mut self, candidate: &str, delay: Duration) -> Self {
        self.delays.insert(candidate.to_string(), delay);
        self
    }

    /// Fails with a provider error when comparing `candidate`.
    pub fn fail_on(mut self, candidate: &str) -> Self {
        self.fail_on = Some(candidate.to_string());
        self
    }

    pub fn max_text_chars(mut self, max_text_chars: usize) -> Self {
        self.max_text_chars = max_text_chars;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneous `compare` calls observed.
    pub fn peak_concurrency(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Candidate texts in the order their comparisons completed.
    pub fn completion_order(&self) -> Vec<String> {
        self.seen.lock().clone()
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Comparator for MockComparator {
    async fn compare(&self, reference: &str, candidate: &str) -> Result<Judgment, ComparisonError> {
        validate_text("reference", reference, self.max_text_chars)?;
        validate_text("candidate", candidate, self.max_text_chars)?;

        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        if let Some(delay) = self.delays.get(candidate) {
            tokio::time::sleep(*delay).await;
        } else {
            tokio::task::yield_now().await;
        }

        if self.fail_on.as_deref() == Some(candidate) {
            return Err(ComparisonError::Provider {
                model: "mock".to_string(),
                message: format!("backend rejected '{}'", candidate),
            });
        }

        let score = self
            .scores
            .get(candidate)
            .copied()
            .unwrap_or(self.default_score);

        self.seen.lock().push(candidate.to_string());

        Ok(Judgment::new(
            format!("Summary of {}", candidate),
            format!("Both concern {}", reference),
            format!("{} differs in scope", candidate),
            score,
            None,
            format!("Scripted score for {}", candidate),
        )?)
    }
}
