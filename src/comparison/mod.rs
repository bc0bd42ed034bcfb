//! LLM-judged comparison of a query against one candidate text.
//!
//! The [`Comparator`] capability produces one [`Judgment`](crate::model::Judgment)
//! per call. [`LlmComparator`] asks a chat model for JSON structured output and
//! treats the reply as untrusted: required fields, numeric types and ranges are
//! checked in [`parse`] before a judgment is built.
//!
//! Two judgment shapes are supported through [`JudgmentVariant`]; both use the
//! `[0, 1]` score scale.

pub mod config;
pub mod error;
pub mod llm;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod parse;
pub mod prompt;


pub use config::{ComparatorConfig, JudgmentVariant};
pub use error::ComparisonError;
pub use llm::LlmComparator;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockComparator;
pub use parse::{judgment_schema, parse_judgment};

use crate::model::Judgment;

/// Compares a reference text against a candidate text.
///
/// Empty or oversized inputs are rejected with
/// [`ComparisonError::InvalidInput`] before any backend call.
pub trait Comparator: Send + Sync {
    fn compare(
        &self,
        reference: &str,
        candidate: &str,
    ) -> impl std::future::Future<Output = Result<Judgment, ComparisonError>> + Send;
}

impl<C: Comparator> Comparator for std::sync::Arc<C> {
    fn compare(
        &self,
        reference: &str,
        candidate: &str,
    ) -> impl std::future::Future<Output = Result<Judgment, ComparisonError>> + Send {
        (**self).compare(reference, candidate)
    }
}

/// Rejects blank text and text longer than `max_chars` characters.
pub fn validate_text(
    field: &'static str,
    text: &str,
    max_chars: usize,
) -> Result<(), ComparisonError> {
    if text.trim().is_empty() {
        return Err(ComparisonError::InvalidInput {
            field,
            reason: "text cannot be empty".to_string(),
        });
    }

    let len = text.chars().count();
    if len > max_chars {
        return Err(ComparisonError::InvalidInput {
            field,
            reason: format!("text has {} characters, maximum is {}", len, max_chars),
        });
    }

    Ok(())
}
