//! Domain records flowing through the ranking pipeline.
//!
//! [`Item`]s come out of retrieval, [`Judgment`]s come out of comparison, and a
//! [`RankedResult`] pairs the two once both exist. None of them are mutated after
//! construction.

pub mod error;
pub mod item;
pub mod judgment;

#[cfg(test)]
mod tests;

pub use error::{ItemError, JudgmentError};
pub use item::Item;
pub use judgment::Judgment;

use serde::{Deserialize, Serialize};

/// One retrieved item together with the judgment produced for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub item: Item,
    pub judgment: Judgment,
}

impl RankedResult {
    pub fn new(item: Item, judgment: Judgment) -> Self {
        Self { item, judgment }
    }

    /// Comparator score (not the retrieval score).
    pub fn score(&self) -> f32 {
        self.judgment.score
    }
}
