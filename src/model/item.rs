use serde::{Deserialize, Serialize};

use super::error::ItemError;
use crate::constants::UNKNOWN_FIELD;

/// A retrievable candidate record.
///
/// `id` and `description` are always present. Everything else is optional
/// metadata that never influences ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// The retriever's own relevance estimate in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieval_score: Option<f32>,
}

impl Item {
    /// Creates an item, rejecting an empty id or a blank description.
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Result<Self, ItemError> {
        let item = Self {
            id: id.into(),
            description: description.into(),
            title: None,
            updated_at: None,
            retrieval_score: None,
        };
        item.validate()?;
        Ok(item)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_updated_at(mut self, updated_at: impl Into<String>) -> Self {
        self.updated_at = Some(updated_at.into());
        self
    }

    /// Sets the retrieval score, clamped into `[0, 1]`.
    pub fn with_retrieval_score(mut self, score: f32) -> Self {
        self.retrieval_score = Some(if score.is_finite() {
            score.clamp(0.0, 1.0)
        } else {
            0.0
        });
        self
    }

    /// Re-checks the invariants; needed for items that arrived through serde.
    pub fn validate(&self) -> Result<(), ItemError> {
        if self.id.trim().is_empty() {
            return Err(ItemError::EmptyId);
        }
        if self.description.trim().is_empty() {
            return Err(ItemError::EmptyDescription {
                id: self.id.clone(),
            });
        }
        if let Some(value) = self.retrieval_score
            && !(0.0..=1.0).contains(&value)
        {
            return Err(ItemError::RetrievalScoreOutOfRange {
                id: self.id.clone(),
                value,
            });
        }
        Ok(())
    }

    pub fn title_or_unknown(&self) -> &str {
        non_blank(self.title.as_deref()).unwrap_or(UNKNOWN_FIELD)
    }

    pub fn updated_at_or_unknown(&self) -> &str {
        non_blank(self.updated_at.as_deref()).unwrap_or(UNKNOWN_FIELD)
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title_or_unknown(), self.id)?;
        if let Some(score) = self.retrieval_score {
            write!(f, " [retrieval {:.2}]", score)?;
        }
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
