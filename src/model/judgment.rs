use serde::{Deserialize, Serialize};

use super::error::JudgmentError;
use crate::constants::SCORE_TOLERANCE;

/// Structured result of comparing a query against one candidate text.
///
/// `score` and `confidence` live on the `[0, 1]` scale (1 = identical / fully
/// confident). They are independent axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Judgment {
    pub summary: String,
    pub similarity: String,
    pub difference: String,
    pub score: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    pub rationale: String,
}

impl Judgment {
    /// Builds a judgment after range-checking `score` and `confidence`.
    ///
    /// Values within [`SCORE_TOLERANCE`] of the range are clamped into it.
    pub fn new(
        summary: impl Into<String>,
        similarity: impl Into<String>,
        difference: impl Into<String>,
        score: f32,
        confidence: Option<f32>,
        rationale: impl Into<String>,
    ) -> Result<Self, JudgmentError> {
        let score = normalize_unit("score", score)?;
        let confidence = confidence
            .map(|c| normalize_unit("confidence", c))
            .transpose()?;

        Ok(Self {
            summary: summary.into(),
            similarity: similarity.into(),
            difference: difference.into(),
            score,
            confidence,
            rationale: rationale.into(),
        })
    }

    /// Score-only judgment with empty narratives.
    pub fn with_score(score: f32) -> Result<Self, JudgmentError> {
        Self::new("", "", "", score, None, "")
    }

    pub fn has_confidence(&self) -> bool {
        self.confidence.is_some()
    }
}

impl std::fmt::Display for Judgment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "score {:.2}", self.score)?;
        if let Some(confidence) = self.confidence {
            write!(f, ", confidence {:.2}", confidence)?;
        }
        Ok(())
    }
}

pub(crate) fn normalize_unit(field: &'static str, value: f32) -> Result<f32, JudgmentError> {
    if !value.is_finite() {
        return Err(JudgmentError::NotFinite { field });
    }
    if value < -SCORE_TOLERANCE || value > 1.0 + SCORE_TOLERANCE {
        return Err(JudgmentError::OutOfRange { field, value });
    }
    Ok(value.clamp(0.0, 1.0))
}
