use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::{ScoredPoint, Value};
use std::collections::HashMap;

use super::VectorDbError;
use super::payload_keys;
use crate::hashing::point_id_for_item;
use crate::model::Item;

/// A point ready to be written to the index.
#[derive(Debug, Clone)]
pub struct IndexPoint {
    pub id: u64,
    pub vector: Vec<f32>,
    pub item_id: String,
    pub title: Option<String>,
    pub description: String,
    pub updated_at: Option<String>,
}

impl IndexPoint {
    /// Builds the point for `item`, keyed by a digest of its id.
    pub fn from_item(item: &Item, vector: Vec<f32>) -> Self {
        Self {
            id: point_id_for_item(&item.id),
            vector,
            item_id: item.id.clone(),
            title: item.title.clone(),
            description: item.description.clone(),
            updated_at: item.updated_at.clone(),
        }
    }

    pub fn with_updated_at(mut self, updated_at: impl Into<String>) -> Self {
        self.updated_at = Some(updated_at.into());
        self
    }

    pub fn payload(&self) -> HashMap<String, Value> {
        let mut payload: HashMap<String, Value> = HashMap::new();
        payload.insert(payload_keys::ITEM_ID.to_string(), self.item_id.clone().into());
        payload.insert(
            payload_keys::DESCRIPTION.to_string(),
            self.description.clone().into(),
        );
        if let Some(title) = &self.title {
            payload.insert(payload_keys::TITLE.to_string(), title.clone().into());
        }
        if let Some(updated_at) = &self.updated_at {
            payload.insert(
                payload_keys::UPDATED_AT.to_string(),
                updated_at.clone().into(),
            );
        }
        payload
    }
}

/// One search hit, decoded from a Qdrant payload.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexHit {
    pub item_id: String,
    pub title: Option<String>,
    pub description: String,
    pub updated_at: Option<String>,
    pub score: f32,
}

impl IndexHit {
    /// Decodes a scored point. Missing `item_id` or `description` is an error,
    /// not a default.
    pub fn from_scored_point(point: ScoredPoint) -> Result<Self, VectorDbError> {
        let point_label = match point.id.and_then(|pid| pid.point_id_options) {
            Some(PointIdOptions::Num(n)) => n.to_string(),
            Some(PointIdOptions::Uuid(u)) => u,
            None => "<unknown>".to_string(),
        };

        Self::from_payload(&point_label, &point.payload, point.score)
    }

    pub fn from_payload(
        point_label: &str,
        payload: &HashMap<String, Value>,
        score: f32,
    ) -> Result<Self, VectorDbError> {
        let text = |key: &str| {
            payload
                .get(key)
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        };

        let item_id = text(payload_keys::ITEM_ID)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| VectorDbError::MalformedPayload {
                point: point_label.to_string(),
                reason: format!("missing '{}'", payload_keys::ITEM_ID),
            })?;

        let description = text(payload_keys::DESCRIPTION)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| VectorDbError::MalformedPayload {
                point: point_label.to_string(),
                reason: format!("missing '{}'", payload_keys::DESCRIPTION),
            })?;

        Ok(Self {
            item_id,
            title: text(payload_keys::TITLE).filter(|s| !s.is_empty()),
            description,
            updated_at: text(payload_keys::UPDATED_AT).filter(|s| !s.is_empty()),
            score,
        })
    }

    /// Converts the hit into an [`Item`], keeping the index score as the
    /// retrieval score.
    pub fn into_item(self) -> Item {
        Item {
            id: self.item_id,
            description: self.description,
            title: self.title,
            updated_at: self.updated_at,
            retrieval_score: None,
        }
        .with_retrieval_score(self.score)
    }
}
