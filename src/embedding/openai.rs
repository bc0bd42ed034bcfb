use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Embedder;
use super::config::EmbeddingConfig;
use super::error::EmbeddingError;

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Embedder backed by an OpenAI-compatible HTTP endpoint.
#[derive(Clone)]
pub struct OpenAiEmbedder {
    http: reqwest::Client,
    config: EmbeddingConfig,
    endpoint: String,
}

impl std::fmt::Debug for OpenAiEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiEmbedder")
            .field("config", &self.config)
            .finish()
    }
}

impl OpenAiEmbedder {
    pub fn new(config: EmbeddingConfig) -> Result<Self, EmbeddingError> {
        config
            .validate()
            .map_err(|reason| EmbeddingError::InvalidConfig { reason })?;

        let endpoint = config.endpoint();
        Ok(Self {
            http: reqwest::Client::new(),
            config,
            endpoint,
        })
    }

    pub fn config(&self) -> &EmbeddingConfig {
        &self.config
    }

    fn request_failed(&self, err: reqwest::Error) -> EmbeddingError {
        EmbeddingError::RequestFailed {
            url: self.endpoint.clone(),
            reason: err.to_string(),
        }
    }
}

impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }

        debug!(
            model = %self.config.model,
            text_len = text.len(),
            "Requesting embedding"
        );

        let mut request = self.http.post(&self.endpoint).json(&EmbeddingRequest {
            model: &self.config.model,
            input: text,
        });
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| self.request_failed(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: EmbeddingResponse =
            response
                .json()
                .await
                .map_err(|e| EmbeddingError::MalformedResponse {
                    reason: e.to_string(),
                })?;

        let vector = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| EmbeddingError::MalformedResponse {
                reason: "response contained no embeddings".to_string(),
            })?;

        if vector.len() != self.config.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.config.dimension,
                actual: vector.len(),
            });
        }

        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }
}
