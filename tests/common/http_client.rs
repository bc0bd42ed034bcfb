//! HTTP client helpers for tests.

use horizon_match::model::{Item, Judgment, RankedResult};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, TestClientError> {
        if resp.status().is_success() {
            return Ok(resp.json().await?);
        }

        let status = resp.status().as_u16();
        match resp.json::<ErrorBody>().await {
            Ok(body) => Err(TestClientError::Api { status, body }),
            Err(e) => Err(TestClientError::RequestFailed(e)),
        }
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        let resp = self.client.get(self.url("/healthz")).send().await?;
        Self::decode(resp).await
    }

    pub async fn match_query(
        &self,
        query: &str,
        k: Option<usize>,
    ) -> Result<Vec<RankedResult>, TestClientError> {
        let resp = self
            .client
            .post(self.url("/v1/match"))
            .json(&json!({"query": query, "k": k}))
            .send()
            .await?;
        let body: MatchBody = Self::decode(resp).await?;
        Ok(body.results)
    }

    pub async fn compare(
        &self,
        reference: &str,
        candidate: &str,
    ) -> Result<Judgment, TestClientError> {
        let resp = self
            .client
            .post(self.url("/v1/compare"))
            .json(&json!({"reference": reference, "candidate": candidate}))
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub async fn search(&self, query: &str, k: Option<usize>) -> Result<Vec<Item>, TestClientError> {
        let resp = self
            .client
            .post(self.url("/v1/search"))
            .json(&json!({"query": query, "k": k}))
            .send()
            .await?;
        let body: SearchBody = Self::decode(resp).await?;
        Ok(body.items)
    }

    pub async fn index(&self, item: &Item) -> Result<String, TestClientError> {
        let resp = self
            .client
            .post(self.url("/v1/items"))
            .json(item)
            .send()
            .await?;
        let body: IndexBody = Self::decode(resp).await?;
        Ok(body.id)
    }

    pub async fn progress(&self) -> Result<String, TestClientError> {
        let resp = self.client.get(self.url("/v1/progress")).send().await?;
        let body: ProgressBody = Self::decode(resp).await?;
        Ok(body.state)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: String,
    pub code: u16,
}

#[derive(Deserialize)]
struct MatchBody {
    results: Vec<RankedResult>,
}

#[derive(Deserialize)]
struct SearchBody {
    items: Vec<Item>,
}

#[derive(Deserialize)]
struct IndexBody {
    id: String,
}

#[derive(Deserialize)]
struct ProgressBody {
    state: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error {status}: {body:?}")]
    Api { status: u16, body: ErrorBody },
}

impl TestClientError {
    pub fn kind(&self) -> Option<&str> {
        match self {
            TestClientError::Api { body, .. } => Some(&body.kind),
            TestClientError::RequestFailed(_) => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            TestClientError::Api { status, .. } => Some(*status),
            TestClientError::RequestFailed(_) => None,
        }
    }
}
