use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::comparison::Comparator;
use crate::embedding::Embedder;
use crate::model::{Item, Judgment, RankedResult};
use crate::vectordb::VectorIndex;

use super::error::GatewayError;
use super::state::HandlerState;

/// Body of `/v1/match` and `/v1/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(default)]
    pub k: Option<usize>,
}

/// Body of `/v1/compare`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompareRequest {
    pub reference: String,
    pub candidate: String,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub results: Vec<RankedResult>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub items: Vec<Item>,
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub state: String,
}

fn parse_body<T: serde::de::DeserializeOwned>(body: serde_json::Value) -> Result<T, GatewayError> {
    serde_json::from_value(body)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))
}

#[instrument(skip(state, body), fields(k = tracing::field::Empty))]
pub async fn match_handler<E, V, C>(
    State(state): State<HandlerState<E, V, C>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<MatchResponse>, GatewayError>
where
    E: Embedder + 'static,
    V: VectorIndex + 'static,
    C: Comparator + 'static,
{
    let request: QueryRequest = parse_body(body)?;
    let k = request.k.unwrap_or(state.client.default_k());
    tracing::Span::current().record("k", k);

    let results = state.client.match_query(&request.query, Some(k)).await?;

    info!(results = results.len(), "Match request served");
    Ok(Json(MatchResponse { results }))
}

#[instrument(skip(state, body), fields(k = tracing::field::Empty))]
pub async fn search_handler<E, V, C>(
    State(state): State<HandlerState<E, V, C>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<SearchResponse>, GatewayError>
where
    E: Embedder + 'static,
    V: VectorIndex + 'static,
    C: Comparator + 'static,
{
    let request: QueryRequest = parse_body(body)?;
    let k = request.k.unwrap_or(state.client.default_k());
    tracing::Span::current().record("k", k);

    let items = state.client.search_items(&request.query, Some(k)).await?;

    debug!(items = items.len(), "Search request served");
    Ok(Json(SearchResponse { items }))
}

#[instrument(skip(state, body))]
pub async fn compare_handler<E, V, C>(
    State(state): State<HandlerState<E, V, C>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Judgment>, GatewayError>
where
    E: Embedder + 'static,
    V: VectorIndex + 'static,
    C: Comparator + 'static,
{
    let request: CompareRequest = parse_body(body)?;

    let judgment = state
        .client
        .compare(&request.reference, &request.candidate)
        .await?;

    debug!(score = judgment.score, "Compare request served");
    Ok(Json(judgment))
}

#[instrument(skip(state, body), fields(item_id = tracing::field::Empty))]
pub async fn index_handler<E, V, C>(
    State(state): State<HandlerState<E, V, C>>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<IndexResponse>), GatewayError>
where
    E: Embedder + 'static,
    V: VectorIndex + 'static,
    C: Comparator + 'static,
{
    let item: Item = parse_body(body)?;
    item.validate()
        .map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;
    tracing::Span::current().record("item_id", item.id.as_str());

    state.client.index_item(&item).await?;

    Ok((StatusCode::CREATED, Json(IndexResponse { id: item.id })))
}

pub async fn progress_handler<E, V, C>(
    State(state): State<HandlerState<E, V, C>>,
) -> Json<ProgressResponse>
where
    E: Embedder + 'static,
    V: VectorIndex + 'static,
    C: Comparator + 'static,
{
    Json(ProgressResponse {
        state: state.progress.current(),
    })
}
