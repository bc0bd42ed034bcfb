//! HTTP gateway (Axum) for matching, comparison, search and indexing.
//!
//! This module is primarily used by the `horizon-match` server binary.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::{ErrorResponse, GatewayError};
pub use handler::{
    compare_handler, index_handler, match_handler, progress_handler, search_handler,
};
pub use state::HandlerState;

use crate::comparison::Comparator;
use crate::embedding::Embedder;
use crate::vectordb::VectorIndex;

/// Carries the error kind on every error response.
pub const HORIZON_ERROR_HEADER: &str = "x-horizon-error";

pub fn create_router_with_state<E, V, C>(state: HandlerState<E, V, C>) -> Router
where
    E: Embedder + 'static,
    V: VectorIndex + 'static,
    C: Comparator + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/v1/match", post(match_handler))
        .route("/v1/search", post(search_handler))
        .route("/v1/compare", post(compare_handler))
        .route("/v1/items", post(index_handler))
        .route("/v1/progress", get(progress_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
