use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::warn;

use crate::comparison::ComparisonError;
use crate::pipeline::{ErrorKind, PipelineError};
use crate::retrieval::RetrievalError;

use super::HORIZON_ERROR_HEADER;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Comparison(#[from] ComparisonError),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
    pub code: u16,
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::InvalidRequest(_) => ErrorKind::InvalidArgument,
            GatewayError::Pipeline(e) => e.kind(),
            GatewayError::Retrieval(
                RetrievalError::EmptyQuery
                | RetrievalError::InvalidLimit { .. }
                | RetrievalError::InvalidItem(_),
            ) => ErrorKind::InvalidArgument,
            GatewayError::Retrieval(_) => ErrorKind::RetrievalFailure,
            GatewayError::Comparison(e) if e.is_invalid_input() => ErrorKind::InvalidInput,
            GatewayError::Comparison(_) => ErrorKind::ComparisonFailure,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::InvalidArgument | ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::RetrievalFailure | ErrorKind::ComparisonFailure => StatusCode::BAD_GATEWAY,
            ErrorKind::TimedOut => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind().as_str();

        if status.is_server_error() {
            warn!(kind, error = %self, "Request failed");
        }

        let mut headers = HeaderMap::new();
        headers.insert(HORIZON_ERROR_HEADER, HeaderValue::from_static(kind));

        let body = Json(ErrorResponse {
            error: self.to_string(),
            kind,
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
