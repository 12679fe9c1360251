//! Error type returned by HTTP handlers.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input, or an unsupported enumeration value.
    #[error("{0}")]
    Validation(String),
    /// A referenced row is absent, or an update/delete matched nothing.
    #[error("{0}")]
    NotFound(String),
    /// The target exists but is in the wrong state for the request.
    #[error("{0}")]
    Conflict(String),
    /// Storage or connectivity failure. Never shown to clients.
    #[error("Internal Server Error")]
    Internal(#[source] StoreError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ItemNotFound { .. }
            | StoreError::OrderNotFound(_)
            | StoreError::NoOpenOrder(_) => ApiError::NotFound(err.to_string()),
            StoreError::EmptyCart(_) => ApiError::Validation(err.to_string()),
            StoreError::InvalidTransition { .. } => ApiError::Conflict(err.to_string()),
            other => ApiError::Internal(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Validation(format!("invalid request body: {}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(source) => error!(error = %source, "request failed"),
            other => warn!(error = %other, status = %other.status_code(), "request rejected"),
        }
        let body = json!({ "error": self.to_string() });
        (self.status_code(), Json(body)).into_response()
    }
}
