//! Request-boundary errors.
//!
//! Handlers return `Result<_, ApiError>`; each variant maps straight to a
//! status code. Messages go back to the caller as `{"erro": "..."}`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A lookup or search missed. By-id lookups carry no message.
    #[error("not found")]
    NotFound(Option<String>),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found() -> Self {
        ApiError::NotFound(None)
    }

    pub fn not_found_with(message: impl Into<String>) -> Self {
        ApiError::NotFound(Some(message.into()))
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

// Unreadable bodies are client errors like any other failed precondition.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(None) => StatusCode::NOT_FOUND.into_response(),
            ApiError::NotFound(Some(m)) => {
                (StatusCode::NOT_FOUND, Json(json!({ "erro": m }))).into_response()
            }
            ApiError::BadRequest(m) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "erro": m }))).into_response()
            }
            ApiError::Internal(m) => {
                error!(message = %m, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "erro": m }))).into_response()
            }
        }
    }
}
