//! API error types and their HTTP mapping.
//!
//! ## Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Error → HTTP Status                              │
//! │                                                                     │
//! │  CoreError::CatalogItemNotFound ──────────► 404 {"error": msg}      │
//! │  CoreError::* (validation, business) ─────► 400 {"error": msg}      │
//! │  DbError::NotFound ───────────────────────► 404 {"error": msg}      │
//! │  DbError::* ──────────────────────────────► 500 "internal error"    │
//! │                                                                     │
//! │  Storage detail never leaks to the caller; the full error goes to   │
//! │  the operator log instead.                                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rejection carries the single FIRST rule violated, never an
//! aggregated list.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use encore_core::CoreError;
use encore_db::DbError;

/// Errors surfaced to HTTP callers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request violated a validation or business rule.
    #[error("{0}")]
    BadRequest(String),

    /// A referenced resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Storage or other internal failure. The message is logged, not sent.
    #[error("internal error")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CatalogItemNotFound(_) => ApiError::NotFound(err.to_string()),
            _ => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(detail) => {
                // Operators get the detail; callers get an opaque line
                error!(detail = %detail, "Internal error while serving request");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
