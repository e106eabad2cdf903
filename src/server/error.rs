//! API error taxonomy.
//!
//! Three failure classes cross the HTTP boundary: bad client input,
//! unavailable upstream, and local store failures. Everything else is a
//! generic 500 with no internal detail leaked.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::store::DieselError;

/// Error returned by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or invalid request parameter.
    #[error("{0}")]
    Validation(&'static str),
    /// Upstream unavailable on a single-resource lookup.
    #[error("{0}")]
    NotFound(&'static str),
    /// Upstream unavailable on a search call.
    #[error("failed to fetch from GitHub API")]
    Upstream,
    /// Local store failure where the response itself is the stored data.
    #[error(transparent)]
    Persistence(#[from] DieselError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message.to_string()),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message.to_string()),
            ApiError::Upstream => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch from GitHub API".to_string(),
            ),
            ApiError::Persistence(e) => {
                tracing::error!("database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
