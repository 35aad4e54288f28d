//! Error types for the link cache service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Link Error Enum ==
/// Unified error type for the cache, the durable store and the HTTP layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// Short code is absent from both the cache and the durable store
    #[error("Short link not found: {0}")]
    NotFound(String),

    /// Durable record exists but is past its expiry; it has been purged
    #[error("Short link has expired: {0}")]
    Expired(String),

    /// Short code is already taken
    #[error("Short code already exists: {0}")]
    Conflict(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Durable store failure (connection, transaction)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LinkError {
    /// Returns true for errors that should abort a request or a background pass.
    ///
    /// Lookup misses and conflicts are ordinary outcomes; only durable-store
    /// and internal failures are fatal.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LinkError::Storage(_) | LinkError::Internal(_))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for LinkError {
    fn into_response(self) -> Response {
        let status = match &self {
            LinkError::NotFound(_) | LinkError::Expired(_) => StatusCode::NOT_FOUND,
            LinkError::Conflict(_) => StatusCode::CONFLICT,
            LinkError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            LinkError::Storage(_) | LinkError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the link cache service.
pub type Result<T> = std::result::Result<T, LinkError>;
