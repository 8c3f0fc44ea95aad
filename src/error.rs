//! Error types for the datastore
//!
//! Storage ports report failures through `StorageError`; the HTTP surface
//! reports through `ApiError`. Both use thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Storage Error Enum ==
/// Failure reported by a storage port.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The persistent backend is unreachable or broken.
    ///
    /// This is the only variant that trips the health gate.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// An entity with this key already exists
    #[error("Duplicate key: {0}")]
    Duplicate(String),

    /// No entity with this key exists
    #[error("Key not found: {0}")]
    NotFound(String),
}

impl StorageError {
    /// Returns true for the failure kind that disables the datastore.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StorageError::Unavailable(_))
    }
}

/// Result type returned by storage ports.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

// == API Error Enum ==
/// Error type for the HTTP surface.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Key not found in the datastore
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The datastore call did not complete
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
