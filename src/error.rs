//! Error types for the product service
//!
//! Every failure a handler can hit maps to exactly one HTTP status here, so a
//! request always ends with a status code and a JSON body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == Product Error Enum ==
/// Unified error type for the product service.
#[derive(Error, Debug)]
pub enum ProductError {
    /// No product row matches the identifier
    #[error("Product not found: {0}")]
    NotFound(i64),

    /// Missing or unparseable request fields
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Route exists but not for this HTTP method
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// Store unreachable or query failure
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Cache unreachable
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    /// Cached bytes could not be decoded into a product
    #[error("Corrupt cache entry {key}: {reason}")]
    CorruptCacheEntry { key: String, reason: String },
}

impl ProductError {
    /// Status code this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProductError::NotFound(_) => StatusCode::NOT_FOUND,
            ProductError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ProductError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ProductError::Persistence(_) | ProductError::CacheUnavailable(_) => {
                StatusCode::BAD_GATEWAY
            }
            ProductError::CorruptCacheEntry { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == Conversions ==
impl From<sqlx::Error> for ProductError {
    fn from(err: sqlx::Error) -> Self {
        ProductError::Persistence(err.to_string())
    }
}

impl From<deadpool_redis::PoolError> for ProductError {
    fn from(err: deadpool_redis::PoolError) -> Self {
        ProductError::CacheUnavailable(err.to_string())
    }
}

impl From<deadpool_redis::redis::RedisError> for ProductError {
    fn from(err: deadpool_redis::redis::RedisError) -> Self {
        ProductError::CacheUnavailable(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            ProductError::NotFound(_)
            | ProductError::MalformedRequest(_)
            | ProductError::MethodNotAllowed(_) => self.to_string(),
            // Upstream details stay in the logs
            ProductError::Persistence(_) => {
                error!(error = %self, "store failure");
                "Product store unavailable".to_string()
            }
            ProductError::CacheUnavailable(_) => {
                error!(error = %self, "cache failure");
                "Product cache unavailable".to_string()
            }
            ProductError::CorruptCacheEntry { .. } => {
                error!(error = %self, "corrupt cache entry");
                "Internal server error".to_string()
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the product service.
pub type Result<T> = std::result::Result<T, ProductError>;
