//! Response DTOs for the product service API
//!
//! Defines the structure of outgoing HTTP response bodies. A successful
//! product read is answered with [`crate::models::Product`] directly.

use serde::Serialize;

/// Response body for `POST /product-add`
#[derive(Debug, Clone, Serialize)]
pub struct ProductCreatedResponse {
    /// Identifier assigned by the store
    pub id: i64,
}

impl ProductCreatedResponse {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
