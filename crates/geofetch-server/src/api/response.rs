//! API response types
//!
//! Every response carries a single `message`, `error`, or `status` key. The
//! texts are fixed so client-visible output never leaks credentials or
//! internal paths.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

// ============================================================================
// Client-visible message texts
// ============================================================================

pub const MSG_NO_DATA: &str = "No data found for the specified query.";
pub const MSG_CANCELLED: &str = "Operation cancelled by the user.";
pub const MSG_SUCCESS: &str = "All data fetched and saved successfully.";
pub const MSG_HEALTH: &str = "API is running.";

pub const ERR_ORGANISM_REQUIRED: &str = "Organism field is required.";
pub const ERR_UPSTREAM: &str = "Failed to fetch data from NCBI.";
pub const ERR_TRANSFER: &str = "Failed to connect to FTP server.";
pub const ERR_UNEXPECTED: &str = "An unexpected error occurred.";

/// Success / informational response body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for MessageResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Health check response body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub fn running() -> Self {
        Self { status: MSG_HEALTH }
    }
}
