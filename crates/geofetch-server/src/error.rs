//! Server-specific error types
//!
//! One `AppError` covers the whole request pipeline. Client-visible messages
//! are deliberately generic; the underlying cause is logged server-side when
//! the error is converted into a response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::response::{ErrorResponse, MessageResponse, ERR_TRANSFER, ERR_UNEXPECTED, ERR_UPSTREAM, MSG_NO_DATA};

/// Result type alias for server operations
pub type ServerResult<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No records matched the query")]
    NoRecords,

    #[error("NCBI request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("File transfer failed: {0}")]
    Transfer(#[from] crate::ftp::TransferError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(message)),
            )
                .into_response(),
            AppError::NoRecords => (
                StatusCode::NOT_FOUND,
                Json(MessageResponse::new(MSG_NO_DATA)),
            )
                .into_response(),
            AppError::Upstream(ref e) => {
                tracing::error!("Error fetching data from NCBI: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(ERR_UPSTREAM)),
                )
                    .into_response()
            },
            AppError::Transfer(ref e) => {
                tracing::error!("Error connecting to FTP: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(ERR_TRANSFER)),
                )
                    .into_response()
            },
            AppError::Io(ref e) => {
                tracing::error!("Unexpected IO error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(ERR_UNEXPECTED)),
                )
                    .into_response()
            },
            AppError::Internal(ref message) => {
                tracing::error!("Unexpected error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(ERR_UNEXPECTED)),
                )
                    .into_response()
            },
        }
    }
}
