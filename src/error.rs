//! Error types for the City Guide server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Stable error codes carried in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NoSuchEvent = 2,
    BadValue = 3,
    UpstreamFailure = 4,
}

/// Failure at the upstream API boundary.
///
/// Every listing read ends in one of these or a normalized page; nothing
/// past the fetcher sees reqwest or serde errors directly.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never completed (connect, timeout, reset)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success status returned by the upstream API
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Body was not JSON or matched no known envelope
    #[error("Parse error: {0}")]
    Parse(String),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Parse(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Http {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Parse(e.to_string())
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upstream error: {0}")]
    Upstream(#[from] FetchError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchEvent, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone()),
            AppError::Upstream(e) => {
                tracing::error!("Upstream error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorCode::UpstreamFailure,
                    "Upstream service unavailable".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
