//! API error handling
//!
//! Consistent JSON error responses across all endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

/// Structured JSON error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<u64>,
}

/// API error type that converts to JSON responses
#[derive(Debug)]
pub enum ApiError {
    /// GitHub rejected the token
    Unauthorized,
    /// GitHub API rate limited
    RateLimited(u64),
    /// GitHub API error
    GitHub(String),
    /// Internal server error
    Internal(String),
}

impl From<common::Error> for ApiError {
    fn from(e: common::Error) -> Self {
        match e {
            common::Error::Unauthorized => ApiError::Unauthorized,
            common::Error::RateLimited { retry_after } => ApiError::RateLimited(retry_after),
            common::Error::GitHub(msg) => ApiError::GitHub(msg),
            common::Error::Config(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, response) = match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse {
                    error: "GitHub rejected the token".to_string(),
                    code: Some("unauthorized".to_string()),
                    retry_after_secs: None,
                },
            ),
            ApiError::RateLimited(retry_after) => (
                StatusCode::TOO_MANY_REQUESTS,
                ErrorResponse {
                    error: "Rate limited by GitHub API".to_string(),
                    code: Some("rate_limited".to_string()),
                    retry_after_secs: Some(retry_after),
                },
            ),
            ApiError::GitHub(msg) => {
                error!("GitHub API error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: format!("GitHub API error: {}", msg),
                        code: Some("github_error".to_string()),
                        retry_after_secs: None,
                    },
                )
            }
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal server error".to_string(),
                        code: Some("internal_error".to_string()),
                        retry_after_secs: None,
                    },
                )
            }
        };

        (status, Json(response)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
