//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::DomainError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    /// Query string that does not deserialize into the handler's parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = match &self {
            // 400 Bad Request
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_parameter", Some(msg.clone()))
            }

            // Domain errors - map to appropriate HTTP status
            AppError::Domain(domain_err) => match domain_err {
                DomainError::InvalidRange { start, end } => (
                    StatusCode::BAD_REQUEST,
                    "invalid_range",
                    Some(format!("start {} is after end {}", start, end)),
                ),
                DomainError::InvalidParameter { name, reason } => (
                    StatusCode::BAD_REQUEST,
                    "invalid_parameter",
                    Some(format!("{}: {}", name, reason)),
                ),
                DomainError::Money(e) => {
                    (StatusCode::BAD_REQUEST, "invalid_money", Some(e.to_string()))
                }
                DomainError::DegenerateStatistics(msg) => {
                    tracing::warn!("Forecast rejected: {}", msg);
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "insufficient_history",
                        Some(msg.clone()),
                    )
                }
            },
        };

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
