//! Maps `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use hotel_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional structured details (e.g. `{"available": 0}`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Handler error: an [`AppError`] rendered as JSON.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<hotel_service::BookingError> for ApiError {
    fn from(err: hotel_service::BookingError) -> Self {
        Self(err.into())
    }
}

impl ApiError {
    /// Shorthand for a 400 response.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(AppError::bad_request(message))
    }
}

/// HTTP status and public error code for an error kind.
pub fn status_for(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::BadRequest => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        ErrorKind::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::ServiceUnavailable => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, code) = status_for(err.kind);

        let message = if status.is_server_error() && err.kind != ErrorKind::ServiceUnavailable {
            tracing::error!(kind = %err.kind, error = %err.message, "Request failed");
            "Something went wrong".to_string()
        } else {
            if err.kind == ErrorKind::ServiceUnavailable {
                tracing::warn!(error = %err.message, "Store temporarily unavailable");
            }
            err.message
        };

        let body = ApiErrorResponse {
            success: false,
            error: code.to_string(),
            message,
            details: err.details,
        };

        (status, Json(body)).into_response()
    }
}
