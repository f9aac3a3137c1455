//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use clubhub_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Human-readable message.
    pub error: String,
    /// Machine-readable error code.
    pub kind: String,
}

/// An `AppError` on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// HTTP status for an error kind.
    pub fn status(kind: ErrorKind) -> StatusCode {
        match kind {
            ErrorKind::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            ErrorKind::InvalidCredentials | ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::InsufficientRole | ErrorKind::NotOwner | ErrorKind::ResourceLocked => {
                StatusCode::FORBIDDEN
            }
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict | ErrorKind::TokenAlreadyUsed => StatusCode::CONFLICT,
            ErrorKind::TokenExpired => StatusCode::GONE,
            ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Serialization
            | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = Self::status(err.kind);

        if status.is_server_error() {
            tracing::error!(kind = %err.kind, error = %err.message, source = ?err.source, "Request failed");
        } else if err.is_denial() {
            tracing::debug!(kind = %err.kind, error = %err.message, "Request denied");
        }

        let body = ApiErrorResponse {
            success: false,
            error: err.message,
            kind: err.kind.code().to_string(),
        };

        (status, Json(body)).into_response()
    }
}
