//! Maps domain `AppError` to HTTP responses.
//!
//! `AppError` and `IntoResponse` both live in other crates, so the mapping
//! goes through the local `ApiError` wrapper. Handlers return `ApiResult`
//! and `?` converts transparently.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use portal_core::error::{AppError, ErrorKind};

/// Handler result type; any `AppError` converts into it with `?`.
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP-facing wrapper around the domain error.
#[derive(Debug)]
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code) = match &err.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ErrorKind::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::NotImplemented => (StatusCode::NOT_IMPLEMENTED, "NOT_IMPLEMENTED"),
            ErrorKind::ServiceUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            ErrorKind::Database | ErrorKind::Storage => {
                tracing::error!(kind = %err.kind, error = %err.message, "Backend error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
            ErrorKind::Internal | ErrorKind::Configuration | ErrorKind::Serialization => {
                tracing::error!(error = %err.message, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message: err.message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_to_status_mapping() {
        let cases = [
            (AppError::validation("bad input"), StatusCode::BAD_REQUEST),
            (AppError::unauthorized("no token"), StatusCode::UNAUTHORIZED),
            (AppError::forbidden("not yours"), StatusCode::FORBIDDEN),
            (AppError::not_found("missing"), StatusCode::NOT_FOUND),
            (AppError::conflict("duplicate"), StatusCode::CONFLICT),
            (AppError::storage("disk"), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::internal("bug"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_question_mark_converts_app_errors() {
        fn handler_like() -> ApiResult<()> {
            Err(AppError::not_found("client"))?;
            Ok(())
        }

        let response = handler_like().unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
