pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error response structure.
///
/// Returned for every error response:
/// - `code`: Integer error code for logging/monitoring (e.g., 1004)
/// - `error`: Machine-readable error identifier (e.g., "NOT_FOUND")
/// - `message`: Human-readable error message
/// - `details`: Optional additional error details (e.g., validation errors)
///
/// # JSON Example
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "Task not found",
///   "details": "Task with ID 42 does not exist"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details (e.g., validation field errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Invalid ID: {0}")]
    InvalidId(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// A specific resource is missing; renders `"{resource} not found"` with
    /// `details` carried through to the response body.
    #[error("{resource} not found: {details}")]
    ResourceNotFound {
        resource: &'static str,
        details: String,
    },

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details, code) = match self {
            AppError::JsonExtractorRejection(e) => {
                let code = match &e {
                    JsonRejection::JsonSyntaxError(_) => ErrorCode::InvalidJson,
                    _ => ErrorCode::JsonExtraction,
                };
                tracing::warn!(error_code = code.code(), "JSON extraction error: {:?}", e);
                // Every body decoding failure is a client error, including
                // type mismatches axum would otherwise report as 422.
                (StatusCode::BAD_REQUEST, e.body_text(), None, code)
            }
            AppError::ValidationError(e) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Validation error: {:?}",
                    e
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::ValidationError.default_message().to_string(),
                    Some(serde_json::to_value(&e).unwrap_or(serde_json::Value::Null)),
                    ErrorCode::ValidationError,
                )
            }
            AppError::InvalidId(msg) => {
                tracing::info!(error_code = ErrorCode::InvalidId.code(), "Invalid id: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::InvalidId.default_message().to_string(),
                    Some(serde_json::Value::String(msg)),
                    ErrorCode::InvalidId,
                )
            }
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = ErrorCode::BadRequest.code(), "Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg, None, ErrorCode::BadRequest)
            }
            AppError::ResourceNotFound { resource, details } => {
                tracing::info!(
                    error_code = ErrorCode::NotFound.code(),
                    resource,
                    "Not found: {}",
                    details
                );
                (
                    StatusCode::NOT_FOUND,
                    format!("{resource} not found"),
                    Some(serde_json::Value::String(details)),
                    ErrorCode::NotFound,
                )
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    msg,
                    None,
                    ErrorCode::InternalError,
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code.code(),
            error: code.as_str().to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Builds an error response from a status, message and code.
///
/// # Example
///
/// ```rust,ignore
/// use axum_helpers::errors::{error_response, ErrorCode};
/// use axum::http::StatusCode;
///
/// let response = error_response(
///     StatusCode::BAD_REQUEST,
///     "Invalid input".to_string(),
///     ErrorCode::ValidationError,
/// );
/// ```
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    let body = Json(ErrorResponse {
        code: error_code.code(),
        error: error_code.as_str().to_string(),
        message,
        details: None,
    });

    (status, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn render(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_resource_not_found_renders_details() {
        let (status, body) = render(AppError::ResourceNotFound {
            resource: "Task",
            details: "Task with ID 7 does not exist".to_string(),
        })
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 1004);
        assert_eq!(body["error"], "NOT_FOUND");
        assert_eq!(body["message"], "Task not found");
        assert_eq!(body["details"], "Task with ID 7 does not exist");
    }

    #[tokio::test]
    async fn test_bad_request_omits_details() {
        let (status, body) = render(AppError::BadRequest("title is required".into())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "BAD_REQUEST");
        assert_eq!(body["message"], "title is required");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_invalid_id_is_bad_request() {
        let (status, body) = render(AppError::InvalidId("abc".into())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "INVALID_ID");
        assert_eq!(body["details"], "abc");
    }

    #[tokio::test]
    async fn test_internal_server_error() {
        let (status, body) = render(AppError::InternalServerError("oops".into())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], 1005);
        assert_eq!(body["message"], "oops");
    }

    #[tokio::test]
    async fn test_error_response_helper() {
        let response = error_response(
            StatusCode::METHOD_NOT_ALLOWED,
            "nope".to_string(),
            ErrorCode::MethodNotAllowed,
        );
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
