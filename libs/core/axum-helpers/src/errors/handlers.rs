use axum::{http::StatusCode, response::Response};

use super::{ErrorCode, error_response};

/// Fallback for unknown routes.
pub async fn not_found() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "The requested resource was not found".to_string(),
        ErrorCode::NotFound,
    )
}

/// Method fallback for routes that exist but do not accept the request method.
///
/// ```ignore
/// Router::new().route("/tasks/{id}", get(get_task).fallback(method_not_allowed));
/// ```
pub async fn method_not_allowed() -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::MethodNotAllowed.default_message().to_string(),
        ErrorCode::MethodNotAllowed,
    )
}
