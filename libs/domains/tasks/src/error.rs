use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found: {0}")]
    NotFound(i64),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

/// Convert TaskError to AppError for standardized error responses
impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(id) => AppError::ResourceNotFound {
                resource: "Task",
                details: format!("Task with ID {} does not exist", id),
            },
            TaskError::Validation(errors) => AppError::ValidationError(errors),
            TaskError::Storage(msg) => {
                // Driver text stays in the logs.
                tracing::error!(error = %msg, "Task storage failure");
                AppError::InternalServerError("Failed to access task storage".to_string())
            }
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<sea_orm::DbErr> for TaskError {
    fn from(err: sea_orm::DbErr) -> Self {
        TaskError::Storage(err.to_string())
    }
}
