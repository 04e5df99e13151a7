use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, ValidatedJson,
    errors::handlers::method_not_allowed,
    errors::responses::{
        BadRequestInvalidIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        MethodNotAllowedResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::TaskResult;
use crate::models::{Task, TaskRequest};
use crate::service::TaskService;

pub const TAG: &str = "tasks";

type SharedService = Arc<dyn TaskService>;

/// OpenAPI documentation for the Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(list_tasks, create_task, get_task, update_task, delete_task),
    components(
        schemas(Task, TaskRequest),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestInvalidIdResponse,
            MethodNotAllowedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Task management endpoints")
    )
)]
pub struct TasksApiDoc;

/// Create the task router with all HTTP endpoints
///
/// Methods other than the documented ones answer `405` with a JSON body.
pub fn router<S: TaskService + 'static>(service: S) -> Router {
    let shared_service: SharedService = Arc::new(service);

    Router::new()
        .route(
            "/tasks",
            get(list_tasks)
                .post(create_task)
                .fallback(method_not_allowed),
        )
        .route(
            "/tasks/{id}",
            get(get_task)
                .put(update_task)
                .delete(delete_task)
                .fallback(method_not_allowed),
        )
        .with_state(shared_service)
}

/// List all tasks
#[utoipa::path(
    get,
    path = "/tasks",
    tag = TAG,
    responses(
        (status = 200, description = "All tasks, ordered by ID", body = Vec<Task>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_tasks(State(service): State<SharedService>) -> TaskResult<Json<Vec<Task>>> {
    let tasks = service.list_all().await?;
    Ok(Json(tasks))
}

/// Create a new task
#[utoipa::path(
    post,
    path = "/tasks",
    tag = TAG,
    request_body = TaskRequest,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_task(
    State(service): State<SharedService>,
    ValidatedJson(request): ValidatedJson<TaskRequest>,
) -> TaskResult<impl IntoResponse> {
    let task = service.create(request).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/tasks/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 400, response = BadRequestInvalidIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_task(
    State(service): State<SharedService>,
    IdPath(id): IdPath,
) -> TaskResult<Json<Task>> {
    let task = service.get_by_id(id).await?;
    Ok(Json(task))
}

/// Replace a task's title, description and completion flag
#[utoipa::path(
    put,
    path = "/tasks/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    request_body = TaskRequest,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_task(
    State(service): State<SharedService>,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<TaskRequest>,
) -> TaskResult<Json<Task>> {
    let task = service.update(id, request).await?;
    Ok(Json(task))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 400, response = BadRequestInvalidIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_task(
    State(service): State<SharedService>,
    IdPath(id): IdPath,
) -> TaskResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
