use core_config::{env_or_default, server::ServerConfig};
use utoipa::OpenApi;
use utoipa::openapi::server::Server;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Task Manager API",
        version = "0.1.0",
        description = "Create, read, update and delete tasks"
    )
)]
struct BaseApiDoc;

/// Full API document: shared components plus the task endpoints.
///
/// When `API_BASE_PATH` is set it is advertised as the server URL, since the
/// task paths themselves are documented relative to it.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = BaseApiDoc::openapi();
        doc.merge(domain_tasks::TasksApiDoc::openapi());

        let base_path = ServerConfig::default()
            .with_base_path(env_or_default("API_BASE_PATH", ""))
            .base_path;
        if !base_path.is_empty() {
            doc.servers = Some(vec![Server::new(base_path)]);
        }

        doc
    }
}
