use axum::Router;
use domain_tasks::{PgTaskRepository, TaskServiceImpl, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgTaskRepository::new(state.db.clone());
    let service = TaskServiceImpl::new(repository);
    handlers::router(service)
}
