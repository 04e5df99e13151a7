use axum::{Router, middleware, routing::get};
use observability::{metrics_handler, metrics_middleware};

pub mod health;
pub mod tasks;

/// Creates the API routes, nested under the configured base path when one is set.
///
/// Returns a stateless Router (all sub-routers have state already applied).
pub fn routes(state: &crate::state::AppState) -> Router {
    let routes = Router::new()
        .merge(tasks::router(state))
        .layer(middleware::from_fn(metrics_middleware));

    match state.config.server.base_path.as_str() {
        "" => routes,
        base_path => Router::new().nest(base_path, routes),
    }
}

/// Creates a router with the /ready endpoint that performs actual health checks.
///
/// This router has state applied and can be merged with the stateless app router
/// from `create_router`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

/// Prometheus scrape endpoint, always served from the root.
pub fn metrics_router() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}
