use axum_helpers::{
    cors_layer_from_origins, parse_allowed_origins,
    server::{create_production_app, create_router, health_router},
};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    observability::init_metrics()
        .map_err(|e| eyre::eyre!("Failed to install metrics recorder: {}", e))?;

    let db = connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    if config.run_migrations {
        run_migrations::<Migrator>(&db, config.app.name).await?;
    }

    let cors = match config.cors_allowed_origin.as_deref() {
        Some(origins) => Some(cors_layer_from_origins(parse_allowed_origins(origins)?)),
        None => None,
    };

    let state = AppState { config, db };

    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = create_router::<openapi::ApiDoc>(api_routes, cors).await?;

    // - /health: liveness check with app name/version
    // - /ready: readiness check against PostgreSQL
    // - /metrics: Prometheus exposition
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()))
        .merge(api::metrics_router());

    info!(
        base_path = %state.config.server.base_path,
        "Starting task manager API with graceful shutdown (30s timeout)"
    );

    let server_config = state.config.server.clone();
    let db = state.db;

    create_production_app(app, &server_config, Duration::from_secs(30), async move {
        info!("Shutting down: closing database connections");
        match db.close().await {
            Ok(_) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Task manager API shutdown complete");
    Ok(())
}
