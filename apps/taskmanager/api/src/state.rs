//! Application state shared by the route builders and the readiness check.

/// Cloned into each router that needs it; the connection is an `Arc`-backed pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
}
