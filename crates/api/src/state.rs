use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`). The pool is the one storage handle in the process: opened in
/// `main`, injected here, closed when the process exits.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: herbanet_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
}
