use std::sync::Arc;

use thema_db::repositories::ThemaRepository;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (health checks).
    pub pool: thema_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Storage for Thema entities.
    pub themas: Arc<dyn ThemaRepository>,
}
