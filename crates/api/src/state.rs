use std::sync::Arc;

use crate::config::ServerConfig;
use crate::service::ThemeService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Theme service wired to the database and object storage.
    pub themes: Arc<ThemeService>,
}
