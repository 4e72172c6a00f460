//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use karte_core::config::AppConfig;
use karte_service::LinkService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Link issuance/validation service.
    pub link_service: Arc<LinkService>,
}

impl AppState {
    /// Create the application state.
    pub fn new(config: Arc<AppConfig>, link_service: Arc<LinkService>) -> Self {
        Self {
            config,
            link_service,
        }
    }
}
