use std::sync::Arc;

use stepline_registry::StepRegistry;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The step registry, shared across request handlers.
    pub registry: Arc<StepRegistry>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
