//! Application state shared across HTTP handlers

use std::sync::Arc;

use crate::config::Config;
use crate::core::AiGateway;

/// HTTP server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// The AI gateway facade
    pub gateway: Arc<AiGateway>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, gateway: AiGateway) -> Self {
        Self {
            config: Arc::new(config),
            gateway: Arc::new(gateway),
        }
    }
}
