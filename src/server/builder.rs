//! Server startup with automatic configuration loading

use tracing::info;

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::Result;

/// Run the server with automatic configuration loading
///
/// Tries `config/gateway.yaml` first and falls back to environment-only
/// configuration when the file is absent.
pub async fn run_server() -> Result<()> {
    info!("Starting RPP AI Gateway");

    let config_path = "config/gateway.yaml";
    let config = match Config::from_file(config_path).await {
        Ok(config) => config,
        Err(e) => {
            info!(
                "Configuration file not loaded ({}), using environment variables",
                e
            );
            Config::from_env()?
        }
    };

    let server = HttpServer::new(&config).await?;

    info!(
        "Server starting at: http://{}:{}",
        config.server.host, config.server.port
    );
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   GET  /api/v1/ai/models - Model list");
    info!("   POST /api/v1/ai/chat - Unified chat");
    info!("   POST /api/v1/ai/chat/stream - Streaming chat (SSE)");

    server.start().await
}
