//! RPP Gateway - AI provider gateway service

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use rpp_gateway::server;

#[tokio::main]
async fn main() -> ExitCode {
    // Environment first so RUST_LOG and API keys from .env apply
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    match server::builder::run_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
