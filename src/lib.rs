//! # RPP Gateway
//!
//! AI provider gateway for an Indonesian K-12 curriculum document generator.
//! One normalized chat request is routed to exactly one of two upstream LLM
//! providers - Gemini (Google generative-language REST API) or OpenRouter
//! (OpenAI-compatible chat completions) - and comes back as either a single
//! aggregated response or a live token stream re-framed as Server-Sent
//! Events.
//!
//! ## Library usage
//!
//! ```rust,no_run
//! use rpp_gateway::config::Config;
//! use rpp_gateway::core::types::{ChatMessage, ChatRequest};
//! use rpp_gateway::core::AiGateway;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let gateway = AiGateway::new(&config.providers);
//!
//!     let request = ChatRequest::new(
//!         "gemini-1.5-flash",
//!         vec![ChatMessage::user("Buatkan RPP Matematika kelas 10")],
//!     );
//!
//!     let response = gateway.chat(&request).await?;
//!     println!("{}", response.content);
//!     Ok(())
//! }
//! ```
//!
//! ## Gateway mode
//!
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() -> rpp_gateway::Result<()> {
//!     rpp_gateway::server::builder::run_server().await
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::gateway::AiGateway;
pub use core::router::{route, ProviderKind};
pub use core::types::{ChatMessage, ChatRequest, ChatResponse, StreamFrame, Usage};
pub use utils::error::{GatewayError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
        assert_eq!(NAME, "rpp-gateway");
    }
}
