//! Provider adapters
//!
//! One adapter per upstream, each behind the [`ChatProvider`] seam. Adapters
//! are constructed once at startup from configuration and shared by
//! reference; they hold no per-request state.

pub mod gemini;
pub mod openrouter;
pub mod sse;

pub use gemini::{GeminiAdapter, GeminiConfig};
pub use openrouter::{OpenRouterAdapter, OpenRouterConfig};

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::core::types::{ChatRequest, ChatResponse};

/// Async sequence of text fragments produced by a streaming call
///
/// Pull-based: dropping the stream drops the upstream HTTP response, so a
/// consumer that stops pulling terminates the upstream read loop.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, ProviderError>> + Send>>;

/// Unified provider error type - single error for all providers
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("Configuration error for {provider}: {message}")]
    Configuration {
        provider: &'static str,
        message: String,
    },

    #[error("Network error for {provider}: {message}")]
    Network {
        provider: &'static str,
        message: String,
    },

    /// Upstream rejection; the HTTP status and upstream body are preserved
    /// verbatim for diagnostics
    #[error("API error for {provider} (status {status}): {message}")]
    ApiError {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("Failed to parse {provider} response: {message}")]
    ResponseParsing {
        provider: &'static str,
        message: String,
    },

    #[error("Invalid request for {provider}: {message}")]
    InvalidRequest {
        provider: &'static str,
        message: String,
    },

    #[error("Streaming error for {provider}: {message}")]
    Streaming {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    /// Create a configuration error
    pub fn configuration(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Configuration {
            provider,
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Network {
            provider,
            message: message.into(),
        }
    }

    /// Create an API error preserving the upstream status and body
    pub fn api_error(provider: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            provider,
            status,
            message: message.into(),
        }
    }

    /// Create a response parsing error
    pub fn response_parsing(provider: &'static str, message: impl Into<String>) -> Self {
        Self::ResponseParsing {
            provider,
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(provider: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            provider,
            message: message.into(),
        }
    }

    /// Create a streaming error
    pub fn streaming(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Streaming {
            provider,
            message: message.into(),
        }
    }

    /// Provider the error originated from
    pub fn provider(&self) -> &'static str {
        match self {
            Self::Configuration { provider, .. }
            | Self::Network { provider, .. }
            | Self::ApiError { provider, .. }
            | Self::ResponseParsing { provider, .. }
            | Self::InvalidRequest { provider, .. }
            | Self::Streaming { provider, .. } => provider,
        }
    }

    /// HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ApiError { status, .. } => *status,
            Self::Configuration { .. } => 503,
            Self::InvalidRequest { .. } => 400,
            Self::Network { .. } => 502,
            Self::ResponseParsing { .. } | Self::Streaming { .. } => 500,
        }
    }
}

/// The seam every adapter implements
///
/// `complete` issues one buffered call; `stream` returns the adapter's
/// fragment sequence without buffering.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Provider name for logs and errors
    fn name(&self) -> &'static str;

    /// Buffered call: one request, one aggregated response
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError>;

    /// Streaming call: an async sequence of non-empty text fragments
    async fn stream(&self, request: &ChatRequest) -> Result<FragmentStream, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_preserves_status_and_body() {
        let err = ProviderError::api_error("openrouter", 429, "rate limited");
        let message = err.to_string();
        assert!(message.contains("429"));
        assert!(message.contains("rate limited"));
        assert_eq!(err.http_status(), 429);
    }

    #[test]
    fn test_error_provider_accessor() {
        let err = ProviderError::configuration("gemini", "missing key");
        assert_eq!(err.provider(), "gemini");
        assert_eq!(err.http_status(), 503);
    }
}
