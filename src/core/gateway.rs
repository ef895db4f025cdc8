//! Gateway facade
//!
//! The single entry point for callers: route the request, dispatch to
//! exactly one adapter, and hand back either the aggregated response or the
//! adapter's fragment stream. Adapters are built once from configuration; a
//! provider whose API key is absent stays unavailable and requests routed to
//! it fail fast without a network call.

use tracing::{error, info, warn};

use crate::config::ProvidersConfig;
use crate::core::models::{available_models, ModelInfo};
use crate::core::providers::{
    ChatProvider, FragmentStream, GeminiAdapter, OpenRouterAdapter, ProviderError,
};
use crate::core::providers::{GeminiConfig, OpenRouterConfig};
use crate::core::router::{route, ProviderKind};
use crate::core::types::{ChatRequest, ChatResponse};

/// Unified AI gateway over the configured provider adapters
pub struct AiGateway {
    gemini: Option<GeminiAdapter>,
    openrouter: Option<OpenRouterAdapter>,
}

impl AiGateway {
    /// Build the gateway from provider settings
    pub fn new(providers: &ProvidersConfig) -> Self {
        let gemini = providers.gemini.api_key.as_ref().and_then(|api_key| {
            let mut config = GeminiConfig::new(api_key);
            if let Some(base_url) = &providers.gemini.base_url {
                config = config.with_base_url(base_url);
            }

            match GeminiAdapter::new(config) {
                Ok(adapter) => {
                    info!(provider = "gemini", "Provider initialized");
                    Some(adapter)
                }
                Err(e) => {
                    warn!(provider = "gemini", error = %e, "Failed to initialize provider");
                    None
                }
            }
        });

        let openrouter = providers.openrouter.api_key.as_ref().and_then(|api_key| {
            let mut config = OpenRouterConfig::new(api_key);
            if let Some(base_url) = &providers.openrouter.base_url {
                config = config.with_base_url(base_url);
            }
            if let Some(site_url) = &providers.openrouter.site_url {
                config = config.with_site_url(site_url);
            }
            if let Some(site_name) = &providers.openrouter.site_name {
                config = config.with_site_name(site_name);
            }

            match OpenRouterAdapter::new(config) {
                Ok(adapter) => {
                    info!(provider = "openrouter", "Provider initialized");
                    Some(adapter)
                }
                Err(e) => {
                    warn!(provider = "openrouter", error = %e, "Failed to initialize provider");
                    None
                }
            }
        });

        Self { gemini, openrouter }
    }

    /// Adapter for the routed provider, or a fail-fast configuration error
    fn adapter_for(&self, kind: ProviderKind) -> Result<&dyn ChatProvider, ProviderError> {
        match kind {
            ProviderKind::Gemini => self
                .gemini
                .as_ref()
                .map(|adapter| adapter as &dyn ChatProvider)
                .ok_or_else(|| {
                    ProviderError::configuration("gemini", "GEMINI_API_KEY is not configured")
                }),
            ProviderKind::OpenRouter => self
                .openrouter
                .as_ref()
                .map(|adapter| adapter as &dyn ChatProvider)
                .ok_or_else(|| {
                    ProviderError::configuration(
                        "openrouter",
                        "OPENROUTER_API_KEY is not configured",
                    )
                }),
        }
    }

    fn validate(request: &ChatRequest) -> Result<ProviderKind, ProviderError> {
        let provider = route(request);

        if request.messages.is_empty() {
            return Err(ProviderError::invalid_request(
                provider.as_str(),
                "messages cannot be empty",
            ));
        }

        Ok(provider)
    }

    /// Buffered chat: one request, one aggregated response
    ///
    /// Streaming requests are rejected here rather than silently buffered.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        let provider = Self::validate(request)?;

        if request.stream {
            return Err(ProviderError::invalid_request(
                provider.as_str(),
                "streaming requests must use the streaming endpoint /api/v1/ai/chat/stream",
            ));
        }

        let adapter = self.adapter_for(provider)?;

        adapter.complete(request).await.map_err(|e| {
            error!(
                provider = adapter.name(),
                model = request.model.as_deref().unwrap_or_default(),
                error = %e,
                "Chat completion failed"
            );
            e
        })
    }

    /// Streaming chat: the selected adapter's fragment sequence, unbuffered
    pub async fn chat_stream(&self, request: &ChatRequest) -> Result<FragmentStream, ProviderError> {
        let provider = Self::validate(request)?;
        let adapter = self.adapter_for(provider)?;

        adapter.stream(request).await.map_err(|e| {
            error!(
                provider = adapter.name(),
                model = request.model.as_deref().unwrap_or_default(),
                error = %e,
                "Chat stream failed"
            );
            e
        })
    }

    /// Model catalog with metadata
    pub fn available_models(&self) -> &'static [ModelInfo] {
        available_models()
    }
}
