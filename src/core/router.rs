//! Provider routing
//!
//! Both the buffered and the streaming call paths must make an identical
//! routing decision from the same request, so the decision is a single pure
//! function over the request with no side effects.

use serde::{Deserialize, Serialize};

use crate::core::models::DEFAULT_MODEL;
use crate::core::types::ChatRequest;

/// The closed set of upstream providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    OpenRouter,
}

impl ProviderKind {
    /// Provider name as used in logs and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenRouter => "openrouter",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Select the provider for a request
///
/// An explicit `provider` field always wins. Otherwise the model identifier
/// (falling back to [`DEFAULT_MODEL`]) decides: a vendor-namespaced model
/// (`anthropic/...`, `openai/...`) routes to OpenRouter, everything else to
/// Gemini. The explicit field is the robust path; the prefix heuristic exists
/// for callers that only pass a model name.
pub fn route(request: &ChatRequest) -> ProviderKind {
    if let Some(provider) = request.provider {
        return provider;
    }

    let model = request.model.as_deref().unwrap_or(DEFAULT_MODEL);

    if model.contains("anthropic/") || model.contains("openai/") {
        ProviderKind::OpenRouter
    } else {
        ProviderKind::Gemini
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ChatMessage;

    fn request_for(model: &str) -> ChatRequest {
        ChatRequest::new(model, vec![ChatMessage::user("hi")])
    }

    #[test]
    fn test_gemini_model_routes_to_gemini() {
        let request = request_for("gemini-1.5-flash");
        assert_eq!(route(&request), ProviderKind::Gemini);
    }

    #[test]
    fn test_vendor_prefix_routes_to_openrouter() {
        let request = request_for("anthropic/claude-opus-4.5");
        assert_eq!(route(&request), ProviderKind::OpenRouter);

        let request = request_for("openai/gpt-5.2");
        assert_eq!(route(&request), ProviderKind::OpenRouter);
    }

    #[test]
    fn test_explicit_provider_overrides_model_prefix() {
        let mut request = request_for("anthropic/claude-opus-4.5");
        request.provider = Some(ProviderKind::Gemini);
        assert_eq!(route(&request), ProviderKind::Gemini);

        let mut request = request_for("gemini-1.5-flash");
        request.provider = Some(ProviderKind::OpenRouter);
        assert_eq!(route(&request), ProviderKind::OpenRouter);
    }

    #[test]
    fn test_missing_model_falls_back_to_default() {
        let mut request = request_for("unused");
        request.model = None;
        assert_eq!(route(&request), ProviderKind::Gemini);
    }

    #[test]
    fn test_routing_is_deterministic() {
        let request = request_for("openai/gpt-5.2-pro");
        let first = route(&request);
        let second = route(&request);
        assert_eq!(first, second);
    }
}
