//! Model catalog
//!
//! Static metadata for the models exposed through the gateway, used by the
//! models listing endpoint and for routing defaults.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::core::router::ProviderKind;

/// Default model when a request names none
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// Default model for requests explicitly routed to OpenRouter without one
pub const DEFAULT_OPENROUTER_MODEL: &str = "anthropic/claude-sonnet-4.5";

/// Default maximum output tokens
pub const DEFAULT_MAX_TOKENS: u32 = 65536;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Gemini models served by the gateway
pub const GEMINI_MODELS: &[&str] = &[
    "gemini-3-pro-preview",
    "gemini-3-flash-preview",
    "gemini-1.5-flash",
    "gemini-2.5-pro",
];

/// OpenRouter models served by the gateway
pub const OPENROUTER_MODELS: &[&str] = &[
    "anthropic/claude-opus-4.5",
    "anthropic/claude-sonnet-4.5",
    "openai/gpt-5.2",
    "openai/gpt-5.2-pro",
    "openai/gpt-5.2-chat",
];

/// Model metadata entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub id: String,
    pub provider: ProviderKind,
    pub name: String,
    pub description: String,
    pub max_tokens: u32,
    pub supports_search: bool,
    pub supports_vision: bool,
    pub recommended: bool,
}

fn gemini_description(model: &str) -> (&'static str, u32, bool) {
    match model {
        "gemini-3-pro-preview" => (
            "Flagship model - Terbaik untuk reasoning kompleks",
            65536,
            true,
        ),
        "gemini-3-flash-preview" => ("Fast model dengan thinking capability", 65536, false),
        "gemini-1.5-flash" => ("Efficient model untuk tugas umum", 8192, true),
        "gemini-2.5-pro" => ("Pro model dengan context window besar", 32768, false),
        _ => ("Gemini Model", 8192, false),
    }
}

fn openrouter_description(model: &str) -> (&'static str, u32, bool) {
    match model {
        "anthropic/claude-opus-4.5" => ("Claude Opus - Visual reasoning superior", 200000, true),
        "anthropic/claude-sonnet-4.5" => ("Claude Sonnet - 1M context window", 200000, false),
        "openai/gpt-5.2" => ("GPT-5.2 Flagship model", 128000, false),
        "openai/gpt-5.2-pro" => ("GPT-5.2 Pro - High throughput", 128000, false),
        "openai/gpt-5.2-chat" => ("GPT-5.2 Chat - Conversational", 128000, false),
        _ => ("OpenRouter Model", 8192, false),
    }
}

static CATALOG: Lazy<Vec<ModelInfo>> = Lazy::new(build_catalog);

/// Full catalog of available models with metadata
pub fn available_models() -> &'static [ModelInfo] {
    &CATALOG
}

fn build_catalog() -> Vec<ModelInfo> {
    let mut models = Vec::with_capacity(GEMINI_MODELS.len() + OPENROUTER_MODELS.len());

    for model in GEMINI_MODELS {
        let (description, max_tokens, recommended) = gemini_description(model);
        models.push(ModelInfo {
            id: model.to_string(),
            provider: ProviderKind::Gemini,
            name: model.to_string(),
            description: description.to_string(),
            max_tokens,
            supports_search: true,
            supports_vision: true,
            recommended,
        });
    }

    for model in OPENROUTER_MODELS {
        let (description, max_tokens, recommended) = openrouter_description(model);
        models.push(ModelInfo {
            id: model.to_string(),
            provider: ProviderKind::OpenRouter,
            name: model.to_string(),
            description: description.to_string(),
            max_tokens,
            supports_search: false,
            supports_vision: model.contains("claude") || model.contains("gpt-5"),
            recommended,
        });
    }

    models
}
