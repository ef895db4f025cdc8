//! OpenRouter Provider Configuration

use serde::{Deserialize, Serialize};

/// OpenRouter provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenRouterConfig {
    /// API key for OpenRouter
    pub api_key: String,
    /// Base URL for the OpenRouter API
    pub base_url: String,
    /// Attribution site URL, sent as `HTTP-Referer`
    pub site_url: String,
    /// Attribution site name, sent as `X-Title`
    pub site_name: String,
    /// Connection timeout in seconds; no overall request deadline is set so
    /// long generations and streams inherit the transport's behavior
    pub connect_timeout: u64,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://openrouter.ai/api/v1".to_string(),
            site_url: "http://localhost:3001".to_string(),
            site_name: "RPP Generator".to_string(),
            connect_timeout: 10,
        }
    }
}

impl OpenRouterConfig {
    /// Create a configuration with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Set base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set attribution site URL
    pub fn with_site_url(mut self, site_url: impl Into<String>) -> Self {
        self.site_url = site_url.into();
        self
    }

    /// Set attribution site name
    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = site_name.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.is_empty() {
            return Err("OpenRouter API key is required".to_string());
        }

        if !self.base_url.starts_with("http") {
            return Err("OpenRouter base URL must start with http:// or https://".to_string());
        }

        Ok(())
    }

    /// Chat completions endpoint URL
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}
