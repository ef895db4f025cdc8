//! Gemini Provider Configuration
//!
//! Google AI Studio endpoints; the API key travels as a query parameter.

use serde::{Deserialize, Serialize};

/// Gemini provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key (Google AI Studio)
    pub api_key: String,
    /// Base URL
    pub base_url: String,
    /// API version
    pub api_version: String,
    /// Connection timeout in seconds
    pub connect_timeout: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_version: "v1beta".to_string(),
            connect_timeout: 10,
        }
    }
}

impl GeminiConfig {
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

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.is_empty() {
            return Err("Gemini API key is required".to_string());
        }

        if !self.base_url.starts_with("http") {
            return Err("Gemini base URL must start with http:// or https://".to_string());
        }

        Ok(())
    }

    /// Endpoint URL for the given model and operation
    ///
    /// Streaming uses `alt=sse` so the body arrives as SSE data lines.
    pub fn get_endpoint(&self, model: &str, operation: &str) -> String {
        match operation {
            "streamGenerateContent" => format!(
                "{}/{}/models/{}:streamGenerateContent?alt=sse&key={}",
                self.base_url, self.api_version, model, self.api_key
            ),
            _ => format!(
                "{}/{}/models/{}:{}?key={}",
                self.base_url, self.api_version, model, operation, self.api_key
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeminiConfig::default();
        assert_eq!(config.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(config.api_version, "v1beta");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_generate_endpoint() {
        let config = GeminiConfig::new("test-key");
        let endpoint = config.get_endpoint("gemini-1.5-flash", "generateContent");
        assert_eq!(
            endpoint,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent?key=test-key"
        );
    }

    #[test]
    fn test_stream_endpoint_uses_sse() {
        let config = GeminiConfig::new("test-key");
        let endpoint = config.get_endpoint("gemini-1.5-flash", "streamGenerateContent");
        assert!(endpoint.contains(":streamGenerateContent?alt=sse&key=test-key"));
    }
}
