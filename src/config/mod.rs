//! Configuration management for the Gateway
//!
//! Configuration is read once at startup: an optional YAML file, then
//! environment overrides. A missing provider API key leaves that provider
//! unavailable instead of failing the process.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::utils::error::{GatewayError, Result};

/// Main configuration struct for the Gateway
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Upstream provider configuration
    pub providers: ProvidersConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            cors_enabled: true,
        }
    }
}

/// Upstream provider configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub gemini: GeminiSettings,
    pub openrouter: OpenRouterSettings,
}

/// Gemini provider settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    /// API key; absent means the provider is unavailable
    pub api_key: Option<String>,
    /// Base URL override
    pub base_url: Option<String>,
}

/// OpenRouter provider settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenRouterSettings {
    /// API key; absent means the provider is unavailable
    pub api_key: Option<String>,
    /// Base URL override
    pub base_url: Option<String>,
    /// Attribution site URL override
    pub site_url: Option<String>,
    /// Attribution site name override
    pub site_name: Option<String>,
}

impl Config {
    /// Load configuration from a YAML file, then apply environment overrides
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            GatewayError::config(format!("Failed to read config file: {}", e))
        })?;

        let mut config: Config = serde_yaml::from_str(&content)
            .map_err(|e| GatewayError::config(format!("Failed to parse config: {}", e)))?;

        config.apply_env();
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Config::default();
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Environment variables win over file values
    fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("GATEWAY_HOST") {
            self.server.host = host;
        }
        if let Some(port) = std::env::var("GATEWAY_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
        {
            self.server.port = port;
        }

        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.is_empty() {
                self.providers.gemini.api_key = Some(key);
            }
        }
        if let Ok(key) = std::env::var("OPENROUTER_API_KEY") {
            if !key.is_empty() {
                self.providers.openrouter.api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var("OPENROUTER_SITE_URL") {
            self.providers.openrouter.site_url = Some(url);
        }
        if let Ok(name) = std::env::var("OPENROUTER_SITE_NAME") {
            self.providers.openrouter.site_name = Some(name);
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(GatewayError::config("Server port must be non-zero"));
        }

        if self.server.host.is_empty() {
            return Err(GatewayError::config("Server host must not be empty"));
        }

        Ok(())
    }
}
