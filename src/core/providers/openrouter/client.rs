//! OpenRouter adapter
//!
//! Raw HTTPS transport against the OpenAI-compatible chat-completions
//! endpoint, with bearer auth and attribution headers. The buffered path
//! reads a single JSON body; the streaming path consumes a chunked SSE body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use crate::core::models::{DEFAULT_MAX_TOKENS, DEFAULT_OPENROUTER_MODEL, DEFAULT_TEMPERATURE};
use crate::core::providers::{ChatProvider, FragmentStream, ProviderError};
use crate::core::router::ProviderKind;
use crate::core::types::{ChatRequest, ChatResponse, MessageRole, Usage};

use super::config::OpenRouterConfig;
use super::streaming::fragment_stream;

/// OpenRouter provider adapter
#[derive(Debug, Clone)]
pub struct OpenRouterAdapter {
    config: OpenRouterConfig,
    client: Client,
}

impl OpenRouterAdapter {
    /// Create a new adapter from configuration
    pub fn new(config: OpenRouterConfig) -> Result<Self, ProviderError> {
        config
            .validate()
            .map_err(|e| ProviderError::configuration("openrouter", e))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key.trim())).map_err(|e| {
                ProviderError::configuration("openrouter", format!("Invalid API key: {}", e))
            })?,
        );
        headers.insert(
            "HTTP-Referer",
            HeaderValue::from_str(&config.site_url).map_err(|e| {
                ProviderError::configuration("openrouter", format!("Invalid site URL: {}", e))
            })?,
        );
        headers.insert(
            "X-Title",
            HeaderValue::from_str(&config.site_name).map_err(|e| {
                ProviderError::configuration("openrouter", format!("Invalid site name: {}", e))
            })?,
        );

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .default_headers(headers)
            .build()
            .map_err(|e| {
                ProviderError::network("openrouter", format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Transform the normalized request into the OpenAI-compatible body
    pub(crate) fn transform_chat_request(&self, request: &ChatRequest, stream: bool) -> Value {
        let model = request
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_OPENROUTER_MODEL.to_string());

        let mut messages: Vec<Value> = request
            .messages
            .iter()
            .map(|message| {
                let role = match message.role {
                    MessageRole::Assistant => "assistant",
                    MessageRole::System => "system",
                    MessageRole::User => "user",
                };
                json!({ "role": role, "content": message.content })
            })
            .collect();

        // The system message must lead the conversation
        if let Some(system) = &request.system_instruction {
            messages.insert(0, json!({ "role": "system", "content": system }));
        }

        let mut body = json!({
            "model": model,
            "messages": messages,
            "max_tokens": request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            "temperature": request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            "stream": stream,
        });

        if let Some(top_p) = request.top_p {
            body["top_p"] = top_p.into();
        }

        if let Some(top_k) = request.top_k {
            body["top_k"] = top_k.into();
        }

        if let Some(tools) = &request.tools {
            body["tools"] = json!(tools);
        }

        if let Some(response_format) = &request.response_format {
            body["response_format"] = json!(response_format);
        }

        body
    }

    /// Transform the upstream JSON body into the normalized response
    pub(crate) fn transform_chat_response(
        &self,
        data: Value,
        model: &str,
    ) -> Result<ChatResponse, ProviderError> {
        let choice = data
            .pointer("/choices/0")
            .ok_or_else(|| ProviderError::response_parsing("openrouter", "No choices in response"))?;

        let content = choice
            .pointer("/message/content")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        let finish_reason = choice
            .get("finish_reason")
            .and_then(|v| v.as_str())
            .unwrap_or("stop")
            .to_string();

        let function_calls = choice
            .pointer("/message/tool_calls")
            .and_then(|v| v.as_array())
            .map(|calls| calls.to_vec());

        let usage_field = |name: &str| {
            data.pointer(&format!("/usage/{}", name))
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u32
        };

        let id = data
            .get("id")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("unified-{}", Uuid::new_v4().simple()));

        Ok(ChatResponse {
            id,
            provider: ProviderKind::OpenRouter,
            model: model.to_string(),
            content,
            usage: Usage {
                prompt_tokens: usage_field("prompt_tokens"),
                completion_tokens: usage_field("completion_tokens"),
                total_tokens: usage_field("total_tokens"),
            },
            finish_reason,
            grounding_metadata: None,
            function_calls,
        })
    }

    /// Issue one POST to the chat-completions endpoint
    async fn send_request(&self, body: &Value) -> Result<reqwest::Response, ProviderError> {
        let url = self.config.completions_url();

        debug!(provider = "openrouter", %url, "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ProviderError::network("openrouter", format!("Connection failed: {}", e))
                } else {
                    ProviderError::network("openrouter", format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::api_error(
                "openrouter",
                status.as_u16(),
                error_text,
            ));
        }

        Ok(response)
    }
}

#[async_trait]
impl ChatProvider for OpenRouterAdapter {
    fn name(&self) -> &'static str {
        "openrouter"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        let body = self.transform_chat_request(request, false);
        let model = body["model"].as_str().unwrap_or_default().to_string();

        let response = self.send_request(&body).await?;
        let data: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::response_parsing("openrouter", e.to_string()))?;

        self.transform_chat_response(data, &model)
    }

    async fn stream(&self, request: &ChatRequest) -> Result<FragmentStream, ProviderError> {
        let body = self.transform_chat_request(request, true);

        let response = self.send_request(&body).await?;

        Ok(fragment_stream(response.bytes_stream()))
    }
}
