//! Gemini adapter
//!
//! Translates the normalized request into the generative-language call shape
//! and back. Assistant messages map to the provider's "model" role and
//! everything else to "user"; the system instruction travels as a top-level
//! field, never as a `system`-role content entry.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use crate::core::models::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::core::providers::{ChatProvider, FragmentStream, ProviderError};
use crate::core::router::ProviderKind;
use crate::core::types::{
    ChatRequest, ChatResponse, ContentPart, MessageContent, MessageRole, Usage,
};

use super::config::GeminiConfig;
use super::streaming::fragment_stream;

/// Gemini provider adapter
#[derive(Debug, Clone)]
pub struct GeminiAdapter {
    config: GeminiConfig,
    client: Client,
}

impl GeminiAdapter {
    /// Create a new adapter from configuration
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        config
            .validate()
            .map_err(|e| ProviderError::configuration("gemini", e))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .default_headers(headers)
            .build()
            .map_err(|e| {
                ProviderError::network("gemini", format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Model to call for this request
    fn resolve_model(request: &ChatRequest) -> String {
        request
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    /// Transform the normalized request into the generate-content body
    pub(crate) fn transform_chat_request(
        &self,
        request: &ChatRequest,
    ) -> Result<Value, ProviderError> {
        let mut contents = Vec::with_capacity(request.messages.len());

        for message in &request.messages {
            let role = match message.role {
                MessageRole::Assistant => "model",
                _ => "user",
            };

            contents.push(json!({
                "role": role,
                "parts": Self::transform_message_content(&message.content)?,
            }));
        }

        let mut generation_config = json!({
            "maxOutputTokens": request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            "temperature": request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        });

        if let Some(top_p) = request.top_p {
            generation_config["topP"] = top_p.into();
        }

        if let Some(top_k) = request.top_k {
            generation_config["topK"] = top_k.into();
        }

        if request.wants_json() {
            generation_config["responseMimeType"] = "application/json".into();
        }

        let mut body = json!({
            "contents": contents,
            "generationConfig": generation_config,
        });

        if let Some(system) = &request.system_instruction {
            body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
        }

        let mut tools = request.tools.clone().unwrap_or_default();
        if request.enable_search != Some(false) {
            tools.push(json!({ "googleSearch": {} }));
        }
        if !tools.is_empty() {
            body["tools"] = json!(tools);
        }

        Ok(body)
    }

    /// Translate message content into Gemini parts
    fn transform_message_content(content: &MessageContent) -> Result<Vec<Value>, ProviderError> {
        let mut parts = Vec::new();

        match content {
            MessageContent::Text(text) => {
                parts.push(json!({ "text": text }));
            }
            MessageContent::Parts(content_parts) => {
                for part in content_parts {
                    match part {
                        ContentPart::Text { text } => {
                            parts.push(json!({ "text": text }));
                        }
                        ContentPart::ImageUrl { image_url } => {
                            let (mime_type, data) = Self::parse_data_url(&image_url.url)
                                .ok_or_else(|| {
                                    ProviderError::invalid_request(
                                        "gemini",
                                        "External image URLs not supported; convert to a base64 data URL",
                                    )
                                })?;
                            parts.push(json!({
                                "inlineData": { "mimeType": mime_type, "data": data }
                            }));
                        }
                    }
                }
            }
        }

        Ok(parts)
    }

    /// Parse a `data:` URL into (mime type, base64 payload)
    fn parse_data_url(url: &str) -> Option<(String, String)> {
        let rest = url.strip_prefix("data:")?;
        let (header, data) = rest.split_once(',')?;
        let mime_type = header.split(';').next().unwrap_or("application/octet-stream");
        Some((mime_type.to_string(), data.to_string()))
    }

    /// Transform the upstream JSON body into the normalized response
    pub(crate) fn transform_chat_response(
        &self,
        data: Value,
        model: &str,
    ) -> Result<ChatResponse, ProviderError> {
        if let Some(error) = data.get("error") {
            let status = error.get("code").and_then(|v| v.as_u64()).unwrap_or(500) as u16;
            let message = error
                .get("message")
                .and_then(|v| v.as_str())
                .unwrap_or("Unknown error");
            return Err(ProviderError::api_error("gemini", status, message));
        }

        let candidate = data.pointer("/candidates/0").ok_or_else(|| {
            ProviderError::response_parsing("gemini", "No candidates in response")
        })?;

        let empty = Vec::new();
        let parts = candidate
            .pointer("/content/parts")
            .and_then(|v| v.as_array())
            .unwrap_or(&empty);

        let mut content = String::new();
        let mut function_calls = Vec::new();

        for part in parts {
            if let Some(text) = part.get("text").and_then(|v| v.as_str()) {
                content.push_str(text);
            }
            if let Some(call) = part.get("functionCall") {
                function_calls.push(call.clone());
            }
        }

        let finish_reason = candidate
            .get("finishReason")
            .and_then(|v| v.as_str())
            .unwrap_or("STOP")
            .to_string();

        let usage_field = |name: &str| {
            data.pointer(&format!("/usageMetadata/{}", name))
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u32
        };

        Ok(ChatResponse {
            id: format!("unified-{}", Uuid::new_v4().simple()),
            provider: ProviderKind::Gemini,
            model: model.to_string(),
            content,
            usage: Usage {
                prompt_tokens: usage_field("promptTokenCount"),
                completion_tokens: usage_field("candidatesTokenCount"),
                total_tokens: usage_field("totalTokenCount"),
            },
            finish_reason,
            grounding_metadata: candidate.get("groundingMetadata").cloned(),
            function_calls: (!function_calls.is_empty()).then_some(function_calls),
        })
    }

    /// Issue one POST to the given operation endpoint
    async fn send_request(
        &self,
        model: &str,
        operation: &str,
        body: &Value,
    ) -> Result<reqwest::Response, ProviderError> {
        let url = self.config.get_endpoint(model, operation);

        debug!(provider = "gemini", %model, %operation, "Sending request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::network("gemini", format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::api_error(
                "gemini",
                status.as_u16(),
                error_text,
            ));
        }

        Ok(response)
    }
}

#[async_trait]
impl ChatProvider for GeminiAdapter {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        let model = Self::resolve_model(request);
        let body = self.transform_chat_request(request)?;

        let response = self.send_request(&model, "generateContent", &body).await?;
        let data: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::response_parsing("gemini", e.to_string()))?;

        self.transform_chat_response(data, &model)
    }

    async fn stream(&self, request: &ChatRequest) -> Result<FragmentStream, ProviderError> {
        let model = Self::resolve_model(request);
        let body = self.transform_chat_request(request)?;

        let response = self
            .send_request(&model, "streamGenerateContent", &body)
            .await?;

        Ok(fragment_stream(response.bytes_stream()))
    }
}
