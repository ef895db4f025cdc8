//! Normalized response model

use serde::{Deserialize, Serialize};

use crate::core::router::ProviderKind;

/// Normalized result of a buffered chat call
///
/// `content` is the in-order concatenation of every text fragment the
/// upstream produced; no fragment is dropped or duplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub id: String,
    pub provider: ProviderKind,
    pub model: String,
    pub content: String,
    pub usage: Usage,
    pub finish_reason: String,
    /// Search grounding metadata, Gemini only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding_metadata: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_calls: Option<Vec<serde_json::Value>>,
}

/// Token usage counters; missing upstream values are normalized to zero
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// One unit of the downstream streaming protocol
///
/// Every stream carries zero or more `Content` frames followed by exactly one
/// terminal frame (`Done` or `Error`); nothing follows the terminal frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFrame {
    /// One emitted text delta
    Content(String),
    /// Terminal error frame
    Error(String),
    /// Normal end-of-stream sentinel
    Done,
}
