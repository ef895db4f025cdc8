//! Unified type system for the gateway
//!
//! The normalized request and response shapes that every provider adapter
//! translates to and from.

pub mod requests;
pub mod responses;

pub use requests::{
    ChatMessage, ChatRequest, ContentPart, ImageUrl, MessageContent, MessageRole, ResponseFormat,
    ResponseFormatType,
};
pub use responses::{ChatResponse, StreamFrame, Usage};
