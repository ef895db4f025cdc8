//! Gemini streaming
//!
//! With `alt=sse` the stream-generate endpoint emits SSE data lines, each
//! carrying a generate-content JSON chunk. Only the non-empty text delta of
//! a chunk is relayed; chunks carrying control or metadata payloads with no
//! text are dropped rather than forwarded as empty fragments. An error
//! payload aborts the stream.

use async_stream::stream;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use tracing::debug;

use crate::core::providers::sse::{data_payload, SseLineBuffer, DONE_MARKER};
use crate::core::providers::{FragmentStream, ProviderError};

/// Text delta carried by one generate-content chunk
fn chunk_text(chunk: &serde_json::Value) -> String {
    let mut text = String::new();

    if let Some(parts) = chunk
        .pointer("/candidates/0/content/parts")
        .and_then(|v| v.as_array())
    {
        for part in parts {
            if let Some(fragment) = part.get("text").and_then(|v| v.as_str()) {
                text.push_str(fragment);
            }
        }
    }

    text
}

/// Turn a raw chunked response body into a fragment sequence
pub(crate) fn fragment_stream<S>(bytes: S) -> FragmentStream
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
{
    Box::pin(stream! {
        futures::pin_mut!(bytes);
        let mut buffer = SseLineBuffer::new();

        while let Some(chunk) = bytes.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    yield Err(ProviderError::streaming(
                        "gemini",
                        format!("Stream read error: {}", e),
                    ));
                    return;
                }
            };

            for line in buffer.push(&chunk) {
                let Some(payload) = data_payload(&line) else {
                    continue;
                };

                if payload == DONE_MARKER {
                    return;
                }

                let parsed: serde_json::Value = match serde_json::from_str(payload) {
                    Ok(value) => value,
                    Err(e) => {
                        debug!(
                            provider = "gemini",
                            payload = %payload,
                            error = %e,
                            "Discarding unparseable SSE line"
                        );
                        continue;
                    }
                };

                if let Some(error) = parsed.get("error") {
                    let status = error.get("code").and_then(|v| v.as_u64()).unwrap_or(500) as u16;
                    let message = error
                        .get("message")
                        .and_then(|v| v.as_str())
                        .unwrap_or("Unknown error");
                    yield Err(ProviderError::api_error("gemini", status, message));
                    return;
                }

                let text = chunk_text(&parsed);
                if !text.is_empty() {
                    yield Ok(text);
                }
            }
        }
    })
}
