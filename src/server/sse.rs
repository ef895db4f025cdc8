//! Stream Relay
//!
//! Re-frames an adapter's fragment sequence as downstream SSE frames. Each
//! fragment becomes one `data:` line flushed immediately; exhaustion emits
//! the `[DONE]` sentinel and a fragment error emits a single error frame
//! followed by close. Every stream carries exactly one terminal frame.
//!
//! The relay is pull-based end to end: when the downstream connection drops
//! this stream, the fragment stream and its upstream HTTP response drop with
//! it, so no adapter keeps consuming upstream tokens for a gone client.

use actix_web::web::Bytes;
use async_stream::stream;
use futures::{Stream, StreamExt};
use serde_json::json;

use crate::core::providers::ProviderError;
use crate::core::types::StreamFrame;
use crate::utils::error::GatewayError;

/// Render one frame as an SSE record
pub fn frame_bytes(frame: &StreamFrame) -> Bytes {
    let payload = match frame {
        StreamFrame::Content(text) => json!({ "content": text }).to_string(),
        StreamFrame::Error(message) => json!({ "error": message }).to_string(),
        StreamFrame::Done => "[DONE]".to_string(),
    };

    Bytes::from(format!("data: {}\n\n", payload))
}

/// Relay a fragment sequence as SSE frames
pub fn relay_sse<S>(fragments: S) -> impl Stream<Item = Result<Bytes, GatewayError>>
where
    S: Stream<Item = Result<String, ProviderError>> + 'static,
{
    stream! {
        futures::pin_mut!(fragments);

        while let Some(fragment) = fragments.next().await {
            match fragment {
                Ok(text) => {
                    if text.is_empty() {
                        continue;
                    }
                    yield Ok(frame_bytes(&StreamFrame::Content(text)));
                }
                Err(e) => {
                    yield Ok(frame_bytes(&StreamFrame::Error(e.to_string())));
                    return;
                }
            }
        }

        yield Ok(frame_bytes(&StreamFrame::Done));
    }
}
