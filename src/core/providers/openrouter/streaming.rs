//! OpenRouter streaming
//!
//! The upstream body is a chunked byte stream of newline-delimited SSE
//! records terminated by a `data: [DONE]` sentinel. Bytes are decoded
//! incrementally; each complete `data:` line yields at most one text
//! fragment. Unparseable payloads are discarded with a diagnostic so that
//! upstream keep-alives and malformed fragments never abort a healthy
//! stream, and a connection that closes without the sentinel counts as a
//! normal end.

use async_stream::stream;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use tracing::debug;

use crate::core::providers::sse::{data_payload, SseLineBuffer, DONE_MARKER};
use crate::core::providers::{FragmentStream, ProviderError};

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
                        "openrouter",
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
                            provider = "openrouter",
                            payload = %payload,
                            error = %e,
                            "Discarding unparseable SSE line"
                        );
                        continue;
                    }
                };

                if let Some(content) = parsed
                    .pointer("/choices/0/delta/content")
                    .and_then(|v| v.as_str())
                {
                    if !content.is_empty() {
                        yield Ok(content.to_string());
                    }
                }
            }
        }
        // Upstream closed without [DONE]; some upstreams omit the sentinel
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    async fn collect(chunks: Vec<&'static str>) -> Vec<Result<String, ProviderError>> {
        let byte_stream =
            stream::iter(chunks.into_iter().map(|c| Ok(Bytes::from_static(c.as_bytes()))));
        fragment_stream(byte_stream).collect().await
    }

    #[tokio::test]
    async fn test_record_split_across_chunks() {
        let fragments = collect(vec![
            "data: {\"choices\":[{\"delta\":{\"content\":\"Hel",
            "lo\"}}]}\n\ndata: [DONE]\n\n",
        ])
        .await;

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].as_ref().unwrap(), "Hello");
    }

    #[tokio::test]
    async fn test_fragments_arrive_in_order() {
        let fragments = collect(vec![
            "data: {\"choices\":[{\"delta\":{\"content\":\"satu\"}}]}\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\" dua\"}}]}\n\ndata: {\"choices\":[{\"delta\":{\"content\":\" tiga\"}}]}\n\n",
            "data: [DONE]\n\n",
        ])
        .await;

        let texts: Vec<_> = fragments.iter().map(|f| f.as_ref().unwrap().as_str()).collect();
        assert_eq!(texts, vec!["satu", " dua", " tiga"]);
    }

    #[tokio::test]
    async fn test_nothing_yielded_after_done() {
        let fragments = collect(vec![
            "data: {\"choices\":[{\"delta\":{\"content\":\"first\"}}]}\n\n",
            "data: [DONE]\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"late\"}}]}\n\n",
        ])
        .await;

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].as_ref().unwrap(), "first");
    }

    #[tokio::test]
    async fn test_malformed_lines_are_skipped() {
        let fragments = collect(vec![
            "data: {not json}\n\n",
            ": keep-alive\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\n\n",
            "data: [DONE]\n\n",
        ])
        .await;

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].as_ref().unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_empty_deltas_are_dropped() {
        let fragments = collect(vec![
            "data: {\"choices\":[{\"delta\":{\"content\":\"\"}}]}\n\n",
            "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"text\"}}]}\n\n",
            "data: [DONE]\n\n",
        ])
        .await;

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].as_ref().unwrap(), "text");
    }

    #[tokio::test]
    async fn test_eof_without_sentinel_is_normal_end() {
        let fragments = collect(vec![
            "data: {\"choices\":[{\"delta\":{\"content\":\"partial\"}}]}\n\n",
        ])
        .await;

        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].is_ok());
    }
}
