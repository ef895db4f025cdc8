//! Incremental SSE line buffering
//!
//! Upstream streaming bodies arrive as arbitrary byte chunks; a record line
//! may be split anywhere, including inside the `data: ` prefix or inside a
//! multi-byte character. The buffer accumulates raw bytes and releases only
//! complete lines, so a line is never processed before it is fully received
//! and never left unprocessed once it is.

/// Normal end-of-stream sentinel payload
pub const DONE_MARKER: &str = "[DONE]";

/// Rolling byte buffer that yields complete SSE lines
#[derive(Debug, Default)]
pub struct SseLineBuffer {
    buffer: Vec<u8>,
}

impl SseLineBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw chunk and drain every complete line
    ///
    /// The trailing fragment after the last newline stays buffered for the
    /// next chunk.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);

        let mut lines = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.buffer.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }

        lines
    }

    /// Whether an incomplete fragment is still buffered
    pub fn has_remainder(&self) -> bool {
        !self.buffer.is_empty()
    }
}

/// Extract the payload of a `data:` line
///
/// Returns `None` for blank lines, comment lines (leading `:`) and any other
/// SSE field.
pub fn data_payload(line: &str) -> Option<&str> {
    if line.is_empty() || line.starts_with(':') {
        return None;
    }

    let payload = line.strip_prefix("data:")?;
    Some(payload.strip_prefix(' ').unwrap_or(payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_lines_released_partial_retained() {
        let mut buffer = SseLineBuffer::new();

        let lines = buffer.push(b"data: one\ndata: tw");
        assert_eq!(lines, vec!["data: one"]);
        assert!(buffer.has_remainder());

        let lines = buffer.push(b"o\n");
        assert_eq!(lines, vec!["data: two"]);
        assert!(!buffer.has_remainder());
    }

    #[test]
    fn test_split_inside_data_prefix() {
        let mut buffer = SseLineBuffer::new();

        assert!(buffer.push(b"da").is_empty());
        assert!(buffer.push(b"ta: pay").is_empty());
        let lines = buffer.push(b"load\n\n");
        assert_eq!(lines, vec!["data: payload".to_string(), String::new()]);
    }

    #[test]
    fn test_chunking_is_irrelevant_to_parsed_lines() {
        let raw = b"data: {\"a\":1}\n\ndata: {\"b\":2}\n\ndata: [DONE]\n\n";

        let mut whole = SseLineBuffer::new();
        let all_at_once = whole.push(raw);

        for split in 1..raw.len() {
            let mut buffer = SseLineBuffer::new();
            let mut lines = buffer.push(&raw[..split]);
            lines.extend(buffer.push(&raw[split..]));
            assert_eq!(lines, all_at_once, "split at byte {}", split);
        }
    }

    #[test]
    fn test_crlf_line_endings() {
        let mut buffer = SseLineBuffer::new();
        let lines = buffer.push(b"data: hello\r\n\r\n");
        assert_eq!(lines, vec!["data: hello".to_string(), String::new()]);
    }

    #[test]
    fn test_multibyte_character_split_across_chunks() {
        let raw = "data: selamat pagi \u{1F44B}\n".as_bytes();
        // Split inside the 4-byte emoji
        let split = raw.len() - 3;

        let mut buffer = SseLineBuffer::new();
        assert!(buffer.push(&raw[..split]).is_empty());
        let lines = buffer.push(&raw[split..]);
        assert_eq!(lines, vec!["data: selamat pagi \u{1F44B}"]);
    }

    #[test]
    fn test_data_payload_extraction() {
        assert_eq!(data_payload("data: {\"x\":1}"), Some("{\"x\":1}"));
        assert_eq!(data_payload("data:[DONE]"), Some("[DONE]"));
        assert_eq!(data_payload(""), None);
        assert_eq!(data_payload(": keep-alive"), None);
        assert_eq!(data_payload("event: ping"), None);
    }
}
