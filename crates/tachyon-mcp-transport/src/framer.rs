//! Chunk-boundary-tolerant newline framing (§4.1). The framer owns an
//! explicit append-only buffer rather than delegating to a library's
//! internal line reader, so that partial lines split across arbitrary
//! read boundaries and single malformed lines are both handled
//! observably and without terminating the stream.

use tachyon_mcp_protocol::JsonRpcMessage;

/// One outcome of feeding a chunk into the framer: either a successfully
/// parsed message, or a parse error for a single line that does not
/// otherwise affect the stream (§4.1 "Failure").
#[derive(Debug)]
pub enum FrameEvent {
    Message(JsonRpcMessage),
    ParseError(String),
}

#[derive(Debug, Default)]
pub struct LineFramer {
    buffer: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Appends `chunk` to the buffer and extracts every complete line it
    /// now contains. Any trailing partial line (no `\n` yet) remains
    /// buffered verbatim for the next call.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<FrameEvent> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        let mut start = 0;
        while let Some(newline_offset) = self.buffer[start..].iter().position(|&b| b == b'\n') {
            let end = start + newline_offset;
            let line = &self.buffer[start..end];
            if let Some(event) = Self::parse_line(line) {
                events.push(event);
            }
            start = end + 1;
        }

        self.buffer.drain(0..start);
        events
    }

    fn parse_line(line: &[u8]) -> Option<FrameEvent> {
        let trimmed = trim_ascii_whitespace(line);
        if trimmed.is_empty() {
            return None;
        }
        match serde_json::from_slice::<JsonRpcMessage>(trimmed) {
            Ok(message) => Some(FrameEvent::Message(message)),
            Err(err) => Some(FrameEvent::ParseError(err.to_string())),
        }
    }
}

fn trim_ascii_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| !b.is_ascii_whitespace());
    let Some(start) = start else { return &[] };
    let end = bytes.iter().rposition(|b| !b.is_ascii_whitespace()).unwrap();
    &bytes[start..=end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_complete_line_yields_one_message() {
        let mut framer = LineFramer::new();
        let events = framer.feed(b"{\"jsonrpc\":\"2.0\",\"method\":\"initialized\"}\n");
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], FrameEvent::Message(_)));
    }

    #[test]
    fn message_split_across_three_chunks_yields_exactly_one_message() {
        let mut framer = LineFramer::new();
        let full = b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"tools/list\"}\n";
        let (a, rest) = full.split_at(5);
        let (b, c) = rest.split_at(rest.len() - 1);

        let mut events = framer.feed(a);
        assert!(events.is_empty());
        events = framer.feed(b);
        assert!(events.is_empty());
        events = framer.feed(c);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], FrameEvent::Message(_)));
    }

    #[test]
    fn empty_lines_are_silently_skipped() {
        let mut framer = LineFramer::new();
        let events = framer.feed(b"\n\n   \n");
        assert!(events.is_empty());
    }

    #[test]
    fn malformed_line_yields_parse_error_and_does_not_poison_later_lines() {
        let mut framer = LineFramer::new();
        let events = framer.feed(b"not json\n{\"jsonrpc\":\"2.0\",\"method\":\"initialized\"}\n");
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], FrameEvent::ParseError(_)));
        assert!(matches!(events[1], FrameEvent::Message(_)));
    }

    #[test]
    fn trailing_partial_line_stays_buffered() {
        let mut framer = LineFramer::new();
        let events = framer.feed(b"{\"jsonrpc\":\"2.0\",\"method\":\"initialized\"}\n{\"incomplete");
        assert_eq!(events.len(), 1);
        let events = framer.feed(b"\"}\n");
        assert_eq!(events.len(), 1);
    }
}
