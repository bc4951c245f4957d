//! Incremental splitting of a `text/event-stream` body into `data:` payloads.

use serde_json::Value;

/// A decoded `data:` line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SseData {
    /// `data: [DONE]`
    Done,
    Json(Value),
}

/// Buffers raw body bytes until whole lines are available.
///
/// Network chunks may split a line (or a multi-byte character) anywhere, so
/// only bytes up to the last newline are decoded on each push.
#[derive(Debug, Default)]
pub(crate) struct SseLineBuffer {
    buffer: Vec<u8>,
}

impl SseLineBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends `bytes` and returns the payloads of every completed line.
    pub(crate) fn push(&mut self, bytes: &[u8]) -> Vec<SseData> {
        self.buffer.extend_from_slice(bytes);
        match self.buffer.iter().rposition(|&b| b == b'\n') {
            Some(last_newline) => {
                let complete: Vec<u8> = self.buffer.drain(..=last_newline).collect();
                parse_lines(&String::from_utf8_lossy(&complete))
            }
            None => Vec::new(),
        }
    }

    /// Decodes whatever is left once the body has ended.
    pub(crate) fn finish(&mut self) -> Vec<SseData> {
        let rest = std::mem::take(&mut self.buffer);
        parse_lines(&String::from_utf8_lossy(&rest))
    }
}

fn parse_lines(text: &str) -> Vec<SseData> {
    text.lines().filter_map(parse_data_line).collect()
}

/// Parses one line; comments, other fields and malformed JSON yield `None`.
pub(crate) fn parse_data_line(line: &str) -> Option<SseData> {
    let data = line.trim().strip_prefix("data:")?.trim_start();
    if data == "[DONE]" {
        return Some(SseData::Done);
    }
    serde_json::from_str(data).ok().map(SseData::Json)
}

/// `choices[0].delta.content` of a streamed chunk.
pub(crate) fn delta_content(json: &Value) -> Option<&str> {
    json["choices"][0]["delta"]["content"].as_str()
}
