//! Incremental decoder for the backend's SSE stream format.
//!
//! A streaming endpoint answers with frames of the form
//!
//! ```text
//! event: step
//! data: {"tool":"web_search","summary":"3 resultaten"}
//!
//! event: done
//! data: {"response":"Klaar!"}
//! ```
//!
//! each terminated by a blank line. The decoder is fed raw bytes as they
//! come off the socket and hands back completed steps. Chunk boundaries
//! carry no meaning: a read may end mid-line or even inside a multi-byte
//! UTF-8 character, and the decoded sequence comes out the same.

use serde_json::Value;
use tracing::{debug, warn};

use sonja_core::ThinkingStep;

/// Everything a finished stream produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamOutcome {
    /// Final agent response. Empty when the stream ended without a usable
    /// `done` frame.
    pub response: String,
    /// All steps in arrival order, undecorated.
    pub steps: Vec<ThinkingStep>,
}

/// Incremental SSE decoder.
///
/// Bytes go in through [`SseDecoder::feed`]; `step` payloads come out as
/// soon as their frame completes. [`SseDecoder::finish`] flushes whatever is
/// still buffered and returns the [`StreamOutcome`]. Malformed frames are
/// dropped, never fatal.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buf: Vec<u8>,
    event: Option<String>,
    data: Option<String>,
    response: Option<String>,
    steps: Vec<ThinkingStep>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return the steps whose frames completed with it,
    /// in arrival order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<ThinkingStep> {
        self.buf.extend_from_slice(chunk);

        let mut completed = Vec::new();
        let mut consumed = 0;
        // Split on \n only. Multi-byte UTF-8 sequences never contain 0x0A,
        // so a character cut by the chunk boundary stays buffered until its
        // line is whole.
        while let Some(rel) = self.buf[consumed..].iter().position(|&b| b == b'\n') {
            let end = consumed + rel;
            let line = decode_line(&self.buf[consumed..end]);
            consumed = end + 1;
            if let Some(line) = line {
                if let Some(step) = self.handle_line(&line) {
                    completed.push(step);
                }
            }
        }
        if consumed > 0 {
            self.buf.drain(..consumed);
        }
        completed
    }

    /// Flush the residual buffer and return what the stream produced.
    ///
    /// A final frame that was cut off before its blank-line terminator still
    /// counts; steps recovered here appear in `steps` but were never
    /// returned by [`SseDecoder::feed`].
    pub fn finish(mut self) -> StreamOutcome {
        let rest = std::mem::take(&mut self.buf);
        if !rest.is_empty() {
            if let Some(line) = decode_line(&rest) {
                self.handle_line(&line);
            }
        }
        self.dispatch_frame();

        StreamOutcome {
            response: self.response.unwrap_or_default(),
            steps: self.steps,
        }
    }

    fn handle_line(&mut self, line: &str) -> Option<ThinkingStep> {
        if line.is_empty() {
            return self.dispatch_frame();
        }
        // field values are trimmed, so `event:step` and `event:  step`
        // frame the same as `event: step`
        if let Some(event) = line.strip_prefix("event:") {
            self.event = Some(event.trim().to_string());
        } else if let Some(data) = line.strip_prefix("data:") {
            self.data = Some(data.trim().to_string());
        }
        // anything else (comments, unknown fields) is ignored
        None
    }

    /// Consume the pending event/data pair. Called on a blank line and once
    /// more at end of stream.
    fn dispatch_frame(&mut self) -> Option<ThinkingStep> {
        let event = self.event.take();
        let data = self.data.take();
        match (event.as_deref(), data) {
            (Some("step"), Some(data)) => match serde_json::from_str::<ThinkingStep>(&data) {
                Ok(step) => {
                    self.steps.push(step.clone());
                    Some(step)
                }
                Err(e) => {
                    debug!(err = %e, "dropping malformed step frame");
                    None
                }
            },
            (Some("done"), Some(data)) => {
                match serde_json::from_str::<Value>(&data) {
                    Ok(value) => {
                        // the news endpoint labels its final payload `content`
                        let text = value
                            .get("response")
                            .or_else(|| value.get("content"))
                            .and_then(Value::as_str)
                            .unwrap_or_default();
                        self.response = Some(text.to_string());
                    }
                    Err(e) => {
                        debug!(err = %e, "dropping malformed done frame");
                    }
                }
                None
            }
            // unrecognized event kinds and data without an event line
            _ => None,
        }
    }
}

/// Strip the optional \r and require valid UTF-8. A line that fails
/// validation is dropped; the stream itself goes on.
fn decode_line(raw: &[u8]) -> Option<String> {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    match std::str::from_utf8(raw) {
        Ok(text) => Some(text.to_string()),
        Err(e) => {
            warn!(len = raw.len(), err = %e, "dropping non-UTF-8 line in stream");
            None
        }
    }
}
