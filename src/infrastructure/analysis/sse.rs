//! Streaming completion aggregation
//!
//! Reassembles an incrementally delivered completion from newline-delimited
//! server-sent-event-style frames. Transport chunks may split a logical line
//! (or a multi-byte character) at any byte boundary, so bytes are buffered
//! and only whole lines are decoded and processed.

use serde::Deserialize;

use crate::application::ports::AnalysisError;

/// Prefix marking a payload-bearing frame
const DATA_PREFIX: &str = "data: ";

/// Sentinel payload signalling end-of-stream; control, not content
const DONE_SENTINEL: &str = "[DONE]";

#[derive(Debug, Deserialize)]
struct StreamFrame {
    choices: Option<Vec<StreamChoice>>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: Option<StreamDelta>,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    content: Option<String>,
}

/// Reassembles one text completion from a chunked frame stream.
///
/// Frames are processed in arrival order. Malformed payloads on data lines
/// are skipped silently; the backend interleaves non-content control frames
/// with the deltas and a single bad frame must not abort the stream.
#[derive(Debug, Default)]
pub struct StreamAggregator {
    buffer: Vec<u8>,
    content: String,
}

impl StreamAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one transport chunk, processing every complete line it closes.
    /// An incomplete trailing line stays buffered for the next chunk.
    pub fn push_chunk(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);

        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line[..line.len() - 1]);
            self.process_line(&line);
        }
    }

    fn process_line(&mut self, line: &str) {
        let Some(data) = line.strip_prefix(DATA_PREFIX) else {
            return;
        };
        if data == DONE_SENTINEL {
            return;
        }

        // Non-JSON payloads are tolerated, not fatal
        let Ok(frame) = serde_json::from_str::<StreamFrame>(data) else {
            return;
        };

        let delta_content = frame
            .choices
            .and_then(|choices| choices.into_iter().next())
            .and_then(|choice| choice.delta)
            .and_then(|delta| delta.content);

        if let Some(content) = delta_content {
            self.content.push_str(&content);
        }
    }

    /// End-of-stream: hand back the accumulated completion.
    /// Nothing accumulated is a fatal no-content condition.
    pub fn finish(self) -> Result<String, AnalysisError> {
        if self.content.is_empty() {
            return Err(AnalysisError::EmptyResponse);
        }
        Ok(self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta_frame(content: &str) -> String {
        format!(
            "data: {{\"choices\":[{{\"delta\":{{\"content\":\"{}\"}}}}]}}\n",
            content
        )
    }

    fn full_stream() -> String {
        format!(
            "{}{}{}data: [DONE]\n",
            delta_frame("{\\\"a\\\":"),
            delta_frame(" 1,"),
            delta_frame(" \\\"b\\\": 2}")
        )
    }

    #[test]
    fn reassembles_single_chunk() {
        let mut aggregator = StreamAggregator::new();
        aggregator.push_chunk(full_stream().as_bytes());

        let text = aggregator.finish().unwrap();
        assert_eq!(text, "{\"a\": 1, \"b\": 2}");
    }

    #[test]
    fn reassembly_is_split_invariant() {
        let stream = full_stream();
        let whole = {
            let mut a = StreamAggregator::new();
            a.push_chunk(stream.as_bytes());
            a.finish().unwrap()
        };

        // Split the same stream at every byte boundary
        for split in 1..stream.len() {
            let mut a = StreamAggregator::new();
            a.push_chunk(&stream.as_bytes()[..split]);
            a.push_chunk(&stream.as_bytes()[split..]);
            assert_eq!(a.finish().unwrap(), whole, "split at {split}");
        }
    }

    #[test]
    fn reassembly_survives_one_byte_chunks() {
        let stream = full_stream();
        let mut aggregator = StreamAggregator::new();
        for byte in stream.as_bytes() {
            aggregator.push_chunk(&[*byte]);
        }
        assert_eq!(aggregator.finish().unwrap(), "{\"a\": 1, \"b\": 2}");
    }

    #[test]
    fn multibyte_characters_survive_splits() {
        let frame = delta_frame("émincé 🎧");
        let mut aggregator = StreamAggregator::new();
        for byte in frame.as_bytes() {
            aggregator.push_chunk(&[*byte]);
        }
        assert_eq!(aggregator.finish().unwrap(), "émincé 🎧");
    }

    #[test]
    fn done_sentinel_is_not_content() {
        let mut aggregator = StreamAggregator::new();
        aggregator.push_chunk(delta_frame("hello").as_bytes());
        aggregator.push_chunk(b"data: [DONE]\n");
        assert_eq!(aggregator.finish().unwrap(), "hello");
    }

    #[test]
    fn malformed_frames_are_skipped() {
        let mut aggregator = StreamAggregator::new();
        aggregator.push_chunk(b"data: not json at all\n");
        aggregator.push_chunk(delta_frame("kept").as_bytes());
        aggregator.push_chunk(b": keep-alive comment\n");
        assert_eq!(aggregator.finish().unwrap(), "kept");
    }

    #[test]
    fn frames_without_delta_content_are_ignored() {
        let mut aggregator = StreamAggregator::new();
        aggregator.push_chunk(b"data: {\"usage\":{\"total_tokens\":42}}\n");
        aggregator.push_chunk(delta_frame("text").as_bytes());
        assert_eq!(aggregator.finish().unwrap(), "text");
    }

    #[test]
    fn non_data_lines_are_ignored() {
        let mut aggregator = StreamAggregator::new();
        aggregator.push_chunk(b"event: message\n");
        aggregator.push_chunk(b"\n");
        aggregator.push_chunk(delta_frame("x").as_bytes());
        assert_eq!(aggregator.finish().unwrap(), "x");
    }

    #[test]
    fn empty_stream_is_no_content_error() {
        let aggregator = StreamAggregator::new();
        assert!(matches!(
            aggregator.finish().unwrap_err(),
            AnalysisError::EmptyResponse
        ));
    }

    #[test]
    fn only_done_is_no_content_error() {
        let mut aggregator = StreamAggregator::new();
        aggregator.push_chunk(b"data: [DONE]\n");
        assert!(matches!(
            aggregator.finish().unwrap_err(),
            AnalysisError::EmptyResponse
        ));
    }
}
