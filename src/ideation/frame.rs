//! Line-level frame parsing for both streaming dialects.

use serde_json::Value;
use thiserror::Error;

/// Prefix of a hosted (SSE-style) data frame.
pub const DATA_PREFIX: &str = "data: ";

/// Line that ends a hosted stream.
pub const DONE_SENTINEL: &str = "data: [DONE]";

#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// The hosted end-of-stream marker.
    Sentinel,
    /// A JSON payload, either unwrapped from `data: ` or a raw NDJSON object.
    Json(Value),
}

#[derive(Debug, Error)]
#[error("invalid JSON line: {line}")]
pub struct MalformedLine {
    pub line: String,
    #[source]
    pub source: serde_json::Error,
}

/// Parses one complete, non-blank line.
///
/// The sentinel is recognised before any JSON parsing. Lines carrying the
/// `data: ` prefix are unwrapped, anything else is parsed as-is.
pub fn parse_line(line: &str) -> Result<Frame, MalformedLine> {
    let line = line.trim();
    if line == DONE_SENTINEL {
        return Ok(Frame::Sentinel);
    }

    let payload = line.strip_prefix(DATA_PREFIX).unwrap_or(line);

    serde_json::from_str(payload)
        .map(Frame::Json)
        .map_err(|source| MalformedLine {
            line: line.to_string(),
            source,
        })
}
