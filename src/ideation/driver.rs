//! Drives a response byte stream through line reassembly, parsing and classification.

use bytes::Bytes;
use futures_util::{Stream, StreamExt};

use super::classifier::{ParsedEvent, classify};
use super::error::IdeationError;
use super::frame::{Frame, parse_line};
use super::line_buffer::LineBuffer;
use super::provider::ProviderKind;

/// An incremental piece of model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    Content(String),
    Thinking(String),
}

/// Receives stream output as it is decoded.
///
/// Callbacks run inline on the stream-consumption path and should return quickly.
pub trait StreamSink {
    fn on_content(&mut self, delta: &str);
    fn on_thinking(&mut self, delta: &str);
    fn on_done(&mut self);
}

/// Caller-owned accumulation of content and thinking fragments.
#[derive(Debug, Default)]
pub struct Accumulator {
    pub content: Vec<String>,
    pub thinking: Vec<String>,
    pub done: usize,
}

impl Accumulator {
    pub fn content_text(&self) -> String {
        self.content.concat()
    }

    pub fn thinking_text(&self) -> String {
        self.thinking.concat()
    }
}

impl StreamSink for Accumulator {
    fn on_content(&mut self, delta: &str) {
        self.content.push(delta.to_string());
    }

    fn on_thinking(&mut self, delta: &str) {
        self.thinking.push(delta.to_string());
    }

    fn on_done(&mut self) {
        self.done += 1;
    }
}

/// Converts a raw response byte stream into content/thinking events.
///
/// The stream ends after the first terminal event; lines following it, even in
/// the same chunk, are never looked at. A transport error is yielded once and
/// also ends the stream. The byte stream is owned by the returned stream and is
/// dropped with it on every exit path.
pub fn event_stream(
    byte_stream: impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
    kind: ProviderKind,
) -> impl Stream<Item = Result<StreamEvent, IdeationError>> + Send {
    async_stream::stream! {
        let mut byte_stream = std::pin::pin!(byte_stream);
        let mut buffer = LineBuffer::new();
        tracing::debug!(%kind, "stream started");

        loop {
            let (lines, exhausted) = match byte_stream.next().await {
                Some(Ok(chunk)) => (buffer.feed(&chunk), false),
                Some(Err(e)) => {
                    tracing::debug!(error = %e, "stream aborted by transport error");
                    yield Err(IdeationError::Stream(e));
                    return;
                }
                None => (buffer.finish().into_iter().collect(), true),
            };

            for line in lines {
                let Some(event) = decode_line(&line, kind) else {
                    continue;
                };

                if let Some(delta) = event.content_delta {
                    yield Ok(StreamEvent::Content(delta));
                }
                if let Some(delta) = event.thinking_delta {
                    yield Ok(StreamEvent::Thinking(delta));
                }
                if event.is_terminal {
                    tracing::debug!("stream ended by terminal event");
                    return;
                }
            }

            if exhausted {
                tracing::debug!("stream closed without terminal event");
                return;
            }
        }
    }
}

/// Consumes a response byte stream, forwarding deltas to `sink`.
///
/// `on_done` is invoked exactly once when the stream ends, by terminal event or
/// by closing. On a transport error the error is returned and `on_done` is left
/// to the caller.
pub async fn run_stream(
    byte_stream: impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
    kind: ProviderKind,
    sink: &mut impl StreamSink,
) -> Result<(), IdeationError> {
    let events = event_stream(byte_stream, kind);
    let mut events = std::pin::pin!(events);

    while let Some(event) = events.next().await {
        match event? {
            StreamEvent::Content(delta) => sink.on_content(&delta),
            StreamEvent::Thinking(delta) => sink.on_thinking(&delta),
        }
    }

    sink.on_done();
    Ok(())
}

fn decode_line(line: &str, kind: ProviderKind) -> Option<ParsedEvent> {
    if line.trim().is_empty() {
        return None;
    }

    match parse_line(line) {
        Ok(Frame::Sentinel) => Some(ParsedEvent::terminal()),
        Ok(Frame::Json(frame)) => Some(classify(&frame, kind)),
        Err(e) => {
            tracing::warn!(line = %e.line, error = %e.source, "skipping malformed stream line");
            None
        }
    }
}
