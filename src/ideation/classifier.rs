//! Reconciles the two providers' envelopes into one event shape.

use serde_json::Value;

use super::provider::ProviderKind;

/// What a single stream line contributed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedEvent {
    pub content_delta: Option<String>,
    pub thinking_delta: Option<String>,
    pub is_terminal: bool,
}

impl ParsedEvent {
    pub fn terminal() -> Self {
        Self {
            is_terminal: true,
            ..Self::default()
        }
    }
}

/// Classifies a parsed JSON frame.
///
/// Self-hosted frames carry their payload under `message` and end with
/// `"done": true`. Hosted frames carry it under `choices[0].delta` and only
/// end on the line-level sentinel.
pub fn classify(frame: &Value, kind: ProviderKind) -> ParsedEvent {
    match kind {
        ProviderKind::SelfHosted => {
            let message = frame.get("message");
            ParsedEvent {
                content_delta: string_field(message, &["content"]),
                thinking_delta: string_field(message, &["thinking"]),
                is_terminal: frame.get("done").and_then(Value::as_bool) == Some(true),
            }
        }
        ProviderKind::Hosted => {
            let delta = frame
                .get("choices")
                .and_then(|choices| choices.get(0))
                .and_then(|choice| choice.get("delta"));
            ParsedEvent {
                content_delta: string_field(delta, &["content"]),
                thinking_delta: string_field(delta, &["reasoning_content", "reasoning", "thinking"]),
                is_terminal: false,
            }
        }
    }
}

/// First string-typed field among `names` on `payload`. Empty strings count.
fn string_field(payload: Option<&Value>, names: &[&str]) -> Option<String> {
    let payload = payload?;
    names
        .iter()
        .find_map(|name| payload.get(*name).and_then(Value::as_str))
        .map(str::to_owned)
}
