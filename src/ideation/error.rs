//! Error taxonomy for the request/stream core.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Substring a self-hosted server puts in its error when a model rejects the `think` flag.
pub const THINKING_UNSUPPORTED: &str = "does not support thinking";

/// Body of a non-success HTTP response.
///
/// Parsed as JSON when possible, kept as raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    Json(Value),
    Text(String),
}

impl ErrorBody {
    pub fn parse(text: String) -> Self {
        serde_json::from_str(&text).map_or(Self::Text(text), Self::Json)
    }

    /// Reads and parses the body of a failed response.
    ///
    /// A body that cannot be read becomes empty text; the read error is logged.
    pub async fn read(response: reqwest::Response) -> Self {
        match response.text().await {
            Ok(text) => Self::parse(text),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read error body");
                Self::Text(String::new())
            }
        }
    }

    /// Returns the `error` field when the body is a JSON object carrying a string there.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Json(value) => value.get("error").and_then(Value::as_str),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Error)]
pub enum IdeationError {
    #[error("failed to connect to API endpoint {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: ErrorBody },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("stream error: {0}")]
    Stream(#[source] reqwest::Error),

    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("{0} is not supported by hosted providers")]
    UnsupportedProvider(&'static str),
}

/// Outcome of a failed attempt, split by whether the orchestrator may retry it.
#[derive(Debug)]
pub enum AttemptFailure {
    /// The server rejected the reasoning flag; the same request may go again without it.
    Retryable { reason: String, error: IdeationError },
    Fatal(IdeationError),
}

impl From<IdeationError> for AttemptFailure {
    fn from(error: IdeationError) -> Self {
        let reason = match &error {
            IdeationError::Status { body, .. } => body
                .error_message()
                .filter(|message| message.contains(THINKING_UNSUPPORTED))
                .map(str::to_owned),
            _ => None,
        };

        match reason {
            Some(reason) => Self::Retryable { reason, error },
            None => Self::Fatal(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status(body: ErrorBody) -> IdeationError {
        IdeationError::Status { status: 400, body }
    }

    #[test]
    fn test_error_body_parses_json() {
        let body = ErrorBody::parse(r#"{"error":"boom"}"#.to_string());
        assert_eq!(body, ErrorBody::Json(json!({"error": "boom"})));
        assert_eq!(body.error_message(), Some("boom"));
    }

    #[test]
    fn test_error_body_falls_back_to_text() {
        let body = ErrorBody::parse("Bad Gateway".to_string());
        assert_eq!(body, ErrorBody::Text("Bad Gateway".to_string()));
        assert_eq!(body.error_message(), None);
        assert_eq!(body.to_string(), "Bad Gateway");
    }

    #[test]
    fn test_thinking_rejection_is_retryable() {
        let error = status(ErrorBody::Json(
            json!({"error": "model \"gemma3\" does not support thinking"}),
        ));

        match AttemptFailure::from(error) {
            AttemptFailure::Retryable { reason, .. } => {
                assert!(reason.contains("gemma3"));
            }
            AttemptFailure::Fatal(e) => panic!("expected retryable, got {e}"),
        }
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let error = status(ErrorBody::Json(
            json!({"error": "Model Does Not Support Thinking"}),
        ));
        assert!(matches!(
            AttemptFailure::from(error),
            AttemptFailure::Fatal(_)
        ));
    }

    #[test]
    fn test_text_body_is_fatal() {
        let error = status(ErrorBody::Text("does not support thinking".to_string()));
        assert!(matches!(
            AttemptFailure::from(error),
            AttemptFailure::Fatal(_)
        ));
    }

    #[test]
    fn test_non_string_error_field_is_fatal() {
        let error = status(ErrorBody::Json(
            json!({"error": {"message": "does not support thinking"}}),
        ));
        assert!(matches!(
            AttemptFailure::from(error),
            AttemptFailure::Fatal(_)
        ));
    }
}
