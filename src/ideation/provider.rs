//! Builds outbound chat requests for hosted and self-hosted providers.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use super::error::IdeationError;

/// Default endpoint for hosted providers.
pub const HOSTED_ENDPOINT: &str = "https://api.openai.com";

/// Wire dialect of a provider. Every schema branch in the core keys off this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Vendor-operated API: bearer credential, `data: ` framed events.
    Hosted,
    /// Local or network inference server: no credential, one JSON object per line.
    SelfHosted,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hosted => f.write_str("hosted"),
            Self::SelfHosted => f.write_str("self-hosted"),
        }
    }
}

/// A fully built request for one attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    think: Option<bool>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Cow<'a, str>,
}

/// Connection settings for one provider.
#[derive(Debug, Clone)]
pub struct Provider {
    pub kind: ProviderKind,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Provider {
    pub fn base_url(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }

    /// Builds the request for one attempt.
    ///
    /// Hosted providers never receive the `think` flag; a reasoning request is
    /// dropped rather than rejected.
    pub fn build(
        &self,
        model: &str,
        prompt: &str,
        stream: bool,
        reasoning: bool,
    ) -> Result<RequestSpec, IdeationError> {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let (url, max_tokens, max_completion_tokens, think) = match self.kind {
            ProviderKind::Hosted => {
                if let Some(api_key) = &self.api_key {
                    headers.insert("Authorization".to_string(), format!("Bearer {api_key}"));
                }
                (
                    format!("{}/v1/chat/completions", self.base_url()),
                    None,
                    Some(self.max_tokens),
                    None,
                )
            }
            ProviderKind::SelfHosted => (
                format!("{}/api/chat", self.base_url()),
                Some(self.max_tokens),
                None,
                Some(reasoning),
            ),
        };

        let chat_request = ChatRequest {
            model,
            messages: vec![Message {
                role: "user",
                content: Cow::Borrowed(prompt),
            }],
            temperature: self.temperature,
            stream,
            max_tokens,
            max_completion_tokens,
            think,
        };

        Ok(RequestSpec {
            url,
            headers,
            body: serde_json::to_value(&chat_request)?,
        })
    }
}
