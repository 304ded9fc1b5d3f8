//! Sends chat requests and applies the one-shot retry when a model rejects reasoning.

use reqwest::Client;
use std::time::Instant;

use super::driver::{StreamSink, run_stream};
use super::error::{AttemptFailure, ErrorBody, IdeationError};
use super::provider::{Provider, ProviderKind, RequestSpec};

const BODY_PREVIEW_CHARS: usize = 80;

/// Issues chat requests against one provider and retries once without
/// reasoning when a self-hosted model rejects it.
pub struct IdeationClient {
    client: Client,
    provider: Provider,
}

impl IdeationClient {
    pub fn new(provider: Provider) -> Self {
        Self {
            client: Client::new(),
            provider,
        }
    }

    pub const fn provider(&self) -> &Provider {
        &self.provider
    }

    /// Sends a streaming chat request and returns the open response.
    ///
    /// Reasoning is only requested from self-hosted providers. If that attempt
    /// fails because the model does not support it, the request is repeated
    /// exactly once with reasoning disabled. Every other failure is returned as-is.
    pub async fn send(
        &self,
        model: &str,
        prompt: &str,
        reasoning: bool,
    ) -> Result<reqwest::Response, IdeationError> {
        let reasoning = reasoning && self.provider.kind == ProviderKind::SelfHosted;

        match self.attempt(model, prompt, reasoning).await {
            Ok(response) => Ok(response),
            Err(error) if reasoning => match AttemptFailure::from(error) {
                AttemptFailure::Retryable { reason, .. } => {
                    tracing::info!(%reason, "thinking unsupported, retrying with think=false");
                    self.attempt(model, prompt, false).await
                }
                AttemptFailure::Fatal(error) => Err(error),
            },
            Err(error) => Err(error),
        }
    }

    /// Sends the request and drives its response stream into `sink`.
    pub async fn stream(
        &self,
        model: &str,
        prompt: &str,
        reasoning: bool,
        sink: &mut impl StreamSink,
    ) -> Result<(), IdeationError> {
        let response = self.send(model, prompt, reasoning).await?;
        run_stream(response.bytes_stream(), self.provider.kind, sink).await
    }

    async fn attempt(
        &self,
        model: &str,
        prompt: &str,
        reasoning: bool,
    ) -> Result<reqwest::Response, IdeationError> {
        let spec = self.provider.build(model, prompt, true, reasoning)?;
        log_request(&spec, reasoning);

        let mut http_request = self.client.post(&spec.url);
        for (name, value) in &spec.headers {
            http_request = http_request.header(name, value);
        }
        let http_request = http_request.json(&spec.body);

        let started = Instant::now();
        let response = http_request
            .send()
            .await
            .map_err(|source| IdeationError::Transport {
                url: spec.url.clone(),
                source,
            })?;

        let status = response.status();
        tracing::info!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "<<< response"
        );

        if status.is_success() {
            return Ok(response);
        }

        let body = ErrorBody::read(response).await;
        tracing::error!(status = status.as_u16(), %body, "error body");
        Err(IdeationError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

fn log_request(spec: &RequestSpec, reasoning: bool) {
    tracing::info!(url = %spec.url, reasoning, ">>> POST");

    let body = spec.body.to_string();
    let preview: String = body
        .chars()
        .take(BODY_PREVIEW_CHARS)
        .collect::<String>()
        .replace('\n', "\\n");
    tracing::debug!(bytes = body.len(), %preview, "request body");
    tracing::trace!(%body, "request body (full)");
}
