//! Model discovery for self-hosted inference servers.

use reqwest::Client;
use serde::Deserialize;

use super::error::{ErrorBody, IdeationError};
use super::provider::{Provider, ProviderKind};

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

/// Lists the models a self-hosted server has available via `GET {base}/api/tags`.
pub async fn list_models(provider: &Provider) -> Result<Vec<String>, IdeationError> {
    if provider.kind == ProviderKind::Hosted {
        return Err(IdeationError::UnsupportedProvider("model discovery"));
    }

    let url = format!("{}/api/tags", provider.base_url());
    tracing::info!(%url, "fetching models");

    let response = Client::new()
        .get(&url)
        .send()
        .await
        .map_err(|source| IdeationError::Transport {
            url: url.clone(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = ErrorBody::read(response).await;
        return Err(IdeationError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let tags: TagsResponse = response
        .json()
        .await
        .map_err(|source| IdeationError::Decode { url, source })?;

    let names: Vec<String> = tags.models.into_iter().map(|m| m.name).collect();
    tracing::info!(count = names.len(), "fetched models");
    Ok(names)
}
