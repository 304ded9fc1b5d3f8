use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::ideation::{HOSTED_ENDPOINT, Provider, ProviderKind};
use crate::paths;

pub const DEFAULT_TEMPERATURE: f64 = 0.8;
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Default settings in the `[ideate]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdeateConfig {
    /// Default provider name.
    pub provider: Option<String>,
    /// Default model name.
    pub model: Option<String>,
    /// Sampling temperature.
    pub temperature: Option<f64>,
    /// Token limit for each response.
    pub max_tokens: Option<u32>,
    /// Whether to request reasoning from self-hosted models.
    pub think: Option<bool>,
}

/// Configuration for an inference provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Wire dialect: `hosted` or `self_hosted`.
    pub kind: ProviderKind,
    /// Base URL. Required for self-hosted providers.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// List of available models for this provider.
    #[serde(default)]
    pub models: Vec<String>,
}

impl ProviderConfig {
    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone()
    }

    /// Returns the configured endpoint, falling back to the vendor default for hosted providers.
    pub fn endpoint(&self) -> Option<&str> {
        match (self.endpoint.as_deref(), self.kind) {
            (Some(endpoint), _) => Some(endpoint),
            (None, ProviderKind::Hosted) => Some(HOSTED_ENDPOINT),
            (None, ProviderKind::SelfHosted) => None,
        }
    }

    /// Connection settings for requests that need no model, such as model discovery.
    pub fn connection(&self, name: &str) -> Result<Provider> {
        let Some(endpoint) = self.endpoint() else {
            bail!("Provider '{name}' has no endpoint");
        };

        Ok(Provider {
            kind: self.kind,
            endpoint: endpoint.to_string(),
            api_key: self.get_api_key(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }
}

/// Prompt template overrides in the `[prompts]` section.
///
/// Templates use `{count}`/`{constraints}` and `{idea}` placeholders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptsConfig {
    pub ideas: Option<String>,
    pub market: Option<String>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/ideate/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Default settings.
    #[serde(default)]
    pub ideate: IdeateConfig,
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    #[serde(default)]
    pub prompts: PromptsConfig,
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The selected provider name.
    pub provider_name: String,
    /// Connection settings for the selected provider.
    pub provider: Provider,
    /// The model to request.
    pub model: String,
    /// Whether reasoning is requested (self-hosted only).
    pub think: bool,
    pub prompts: PromptsConfig,
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Provider name override.
    pub provider: Option<String>,
    /// Model name override.
    pub model: Option<String>,
    /// Reasoning override.
    pub think: Option<bool>,
    /// Temperature override.
    pub temperature: Option<f64>,
    /// Token limit override.
    pub max_tokens: Option<u32>,
}

/// Resolves the provider named by the CLI or the config file default.
///
/// Unlike [`resolve_config`] this does not require a model.
pub fn resolve_provider<'a>(
    provider: Option<&str>,
    config_file: &'a ConfigFile,
) -> Result<(String, &'a ProviderConfig)> {
    let provider_name = provider
        .or(config_file.ideate.provider.as_deref())
        .map(str::to_string)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'provider'\n\n\
                 Please provide it via:\n  \
                 - CLI option: ideate --provider <name>\n  \
                 - Config file: ~/.config/ideate/config.toml"
            )
        })?;

    let provider_config = config_file.providers.get(&provider_name).ok_or_else(|| {
        let mut available: Vec<_> = config_file.providers.keys().map(String::as_str).collect();
        available.sort_unstable();
        if available.is_empty() {
            anyhow::anyhow!(
                "Provider '{provider_name}' not found\n\n\
                 No providers configured. Add providers to ~/.config/ideate/config.toml"
            )
        } else {
            anyhow::anyhow!(
                "Provider '{provider_name}' not found\n\n\
                 Available providers:\n  \
                 - {}\n\n\
                 Add providers to ~/.config/ideate/config.toml",
                available.join("\n  - ")
            )
        }
    })?;

    Ok((provider_name, provider_config))
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// CLI options take precedence over config file values.
///
/// # Errors
///
/// Returns an error if required configuration (provider, model) is missing,
/// the provider is not found, a self-hosted provider has no endpoint, or a
/// hosted provider has no API key.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let (provider_name, provider_config) =
        resolve_provider(options.provider.as_deref(), config_file)?;

    let model = options
        .model
        .as_ref()
        .or(config_file.ideate.model.as_ref())
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'model'\n\n\
                 Please provide it via:\n  \
                 - CLI option: ideate --model <name>\n  \
                 - Config file: ~/.config/ideate/config.toml\n\n\
                 Run 'ideate models' to list models on a self-hosted server."
            )
        })?;

    if !provider_config.models.is_empty() && !provider_config.models.contains(&model) {
        tracing::warn!(
            model = %model,
            provider = %provider_name,
            configured = %provider_config.models.join(", "),
            "model is not in the configured models list, proceeding anyway"
        );
    }

    let Some(endpoint) = provider_config.endpoint() else {
        bail!(
            "Provider '{provider_name}' has no endpoint\n\n\
             Self-hosted providers need an endpoint, e.g.:\n  \
             endpoint = \"http://localhost:11434\""
        );
    };

    let api_key = provider_config.get_api_key();
    if provider_config.kind == ProviderKind::Hosted && api_key.is_none() {
        let env_var = provider_config.api_key_env.as_deref().unwrap_or("API_KEY");
        bail!(
            "Provider '{provider_name}' requires an API key\n\n\
             Set the {env_var} environment variable:\n  \
             export {env_var}=\"your-api-key\"\n\n\
             Or set api_key in ~/.config/ideate/config.toml"
        );
    }

    Ok(ResolvedConfig {
        provider: Provider {
            kind: provider_config.kind,
            endpoint: endpoint.to_string(),
            api_key,
            temperature: options
                .temperature
                .or(config_file.ideate.temperature)
                .unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: options
                .max_tokens
                .or(config_file.ideate.max_tokens)
                .unwrap_or(DEFAULT_MAX_TOKENS),
        },
        provider_name,
        model,
        think: options.think.or(config_file.ideate.think).unwrap_or(true),
        prompts: config_file.prompts.clone(),
    })
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/ideate/config.toml`
    /// or `~/.config/ideate/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }

    /// Loads the config file, treating a missing file as empty.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}
