mod manager;

pub use manager::{
    ConfigFile, ConfigManager, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, IdeateConfig,
    PromptsConfig, ProviderConfig, ResolveOptions, ResolvedConfig, resolve_config,
    resolve_provider,
};
