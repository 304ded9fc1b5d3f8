//! Configure command handler for editing default settings.

use anyhow::{Result, bail};
use inquire::{Confirm, Select, Text};

use crate::config::{ConfigFile, ConfigManager, IdeateConfig, ProviderConfig};
use crate::ideation::{ProviderKind, list_models};
use crate::ui::{Spinner, Style};

/// Interactively sets the default provider, model and reasoning preference.
///
/// For self-hosted providers the model list is discovered from the server,
/// falling back to the configured list when the server cannot be reached.
pub async fn run_configure() -> Result<()> {
    let manager = ConfigManager::new()?;
    let mut config = manager.load_or_default()?;

    if config.providers.is_empty() {
        bail!(
            "No providers configured.\n\n\
             Add a provider to {} first, e.g.:\n\n  \
             [providers.ollama]\n  \
             kind = \"self_hosted\"\n  \
             endpoint = \"http://localhost:11434\"",
            manager.config_path().display()
        );
    }

    print_current_defaults(&config);

    let mut provider_names: Vec<String> = config.providers.keys().cloned().collect();
    provider_names.sort();
    let provider = select_provider(&provider_names, config.ideate.provider.as_deref())?;

    let available_models = match config.providers.get(&provider) {
        Some(provider_config) => available_models(&provider, provider_config).await,
        None => Vec::new(),
    };
    let model = select_model(&available_models, config.ideate.model.as_deref())?;

    let think = Confirm::new("Request reasoning from self-hosted models?")
        .with_default(config.ideate.think.unwrap_or(true))
        .with_help_message("Models without reasoning support are retried automatically")
        .prompt()?;

    config.ideate = IdeateConfig {
        provider: Some(provider),
        model: Some(model),
        think: Some(think),
        ..config.ideate
    };

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display())
    );

    Ok(())
}

async fn available_models(name: &str, provider: &ProviderConfig) -> Vec<String> {
    let mut models = provider.models.clone();
    if provider.kind != ProviderKind::SelfHosted {
        return models;
    }

    let Ok(connection) = provider.connection(name) else {
        return models;
    };

    let spinner = Spinner::new("Fetching models...");
    let discovered = list_models(&connection).await;
    spinner.stop();

    match discovered {
        Ok(discovered) => {
            for model in discovered {
                if !models.contains(&model) {
                    models.push(model);
                }
            }
        }
        Err(e) => {
            tracing::warn!(provider = name, error = %e, "model discovery failed");
            eprintln!(
                "{}",
                Style::warning(format!("Could not list models on '{name}', using config"))
            );
        }
    }

    models
}

fn print_current_defaults(config: &ConfigFile) {
    let show = |value: Option<String>| value.map_or_else(|| Style::secondary("(not set)"), Style::value);

    println!("{}", Style::header("Current defaults"));
    println!(
        "  {}  {}",
        Style::label("provider"),
        show(config.ideate.provider.clone())
    );
    println!(
        "  {}     {}",
        Style::label("model"),
        show(config.ideate.model.clone())
    );
    println!(
        "  {}     {}",
        Style::label("think"),
        show(config.ideate.think.map(|t| t.to_string()))
    );
    println!();
}

fn select_provider(providers: &[String], default: Option<&str>) -> Result<String> {
    let default_index = default
        .and_then(|d| providers.iter().position(|p| p == d))
        .unwrap_or(0);

    let selection = Select::new("Default provider:", providers.to_vec())
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection)
}

fn select_model(available_models: &[String], default: Option<&str>) -> Result<String> {
    if available_models.is_empty() {
        let mut prompt = Text::new("Default model:").with_help_message("Enter the model name");

        if let Some(d) = default {
            prompt = prompt.with_default(d);
        }

        let model = prompt.prompt()?;

        if model.trim().is_empty() {
            bail!("Model name cannot be empty");
        }

        return Ok(model.trim().to_string());
    }

    let default_index = default
        .and_then(|d| available_models.iter().position(|m| m == d))
        .unwrap_or(0);

    let selection = Select::new("Default model:", available_models.to_vec())
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection)
}
