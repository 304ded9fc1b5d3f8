use anyhow::{Context, Result};

use crate::config::{ConfigManager, resolve_provider};
use crate::ideation::list_models;
use crate::ui::{Spinner, Style};

/// Prints models available on a self-hosted provider.
pub async fn print_models(provider: Option<&str>) -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load_or_default()?;

    let (name, provider_config) = resolve_provider(provider, &config)?;
    let connection = provider_config.connection(&name)?;

    let spinner = Spinner::new("Fetching models...");
    let models = list_models(&connection)
        .await
        .with_context(|| format!("Failed to list models for provider '{name}'"))?;
    spinner.stop();

    if models.is_empty() {
        println!("No models installed on {}", Style::value(&name));
        return Ok(());
    }

    let default_model = config.ideate.model.as_deref();
    println!("{}", Style::header(format!("Models on {name}")));
    for model in &models {
        if Some(model.as_str()) == default_model {
            println!("  {} {}", Style::value(model), Style::default_marker());
        } else {
            println!("  {}", Style::value(model));
        }
    }

    Ok(())
}
