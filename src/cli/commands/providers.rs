//! Provider listing command handler.

use anyhow::{Result, bail};

use crate::config::{ConfigManager, ProviderConfig};
use crate::ui::Style;

/// Prints configured providers to stdout.
///
/// With `specific_provider`, shows details for that provider only.
pub fn print_providers(specific_provider: Option<&str>) -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load_or_default()?;

    if config.providers.is_empty() {
        println!("No providers configured.");
        println!(
            "{}",
            Style::hint(format!(
                "Add providers to {}",
                manager.config_path().display()
            ))
        );
        return Ok(());
    }

    let default_provider = config.ideate.provider.as_deref();
    let marker = |name: &str| {
        if default_provider == Some(name) {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        }
    };

    if let Some(name) = specific_provider {
        let Some(provider) = config.providers.get(name) else {
            bail!("Provider '{name}' not found");
        };

        println!("{}{}", Style::header(format!("Provider: {name}")), marker(name));
        print_details(provider);
        return Ok(());
    }

    println!("{}\n", Style::header("Configured providers"));

    let mut names: Vec<&String> = config.providers.keys().collect();
    names.sort();
    for name in names {
        let provider = &config.providers[name];
        println!("  {}{}", Style::value(name), marker(name));
        println!(
            "    {} {}",
            Style::label("kind:"),
            Style::secondary(provider.kind)
        );
        println!(
            "    {} {}",
            Style::label("endpoint:"),
            Style::secondary(provider.endpoint().unwrap_or("(not set)"))
        );
        if !provider.models.is_empty() {
            println!(
                "    {} {}",
                Style::label("models:"),
                provider.models.join(", ")
            );
        }
    }

    Ok(())
}

fn print_details(provider: &ProviderConfig) {
    println!("  {} = {}", Style::label("kind    "), provider.kind);
    println!(
        "  {} = {}",
        Style::label("endpoint"),
        provider.endpoint().unwrap_or("(not set)")
    );
    if provider.api_key_env.is_some() || provider.api_key.is_some() {
        let status = if provider.get_api_key().is_some() {
            Style::success("(set)")
        } else {
            Style::warning("(not set)")
        };
        println!("  {} = {status}", Style::label("api_key "));
    }
    if provider.models.is_empty() {
        println!("  {} = (none configured)", Style::label("models  "));
    } else {
        println!("  {}", Style::label("models:"));
        for model in &provider.models {
            println!("    - {model}");
        }
    }
}
