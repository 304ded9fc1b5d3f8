//! XDG-style path utilities for configuration and data directories.
//!
//! This module provides consistent path resolution across platforms,
//! preferring XDG Base Directory Specification conventions over
//! OS-specific locations.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "ideate";

/// Returns the configuration directory for ideate.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/ideate` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/ideate` otherwise
pub fn config_dir() -> Result<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", &[".config"])
}

/// Returns the data directory for ideate (run history).
///
/// Resolution order:
/// 1. `$XDG_DATA_HOME/ideate` if `XDG_DATA_HOME` is set
/// 2. `~/.local/share/ideate` otherwise
pub fn data_dir() -> Result<PathBuf> {
    xdg_dir("XDG_DATA_HOME", &[".local", "share"])
}

fn xdg_dir(env_var: &str, home_relative: &[&str]) -> Result<PathBuf> {
    if let Ok(xdg) = std::env::var(env_var)
        && !xdg.is_empty()
    {
        return Ok(PathBuf::from(xdg).join(APP_DIR));
    }

    let mut dir = dirs::home_dir().context("Failed to determine home directory")?;
    dir.extend(home_relative);
    Ok(dir.join(APP_DIR))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_dir_default() {
        // Clear XDG_CONFIG_HOME to test default behavior
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::remove_var("XDG_CONFIG_HOME") };

        let dir = config_dir().unwrap();
        assert!(dir.ends_with(".config/ideate"));

        // Restore
        if let Some(val) = original {
            unsafe { std::env::set_var("XDG_CONFIG_HOME", val) };
        }
    }

    #[test]
    #[serial]
    fn test_config_dir_xdg_override() {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::set_var("XDG_CONFIG_HOME", "/custom/config") };

        let dir = config_dir().unwrap();
        assert_eq!(dir, PathBuf::from("/custom/config/ideate"));

        // Restore
        if let Some(val) = original {
            unsafe { std::env::set_var("XDG_CONFIG_HOME", val) };
        } else {
            unsafe { std::env::remove_var("XDG_CONFIG_HOME") };
        }
    }

    #[test]
    #[serial]
    fn test_data_dir_default() {
        let original = std::env::var("XDG_DATA_HOME").ok();
        unsafe { std::env::remove_var("XDG_DATA_HOME") };

        let dir = data_dir().unwrap();
        assert!(dir.ends_with(".local/share/ideate"));

        if let Some(val) = original {
            unsafe { std::env::set_var("XDG_DATA_HOME", val) };
        }
    }

    #[test]
    #[serial]
    fn test_data_dir_xdg_override() {
        let original = std::env::var("XDG_DATA_HOME").ok();
        unsafe { std::env::set_var("XDG_DATA_HOME", "/custom/data") };

        let dir = data_dir().unwrap();
        assert_eq!(dir, PathBuf::from("/custom/data/ideate"));

        if let Some(val) = original {
            unsafe { std::env::set_var("XDG_DATA_HOME", val) };
        } else {
            unsafe { std::env::remove_var("XDG_DATA_HOME") };
        }
    }
}
