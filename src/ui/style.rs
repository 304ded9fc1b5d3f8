//! Color helpers for terminal output, built on owo-colors.
//!
//! Model text on stdout is never styled so it stays pipe-friendly.

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Styles for different semantic elements.
pub struct Style;

impl Style {
    /// Section headers (e.g. "Configured providers")
    pub fn header<T: Display>(text: T) -> String {
        format!("{}", text.bold())
    }

    /// Labels and keys (e.g. "endpoint", "model")
    pub fn label<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }

    /// Primary values such as provider and model names
    pub fn value<T: Display>(text: T) -> String {
        format!("{}", text.cyan())
    }

    /// Supplementary info such as endpoints and timestamps
    pub fn secondary<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }

    pub fn success<T: Display>(text: T) -> String {
        format!("{}", text.green())
    }

    pub fn warning<T: Display>(text: T) -> String {
        format!("{}", text.yellow())
    }

    /// Run ids and card numbers
    pub fn id<T: Display>(text: T) -> String {
        format!("{}", text.yellow())
    }

    /// Streamed model reasoning on stderr
    pub fn thinking<T: Display>(text: T) -> String {
        format!("{}", text.dimmed().italic())
    }

    pub fn hint<T: Display>(text: T) -> String {
        format!("{}", text.dimmed().italic())
    }

    pub fn default_marker() -> String {
        format!("{}", "(default)".dimmed())
    }
}
