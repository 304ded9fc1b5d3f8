//! Subcommand implementations.

/// Market analysis command handler.
pub mod analyze;

/// Configure command handler.
pub mod configure;

/// Idea generation command handler.
pub mod generate;

/// Run history command handlers.
pub mod history;

/// Model discovery command handler.
pub mod models;

/// Provider listing command handler.
pub mod providers;

/// Streaming, output and history steps shared by model commands.
pub mod session;
