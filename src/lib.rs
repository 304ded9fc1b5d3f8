//! # ideate - Project Ideation CLI
//!
//! `ideate` asks a language model for project ideas that fit a budget, a
//! complexity level and an appetite for risk, then follows up with a market
//! analysis of any idea. Responses stream to the terminal as they arrive from
//! either a hosted OpenAI-compatible API or a self-hosted inference server.
//!
//! ## Quick Start
//!
//! ```bash
//! # Three ideas on a $500 budget
//! ideate generate --budget 500 --tech rust,esp32
//!
//! # Market analysis of the second idea from run #4
//! ideate analyze --run 4 --card 2
//!
//! # Show the model's reasoning while it streams
//! ideate generate --show-thinking -p "Reduce food waste in cafeterias"
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/ideate/config.toml`:
//!
//! ```toml
//! [ideate]
//! provider = "ollama"
//! model = "qwen3:8b"
//!
//! [providers.ollama]
//! kind = "self_hosted"
//! endpoint = "http://localhost:11434"
//!
//! [providers.openai]
//! kind = "hosted"
//! api_key_env = "OPENAI_API_KEY"
//! models = ["gpt-4o-mini"]
//! ```

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and provider settings.
pub mod config;

/// File system utilities.
pub mod fs;

/// Run history stored in `SQLite`.
pub mod history;

/// Streaming chat client, response decoding and prompts.
pub mod ideation;

/// Input reading from files and stdin.
pub mod input;

/// Diagnostic logging setup.
pub mod logging;

/// XDG-style path utilities for configuration and data.
pub mod paths;

/// Terminal UI components (spinner, colors, prompts).
pub mod ui;
