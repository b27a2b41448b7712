//! # Input Layer
//!
//! Everything that reaches the engine from outside: task batches and
//! configuration.
//!
//! ## Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Task batch | JSON array or `{"tasks": [...]}` | file argument or stdin |
//! | Task batch | YAML, same shapes | `*.yaml` / `*.yml` file argument |
//! | Config | TOML | `.triage/config.toml`, `~/.config/triage/config.toml` |
//!
//! ## Key Types
//!
//! - [`read_batch`] / [`parse_batch`] - Load and validate a batch
//! - [`Config`] - Layered project and global configuration

mod batch;
mod config;

pub use batch::{parse_batch, read_batch, BatchFormat, InputError};
pub use config::{Config, ConfigError, ConfigFile, OutputFormat, WeightsFile, PROJECT_DIR};
