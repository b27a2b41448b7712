//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `analyze` | Score and rank every task in a batch |
//! | `suggest` | Top tasks with explanations and reasons |
//! | `cycles` | Dependency cycles only |
//! | `init` | Write a starter `.triage/config.toml` |
//! | `config` | Show the effective configuration |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! triage --verbose analyze tasks.json
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod rank;
mod setup;

pub use app::{run, BatchArgs, Cli, Commands};
pub use output::Output;
