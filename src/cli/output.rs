//! Report printing and `--verbose` diagnostics

use anyhow::{Context, Result};
use serde::Serialize;

use crate::input::OutputFormat;

/// Where command results and diagnostics go
///
/// Results go to stdout: one compact JSON document per command, or text the
/// command renders itself. Diagnostics go to stderr and only with `--verbose`.
pub struct Output {
    format: OutputFormat,
    verbose: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// Prints `report` as JSON, or runs `render` to print it as text
    pub fn report<T: Serialize>(&self, report: &T, render: impl FnOnce()) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string(report).context("Failed to encode report")?;
                println!("{}", json);
            }
            OutputFormat::Text => render(),
        }
        Ok(())
    }

    /// Prints the outcome of a command that has no report of its own
    pub fn done(&self, message: &str) -> Result<()> {
        self.report(&serde_json::json!({ "ok": true, "message": message }), || {
            println!("{}", message)
        })
    }

    /// `[verbose:<context>] message` on stderr
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }
}
