//! Configuration commands (init, config)

use std::path::Path;

use anyhow::Result;

use super::output::Output;
use crate::input::Config;

/// Write a starter project config
pub fn init(output: &Output, path: &str) -> Result<()> {
    let config_path = Config::init_project(Path::new(path))?;
    output.verbose_ctx("init", &format!("Config file: {}", config_path.display()));
    output.done(&format!("Initialized triage config at {}", config_path.display()))
}

/// Show the effective configuration
pub fn show(output: &Output, config: &Config) -> Result<()> {
    let sources: Vec<_> = config.sources.iter().map(|p| p.display().to_string()).collect();
    let report = serde_json::json!({
        "strategy": config.strategy,
        "format": config.format,
        "suggestions": config.suggestions,
        "weights": config.weights,
        "sources": sources,
    });
    output.report(&report, || print_config(config))
}

fn print_config(config: &Config) {
    println!("Effective Configuration");
    println!("{}", "=".repeat(40));
    println!("Strategy:    {}", config.strategy);
    println!("Format:      {:?}", config.format);
    println!("Suggestions: {}", config.suggestions);
    println!();
    println!("Weights:");
    for (name, value) in config.weights.entries() {
        println!("  {:<12} {:.2}", name, value);
    }
    println!();
    if config.sources.is_empty() {
        println!("Sources: (defaults)");
    } else {
        println!("Sources:");
        for source in &config.sources {
            println!("  {}", source.display());
        }
    }
}
