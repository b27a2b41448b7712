//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use super::output::Output;
use super::{rank, setup};
use crate::domain::parse_date;
use crate::input::{Config, OutputFormat};

#[derive(Parser)]
#[command(name = "triage")]
#[command(author, version, about = "Rank tasks by priority and flag circular dependencies")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Read configuration from this file only
    #[arg(long, global = true, env = "TRIAGE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the batch comes from and which day counts as today
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Task batch file (JSON, or YAML for .yaml/.yml); `-` or omitted reads stdin
    pub input: Option<PathBuf>,

    /// Reference date for due dates, YYYY-MM-DD (defaults to the local date)
    #[arg(long, value_parser = parse_today)]
    pub today: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score and rank every task in a batch
    ///
    /// Examples:
    ///   triage analyze tasks.json
    ///   triage analyze tasks.yaml --strategy deadline
    ///   cat tasks.json | triage analyze --format json
    Analyze {
        #[command(flatten)]
        batch: BatchArgs,

        /// Ranking strategy (simple, smart, fastest, impact, deadline)
        #[arg(long, short)]
        strategy: Option<String>,
    },

    /// Show the top tasks with the reasons they were picked
    Suggest {
        #[command(flatten)]
        batch: BatchArgs,

        /// Ranking strategy (simple, smart, fastest, impact, deadline)
        #[arg(long, short)]
        strategy: Option<String>,

        /// Number of suggestions (defaults to the configured count)
        #[arg(long, short = 'n', value_parser = parse_count)]
        top: Option<usize>,
    },

    /// Report circular dependency chains only
    Cycles {
        /// Task batch file; `-` or omitted reads stdin
        input: Option<PathBuf>,
    },

    /// Write a starter .triage/config.toml
    Init {
        /// Project directory (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Show the effective configuration
    Config,
}

fn parse_today(value: &str) -> Result<NaiveDate, String> {
    parse_date(Some(value)).ok_or_else(|| format!("'{}' is not a YYYY-MM-DD date", value))
}

fn parse_count(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    let output = Output::new(cli.format.unwrap_or(config.format), cli.verbose);

    for source in &config.sources {
        output.verbose_ctx("config", &format!("Loaded {}", source.display()));
    }

    match cli.command {
        Commands::Analyze { batch, strategy } => {
            rank::analyze(&output, &config, &batch, strategy.as_deref())?
        }
        Commands::Suggest {
            batch,
            strategy,
            top,
        } => rank::suggest(&output, &config, &batch, strategy.as_deref(), top)?,
        Commands::Cycles { input } => rank::cycles(&output, input.as_deref())?,
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing config at: {}", path));
            setup::init(&output, &path)?
        }
        Commands::Config => setup::show(&output, &config)?,
    }

    Ok(())
}
