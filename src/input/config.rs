//! Configuration handling for triage
//!
//! Configuration is stored in `.triage/config.toml` (project) and
//! `~/.config/triage/config.toml` (global). Project values override global
//! ones key by key; command-line flags override both.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ranking::DEFAULT_SUGGESTIONS;
use crate::scoring::{Strategy, Weights};

/// Directory holding project configuration
pub const PROJECT_DIR: &str = ".triage";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Partial `[weights]` table; unset keys inherit from the layer below
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct WeightsFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effort: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocking: Option<f64>,
}

impl WeightsFile {
    fn apply(&self, weights: &mut Weights) {
        let pairs = [
            (self.urgency, &mut weights.urgency),
            (self.importance, &mut weights.importance),
            (self.effort, &mut weights.effort),
            (self.dependency, &mut weights.dependency),
            (self.blocking, &mut weights.blocking),
        ];
        for (value, slot) in pairs {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

/// Contents of one config file
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    /// Strategy used when `--strategy` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_strategy: Option<String>,

    /// Output format used when `--format` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<OutputFormat>,

    /// Number of tasks returned by `suggest`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<usize>,

    /// Weights for the `smart` strategy
    pub weights: WeightsFile,
}

impl ConfigFile {
    /// The file written by `triage init`
    pub fn starter() -> Self {
        let defaults = Weights::default();
        Self {
            default_strategy: Some(Strategy::default().to_string()),
            default_format: Some(OutputFormat::Text),
            suggestions: Some(DEFAULT_SUGGESTIONS),
            weights: WeightsFile {
                urgency: Some(defaults.urgency),
                importance: Some(defaults.importance),
                effort: Some(defaults.effort),
                dependency: Some(defaults.dependency),
                blocking: Some(defaults.blocking),
            },
        }
    }

    /// Reads a config file, returning `None` when it does not exist
    pub fn read(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let file = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        Ok(Some(file))
    }
}

/// Effective configuration after layering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub strategy: Strategy,
    pub format: OutputFormat,
    pub suggestions: usize,
    pub weights: Weights,

    /// Files that contributed, lowest precedence first
    #[serde(skip)]
    pub sources: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            format: OutputFormat::default(),
            suggestions: DEFAULT_SUGGESTIONS,
            weights: Weights::default(),
            sources: vec![],
        }
    }
}

impl Config {
    /// Loads global then project configuration from default locations
    pub fn load() -> Result<Self> {
        let mut paths = Vec::new();
        if let Some(dir) = Self::global_config_dir() {
            paths.push(dir.join(CONFIG_FILE));
        }
        if let Some(root) = Self::find_project_root() {
            paths.push(Self::project_config_path(&root));
        }
        Self::from_paths(&paths)
    }

    /// Loads a single explicit config file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        Self::from_paths(&[path.to_path_buf()])
    }

    /// Layers the given files in order; missing files are skipped
    pub fn from_paths(paths: &[PathBuf]) -> Result<Self> {
        let mut config = Self::default();
        for path in paths {
            if let Some(file) = ConfigFile::read(path)? {
                config
                    .merge(&file)
                    .with_context(|| format!("Invalid config: {}", path.display()))?;
                config.sources.push(path.clone());
            }
        }
        Ok(config)
    }

    /// Applies one file on top of the current values
    pub fn merge(&mut self, file: &ConfigFile) -> Result<(), ConfigError> {
        if let Some(name) = &file.default_strategy {
            self.strategy = Strategy::lookup(name)
                .ok_or_else(|| ConfigError::Invalid(format!("unknown strategy '{}'", name)))?;
        }
        if let Some(format) = file.default_format {
            self.format = format;
        }
        if let Some(count) = file.suggestions {
            if count == 0 {
                return Err(ConfigError::Invalid("suggestions must be at least 1".to_string()));
            }
            self.suggestions = count;
        }

        let mut weights = self.weights;
        file.weights.apply(&mut weights);
        validate_weights(&weights)?;
        self.weights = weights;

        Ok(())
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "triage", "triage-cli").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Finds the project root by looking for a `.triage/` directory
    pub fn find_project_root() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            if current.join(PROJECT_DIR).is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    pub fn project_config_path(root: &Path) -> PathBuf {
        root.join(PROJECT_DIR).join(CONFIG_FILE)
    }

    /// Writes a starter project config, keeping an existing one
    pub fn init_project(root: &Path) -> Result<PathBuf> {
        let dir = root.join(PROJECT_DIR);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

        let path = Self::project_config_path(root);
        if !path.exists() {
            let content = toml::to_string_pretty(&ConfigFile::starter())
                .context("Failed to serialize project config")?;
            fs::write(&path, content)
                .with_context(|| format!("Failed to write project config: {}", path.display()))?;
        }

        Ok(path)
    }
}

fn validate_weights(weights: &Weights) -> Result<(), ConfigError> {
    for (name, value) in weights.entries() {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "weight '{}' must be a non-negative number, got {}",
                name, value
            )));
        }
    }
    Ok(())
}
