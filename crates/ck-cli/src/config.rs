use crate::ReportFormat;
use anyhow::{Context, Result};
use ck_core::schedule::{DEFAULT_DUE_SOON_DAYS, DEFAULT_LOOKAHEAD};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default name of the configuration file
pub const DEFAULT_CONFIG_FILE: &str = "contract-keeper.toml";

/// Upper bound for the schedule lookahead
const MAX_LOOKAHEAD: usize = 120;

/// Project configuration
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Directory holding one JSON file per contract
    pub data_dir: String,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub migration: MigrationConfig,
    pub output: OutputConfig,
}

/// Schedule projection settings
#[derive(Debug, Deserialize)]
pub struct ScheduleConfig {
    /// Number of upcoming payments listed per contract
    #[serde(default = "default_lookahead")]
    pub lookahead: usize,
    /// Payments within this many days are highlighted
    #[serde(default = "default_due_soon_days")]
    pub due_soon_days: i64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            lookahead: default_lookahead(),
            due_soon_days: default_due_soon_days(),
        }
    }
}

fn default_lookahead() -> usize {
    DEFAULT_LOOKAHEAD
}

fn default_due_soon_days() -> i64 {
    DEFAULT_DUE_SOON_DAYS
}

/// Migration settings
#[derive(Debug, Deserialize)]
pub struct MigrationConfig {
    /// Write migrated records back into `data_dir`
    #[serde(default = "default_true")]
    pub write_back: bool,
    /// Keep the previous version of a rewritten record as `<file>.bak`
    #[serde(default = "default_true")]
    pub backup: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            write_back: true,
            backup: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Output configuration
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    pub format: String,
    pub path: String,
}

impl Config {
    /// Loads configuration from a file
    ///
    /// # Arguments
    /// * `path` - Path to the config file (can be absolute or relative)
    /// * `base_path` - Optional base path for resolving relative paths in config.
    ///   If None, uses the directory of the config file as base.
    pub fn load(path: &str, base_path: Option<&Path>) -> Result<Self> {
        let config_path = Path::new(path);
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        let base =
            base_path.unwrap_or_else(|| config_path.parent().unwrap_or_else(|| Path::new(".")));

        config.resolve_relative_paths(base)?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.is_empty() {
            anyhow::bail!("data_dir cannot be empty");
        }
        let data_dir = Path::new(&self.data_dir);
        if !data_dir.exists() {
            anyhow::bail!("data_dir does not exist: {}", self.data_dir);
        }
        if !data_dir.is_dir() {
            anyhow::bail!("data_dir must be a directory: {}", self.data_dir);
        }

        if self.schedule.lookahead == 0 || self.schedule.lookahead > MAX_LOOKAHEAD {
            anyhow::bail!(
                "schedule.lookahead must be between 1 and {}, got {}",
                MAX_LOOKAHEAD,
                self.schedule.lookahead
            );
        }
        if self.schedule.due_soon_days < 0 {
            anyhow::bail!(
                "schedule.due_soon_days cannot be negative, got {}",
                self.schedule.due_soon_days
            );
        }

        self.report_format()?;

        if self.output.path.is_empty() {
            anyhow::bail!("output.path cannot be empty");
        }

        Ok(())
    }

    /// Report format named in `[output]`
    pub fn report_format(&self) -> Result<ReportFormat> {
        match self.output.format.as_str() {
            "markdown" => Ok(ReportFormat::Markdown),
            "json" => Ok(ReportFormat::Json),
            _ => anyhow::bail!(
                "Invalid output format: {}. Supported formats: markdown, json",
                self.output.format
            ),
        }
    }

    /// Resolves all relative paths in the config relative to the base path
    fn resolve_relative_paths(&mut self, base: &Path) -> Result<()> {
        if !self.data_dir.is_empty() && !Path::new(&self.data_dir).is_absolute() {
            let joined = base.join(&self.data_dir);
            let resolved = if joined.exists() {
                joined
                    .canonicalize()
                    .with_context(|| format!("Failed to resolve data_dir: {}", self.data_dir))?
            } else {
                joined
            };
            self.data_dir = resolved.to_string_lossy().to_string();
        }

        if !self.output.path.is_empty() && !Path::new(&self.output.path).is_absolute() {
            let resolved = base.join(&self.output.path);
            self.output.path = resolved.to_string_lossy().to_string();
        }

        Ok(())
    }
}
