//! Configuration file support for ferro-m2mc.
//!
//! This module provides loading of `.m2mc.toml` configuration files
//! which can specify the data directory, calibration column layout, output
//! format and the default conversion factor.
//!
//! # Example Configuration
//!
//! ```toml
//! [data]
//! dir = "/srv/m2mc/data"
//! layout = "cytological-first"
//!
//! [output]
//! format = "tsv"
//! precision = 3
//!
//! [conversion]
//! factor = 1.2
//! ```
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first found wins):
//! 1. `.m2mc.toml` in current directory
//! 2. `~/.config/ferro-m2mc/config.toml`
//!
//! CLI flags take precedence over config file settings.

use crate::calibration::ColumnLayout;
use crate::cli::OutputFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Data directory used when neither the config nor the CLI names one.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Decimal places used when neither the config nor the CLI sets them.
pub const DEFAULT_PRECISION: usize = 2;

/// Parsed configuration from a .m2mc.toml file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct M2mcConfig {
    /// `[data]` section.
    #[serde(default)]
    pub data: DataConfig,
    /// `[output]` section.
    #[serde(default)]
    pub output: OutputConfig,
    /// `[conversion]` section.
    #[serde(default)]
    pub conversion: ConversionConfig,
}

/// Data section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DataConfig {
    pub dir: Option<PathBuf>,
    pub layout: Option<ColumnLayout>,
}

/// Output section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub precision: Option<usize>,
}

/// Conversion section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ConversionConfig {
    pub factor: Option<f64>,
}

/// Settings given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub data_dir: Option<PathBuf>,
    pub layout: Option<ColumnLayout>,
    pub format: Option<OutputFormat>,
    pub precision: Option<usize>,
    pub factor: Option<f64>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub layout: ColumnLayout,
    pub format: OutputFormat,
    pub precision: usize,
    pub factor: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            layout: ColumnLayout::default(),
            format: OutputFormat::default(),
            precision: DEFAULT_PRECISION,
            factor: 1.0,
        }
    }
}

impl M2mcConfig {
    /// Load configuration from the default locations.
    ///
    /// Searches for config in:
    /// 1. `.m2mc.toml` in current directory
    /// 2. `~/.config/ferro-m2mc/config.toml`
    pub fn load() -> Option<Self> {
        let cwd_config = PathBuf::from(".m2mc.toml");
        if cwd_config.exists() {
            match Self::load_from_path(&cwd_config) {
                Ok(config) => return Some(config),
                Err(e) => log::warn!("Ignoring {}: {}", cwd_config.display(), e),
            }
        }

        if let Some(home) = dirs_home() {
            let home_config = home.join(".config").join("ferro-m2mc").join("config.toml");
            if home_config.exists() {
                match Self::load_from_path(&home_config) {
                    Ok(config) => return Some(config),
                    Err(e) => log::warn!("Ignoring {}: {}", home_config.display(), e),
                }
            }
        }

        None
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML content.
    ///
    /// Unknown sections and keys are ignored.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Merge this config with CLI arguments.
    /// CLI arguments take precedence.
    pub fn merge_with_cli(&self, cli: &CliOverrides) -> Settings {
        let defaults = Settings::default();
        Settings {
            data_dir: cli
                .data_dir
                .clone()
                .or_else(|| self.data.dir.clone())
                .unwrap_or(defaults.data_dir),
            layout: cli.layout.or(self.data.layout).unwrap_or(defaults.layout),
            format: cli.format.or(self.output.format).unwrap_or(defaults.format),
            precision: cli
                .precision
                .or(self.output.precision)
                .unwrap_or(defaults.precision),
            factor: cli
                .factor
                .or(self.conversion.factor)
                .unwrap_or(defaults.factor),
        }
    }
}

/// Configuration loading error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(String),
    /// Parse error in config file.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Config IO error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Config parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
