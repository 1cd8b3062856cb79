//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{CONFIG_DIR_ENV, CONFIG_DIR_NAME};
use crate::forms::LayoutStyle;
use crate::services::cards::DEFAULT_MAX_PER_COLUMN;
use crate::services::tiles::DEFAULT_MOCK_DELAY;
use crate::services::{FileTileSource, MockTileSource, TileSource};

/// Upper bound for the simulated endpoint delay.
const MAX_DELAY_MS: u64 = 10_000;

/// Tile source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Artificial delay of the mock endpoint in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// JSON tiles file used instead of the mock endpoint
    #[serde(default)]
    pub tiles_file: Option<PathBuf>,
}

fn default_delay_ms() -> u64 {
    u64::try_from(DEFAULT_MOCK_DELAY.as_millis()).unwrap_or(300)
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            tiles_file: None,
        }
    }
}

/// Form projection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Controls per horizontal row in the UI schema (0 = flat list)
    #[serde(default = "default_row_size")]
    pub row_size: usize,
}

fn default_row_size() -> usize {
    3
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            row_size: default_row_size(),
        }
    }
}

/// Tile card display configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Items per card column
    #[serde(default = "default_max_per_column")]
    pub max_per_column: usize,
}

fn default_max_per_column() -> usize {
    DEFAULT_MAX_PER_COLUMN
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_per_column: default_max_per_column(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/tileforms/config.toml`
/// - macOS: `~/Library/Application Support/tileforms/config.toml`
/// - Windows: `%APPDATA%\tileforms\config.toml`
///
/// `TILEFORMS_CONFIG_DIR` overrides the directory.
///
/// # Validation
///
/// - `delay_ms` must not exceed 10 seconds
/// - `max_per_column` must be at least 1
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Tile source settings
    #[serde(default)]
    pub source: SourceConfig,
    /// Form projection settings
    #[serde(default)]
    pub form: FormConfig,
    /// Card display settings
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.source.delay_ms > MAX_DELAY_MS {
            anyhow::bail!(
                "Mock delay {}ms exceeds the maximum of {}ms",
                self.source.delay_ms,
                MAX_DELAY_MS
            );
        }

        if self.display.max_per_column == 0 {
            anyhow::bail!("display.max_per_column must be at least 1");
        }

        Ok(())
    }

    /// UI schema arrangement derived from `form.row_size`.
    pub const fn layout_style(&self) -> LayoutStyle {
        LayoutStyle::from_row_size(self.form.row_size)
    }

    /// Tile source: the configured file, or the mock endpoint.
    pub fn tile_source(&self) -> TileSource {
        match &self.source.tiles_file {
            Some(path) => TileSource::File(FileTileSource::new(path)),
            None => TileSource::Mock(MockTileSource::new(Duration::from_millis(
                self.source.delay_ms,
            ))),
        }
    }
}
