//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::constants::APP_NAME;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Mock endpoint delay in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Controls per UI schema row (0 for a flat list)
    #[arg(long, value_name = "N")]
    row_size: Option<usize>,

    /// Items per tile card column
    #[arg(long, value_name = "N")]
    max_per_column: Option<usize>,

    /// JSON tiles file to use instead of the mock endpoint
    #[arg(long, value_name = "FILE", conflicts_with = "mock")]
    tiles_file: Option<PathBuf>,

    /// Switch back to the mock endpoint
    #[arg(long)]
    mock: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            print_json(&config)?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.delay_ms.is_none()
            && self.row_size.is_none()
            && self.max_per_column.is_none()
            && self.tiles_file.is_none()
            && !self.mock
        {
            return Err(CliError::validation(concat!(
                "At least one configuration option must be specified: ",
                "--delay-ms, --row-size, --max-per-column, --tiles-file, or --mock",
            )));
        }

        let mut config = Config::load().unwrap_or_default();

        if let Some(delay_ms) = self.delay_ms {
            config.source.delay_ms = delay_ms;
        }
        if let Some(row_size) = self.row_size {
            config.form.row_size = row_size;
        }
        if let Some(max) = self.max_per_column {
            config.display.max_per_column = max;
        }
        if let Some(path) = &self.tiles_file {
            if !path.exists() {
                return Err(CliError::validation(format!(
                    "Tiles file does not exist: {}",
                    path.display()
                )));
            }
            config.source.tiles_file = Some(path.clone());
        }
        if self.mock {
            config.source.tiles_file = None;
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid configuration: {e}")))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    let heading = format!("{APP_NAME} Configuration");
    println!("{heading}");
    println!("{}", "=".repeat(heading.len()));
    println!();

    println!("Source:");
    match &config.source.tiles_file {
        Some(path) => println!("  Tiles File: {}", path.display()),
        None => println!("  Tiles File: (mock endpoint)"),
    }
    println!("  Mock Delay: {}ms", config.source.delay_ms);
    println!();

    println!("Form:");
    if config.form.row_size == 0 {
        println!("  Row Size: flat");
    } else {
        println!("  Row Size: {}", config.form.row_size);
    }
    println!();

    println!("Display:");
    println!("  Max Per Column: {}", config.display.max_per_column);
    println!();
}
