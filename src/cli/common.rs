//! Shared CLI types: errors, exit codes, tile loading and JSON output.

use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::config::Config;
use crate::models::Tile;
use crate::services::{find_tile, FileTileSource, TileSource};

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Input was understood but failed validation
    Validation = 1,
    /// File, parse or configuration failure
    Io = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code the process should terminate with
    pub kind: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::Validation,
            message: message.into(),
        }
    }

    /// I/O or parse failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::Io,
            message: message.into(),
        }
    }

    /// Numeric process exit code.
    pub const fn exit_code(&self) -> i32 {
        self.kind.code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type of CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Loads the effective configuration, falling back to defaults on error.
pub fn load_config() -> Config {
    Config::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {e:#}");
        Config::default()
    })
}

/// Resolves the tile source: `--tiles` wins over the configured source.
pub fn resolve_source(tiles: Option<&Path>, config: &Config) -> TileSource {
    match tiles {
        Some(path) => TileSource::File(FileTileSource::new(path)),
        None => config.tile_source(),
    }
}

/// Fetches all tiles from a source, driving the async fetch to completion.
pub fn fetch_tiles(source: &TileSource) -> CliResult<Vec<Tile>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(|e| CliError::io(format!("Failed to start runtime: {e}")))?;

    runtime
        .block_on(source.fetch_tiles())
        .map_err(|e| CliError::io(format!("Failed to load tiles: {e:#}")))
}

/// Looks up a tile by id, failing with a validation error listing known ids.
pub fn require_tile<'a>(tiles: &'a [Tile], id: &str) -> CliResult<&'a Tile> {
    find_tile(tiles, id).ok_or_else(|| {
        let known: Vec<_> = tiles.iter().map(|t| t.id.as_str()).collect();
        CliError::validation(format!(
            "Tile '{id}' not found. Available tiles: {}",
            known.join(", ")
        ))
    })
}

/// Prints a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::tiles::mock_tiles;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::validation("x").exit_code(), 1);
        assert_eq!(CliError::io("x").exit_code(), 2);
        assert_eq!(ExitCode::Success.code(), 0);
    }

    #[test]
    fn test_require_tile_lists_known_ids() {
        let tiles = mock_tiles().unwrap();
        assert!(require_tile(&tiles, "sales_q1").is_ok());

        let err = require_tile(&tiles, "missing").unwrap_err();
        assert_eq!(err.kind, ExitCode::Validation);
        assert!(err.message.contains("profile, sales_q1, location"));
    }

    #[test]
    fn test_resolve_source_prefers_flag() {
        let config = Config::default();
        let source = resolve_source(Some(Path::new("tiles.json")), &config);
        assert!(matches!(source, TileSource::File(_)));
        assert!(matches!(resolve_source(None, &config), TileSource::Mock(_)));
    }
}
