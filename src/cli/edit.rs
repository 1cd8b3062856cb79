//! Edit command: apply field edits to a tile and save it.

use crate::cli::common::{
    fetch_tiles, load_config, print_json, require_tile, resolve_source, CliError, CliResult,
};
use crate::forms::{FieldError, RendererRegistry};
use crate::models::Tile;
use crate::services::{replace_tile, EditSession, TileCard};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Edit fields of a tile, validate, and save
#[derive(Debug, Clone, Args)]
pub struct EditArgs {
    /// Tile id (e.g., "sales_q1")
    #[arg(long, value_name = "ID")]
    pub tile: String,

    /// Field assignment as KEY=VALUE (repeatable, keys as shown by `project`)
    #[arg(long = "set", value_name = "KEY=VALUE", required = true)]
    pub assignments: Vec<String>,

    /// JSON tiles file; the saved tile is written back to it
    #[arg(short, long, value_name = "FILE")]
    pub tiles: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output of the edit command.
#[derive(Debug, Serialize)]
struct EditResponse {
    saved: bool,
    persisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tile: Option<Tile>,
    errors: Vec<FieldError>,
}

/// Splits `KEY=VALUE` at the first `=`.
fn parse_assignment(raw: &str) -> CliResult<(&str, &str)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => Err(CliError::validation(format!(
            "Invalid assignment '{raw}'. Expected KEY=VALUE"
        ))),
    }
}

impl EditArgs {
    /// Execute the edit command
    pub fn execute(&self) -> CliResult<()> {
        let assignments = self
            .assignments
            .iter()
            .map(|raw| parse_assignment(raw))
            .collect::<CliResult<Vec<_>>>()?;

        let config = load_config();
        let source = resolve_source(self.tiles.as_deref(), &config);
        let mut tiles = fetch_tiles(&source)?;
        let tile = require_tile(&tiles, &self.tile)?.clone();

        let registry = RendererRegistry::default();
        let mut session = EditSession::new(tile, config.layout_style(), &registry);
        for (key, value) in assignments {
            session
                .set_field_text(key, value)
                .map_err(|e| CliError::validation(e.to_string()))?;
        }

        let updated = match session.save() {
            Ok(updated) => updated,
            Err(errors) => {
                if self.json {
                    print_json(&EditResponse {
                        saved: false,
                        persisted: false,
                        tile: None,
                        errors,
                    })?;
                } else {
                    println!("✗ Validation Errors");
                    for error in &errors {
                        println!("  ✗ {error}");
                    }
                }
                return Err(CliError::validation("Tile not saved"));
            }
        };

        replace_tile(&mut tiles, updated.clone());
        let persisted = source
            .store_tiles(&tiles)
            .map_err(|e| CliError::io(format!("Failed to save tiles: {e:#}")))?;
        info!(tile = %updated.id, persisted, "Tile saved");

        if self.json {
            print_json(&EditResponse {
                saved: true,
                persisted,
                tile: Some(updated),
                errors: Vec::new(),
            })?;
        } else {
            println!("✓ Saved");
            if !persisted {
                println!("  (mock source: changes are not persisted)");
            }
            println!();
            print!(
                "{}",
                TileCard::from_tile(&updated, config.display.max_per_column).render_text()
            );
        }

        Ok(())
    }
}
