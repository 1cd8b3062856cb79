//! Validation command for tiles.

use crate::cli::common::{
    fetch_tiles, load_config, print_json, resolve_source, CliError, CliResult,
};
use crate::forms::{project_tile, validate_form, RendererRegistry};
use crate::models::validate_tiles;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Validate tile structure and field values
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// JSON tiles file (defaults to the configured source)
    #[arg(short, long, value_name = "FILE")]
    pub tiles: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// One validation problem.
#[derive(Debug, Serialize)]
struct ValidationMessage {
    /// "structure" or "field"
    category: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

/// Outcome of each check group.
#[derive(Debug, Serialize)]
struct ValidationChecks {
    structure: String,
    fields: String,
}

/// JSON output of the validate command.
#[derive(Debug, Serialize)]
struct ValidationResponse {
    valid: bool,
    tiles: usize,
    errors: Vec<ValidationMessage>,
    checks: ValidationChecks,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();
        let source = resolve_source(self.tiles.as_deref(), &config);
        let tiles = fetch_tiles(&source)?;
        let registry = RendererRegistry::default();

        let mut messages: Vec<ValidationMessage> = validate_tiles(&tiles)
            .into_iter()
            .map(|message| ValidationMessage {
                category: "structure".to_string(),
                message,
                tile: None,
                field: None,
            })
            .collect();
        let structure_ok = messages.is_empty();

        for tile in &tiles {
            let triple = project_tile(tile, config.layout_style());
            for error in validate_form(&triple, &registry, &triple.data) {
                messages.push(ValidationMessage {
                    category: "field".to_string(),
                    message: error.to_string(),
                    tile: Some(tile.id.clone()),
                    field: Some(error.key),
                });
            }
        }
        let fields_ok = messages.iter().all(|m| m.category != "field");

        let status = |ok: bool| String::from(if ok { "passed" } else { "failed" });
        let response = ValidationResponse {
            valid: messages.is_empty(),
            tiles: tiles.len(),
            checks: ValidationChecks {
                structure: status(structure_ok),
                fields: status(fields_ok),
            },
            errors: messages,
        };

        if self.json {
            print_json(&response)?;
        } else {
            if response.valid {
                println!("✓ Validation passed ({} tiles)", response.tiles);
            } else {
                println!("✗ Validation failed");
            }

            println!("\nChecks:");
            println!("  Structure: {}", response.checks.structure);
            println!("  Fields:    {}", response.checks.fields);

            if !response.errors.is_empty() {
                println!("\nIssues:");
                for msg in &response.errors {
                    match &msg.tile {
                        Some(tile) => println!("  ✗ [{tile}] {}", msg.message),
                        None => println!("  ✗ {}", msg.message),
                    }
                }
            }
        }

        if !response.valid {
            return Err(CliError::validation("Validation failed"));
        }

        Ok(())
    }
}
