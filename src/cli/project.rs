//! Project command: JSON Forms triple for one tile.

use crate::cli::common::{
    fetch_tiles, load_config, print_json, require_tile, resolve_source, CliResult,
};
use crate::forms::{EditorKind, FormTriple, LayoutStyle, RendererRegistry};
use crate::services::EditSession;
use clap::Args;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;

/// Print the data schema, UI schema and initial data of a tile
#[derive(Debug, Clone, Args)]
pub struct ProjectArgs {
    /// Tile id (e.g., "profile")
    #[arg(long, value_name = "ID")]
    pub tile: String,

    /// JSON tiles file (defaults to the configured source)
    #[arg(short, long, value_name = "FILE")]
    pub tiles: Option<PathBuf>,

    /// Lay controls out in a flat list instead of rows
    #[arg(long)]
    pub flat: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output of the project command.
#[derive(Debug, Serialize)]
struct ProjectOutput<'a> {
    #[serde(flatten)]
    triple: &'a FormTriple,
    editors: IndexMap<String, EditorKind>,
}

impl ProjectArgs {
    /// Execute the project command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();
        let source = resolve_source(self.tiles.as_deref(), &config);
        let tiles = fetch_tiles(&source)?;
        let tile = require_tile(&tiles, &self.tile)?;

        let style = if self.flat {
            LayoutStyle::Flat
        } else {
            config.layout_style()
        };
        let registry = RendererRegistry::default();
        let session = EditSession::new(tile.clone(), style, &registry);
        let editors: IndexMap<String, EditorKind> = session.editors().into_iter().collect();

        if self.json {
            print_json(&ProjectOutput {
                triple: session.triple(),
                editors,
            })?;
        } else {
            println!("{} [{}]", tile.title, tile.id);
            println!("\nFields:");
            for (key, prop) in &session.triple().schema.properties {
                let format = prop
                    .format
                    .as_deref()
                    .map_or_else(String::new, |f| format!(" ({f})"));
                let editor = editors
                    .get(key)
                    .map_or("Text", EditorKind::display_name);
                let value = session.data().get(key).map_or_else(String::new, ToString::to_string);
                println!(
                    "  {key:<24} {:<8}{format:<10} {editor:<12} {value}",
                    prop.schema_type.as_str()
                );
            }
        }

        Ok(())
    }
}
