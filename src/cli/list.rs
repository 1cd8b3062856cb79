//! List command: tile cards.

use crate::cli::common::{fetch_tiles, load_config, print_json, resolve_source, CliResult};
use crate::services::TileCard;
use clap::Args;
use std::path::PathBuf;

/// Show every tile as a card with its items grouped into columns
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// JSON tiles file (defaults to the configured source)
    #[arg(short, long, value_name = "FILE")]
    pub tiles: Option<PathBuf>,

    /// Items per card column (defaults to config)
    #[arg(long, value_name = "N")]
    pub max_per_column: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    /// Execute the list command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();
        let source = resolve_source(self.tiles.as_deref(), &config);
        let tiles = fetch_tiles(&source)?;

        let max_per_column = self
            .max_per_column
            .unwrap_or(config.display.max_per_column);
        let cards: Vec<TileCard> = tiles
            .iter()
            .map(|tile| TileCard::from_tile(tile, max_per_column))
            .collect();

        if self.json {
            print_json(&cards)?;
        } else {
            for (idx, card) in cards.iter().enumerate() {
                if idx > 0 {
                    println!();
                }
                print!("{}", card.render_text());
            }
        }

        Ok(())
    }
}
