//! Read-only tile card view.
//!
//! A card shows a tile's items grouped into the layout's columns, with
//! values formatted for display.

use serde::Serialize;

use crate::models::{format_value, Tile, TileLayout};
use crate::services::chunker::chunk_into_columns;

/// Default number of items shown per card column.
pub const DEFAULT_MAX_PER_COLUMN: usize = 3;

/// One label/value line on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardEntry {
    /// Item label
    pub label: String,
    /// Formatted value
    pub value: String,
}

/// Display model of a tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileCard {
    /// Tile id
    pub id: String,
    /// Tile title
    pub title: String,
    /// Layout variant
    pub layout: TileLayout,
    /// Entries grouped by column
    pub columns: Vec<Vec<CardEntry>>,
    /// Number of items that did not fit the columns
    pub hidden: usize,
}

impl TileCard {
    /// Builds the card for a tile.
    pub fn from_tile(tile: &Tile, max_per_column: usize) -> Self {
        let groups = chunk_into_columns(&tile.items, max_per_column, tile.layout.column_count());
        let columns: Vec<Vec<CardEntry>> = groups
            .into_iter()
            .map(|group| {
                group
                    .iter()
                    .map(|item| CardEntry {
                        label: item.label.clone(),
                        value: format_value(&item.value, item.kind),
                    })
                    .collect()
            })
            .collect();
        let shown: usize = columns.iter().map(Vec::len).sum();

        Self {
            id: tile.id.clone(),
            title: tile.title.clone(),
            layout: tile.layout,
            columns,
            hidden: tile.items.len() - shown,
        }
    }

    /// Renders the card as plain text, columns side by side.
    pub fn render_text(&self) -> String {
        let col_width = self
            .columns
            .iter()
            .flatten()
            .map(|e| e.label.chars().count() + e.value.chars().count() + 2)
            .max()
            .unwrap_or(0);
        let rows = self.columns.iter().map(Vec::len).max().unwrap_or(0);

        let mut out = format!("{} [{}] ({})\n", self.title, self.id, self.layout.as_str());
        for row in 0..rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .map(|col| {
                    col.get(row).map_or_else(String::new, |e| {
                        format!("{}: {}", e.label, e.value)
                    })
                })
                .collect();
            let line = cells
                .iter()
                .map(|c| format!("{c:<col_width$}"))
                .collect::<Vec<_>>()
                .join("  ");
            out.push_str("  ");
            out.push_str(line.trim_end());
            out.push('\n');
        }
        if self.hidden > 0 {
            out.push_str(&format!("  (+{} more)\n", self.hidden));
        }
        out
    }
}
