//! Tile, tile item and layout definitions.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

use crate::models::TileValue;

/// Type tag of a tile item.
///
/// A missing tag and any unrecognized tag both resolve to [`ItemKind::String`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Free text
    #[default]
    String,
    /// Integer or decimal number
    Number,
    /// Yes/no flag
    Boolean,
    /// Calendar date in `YYYY-MM-DD` form
    Date,
    /// 12-digit national identification number
    Aadhaar,
}

impl ItemKind {
    /// Resolves a type tag, falling back to `String` for unknown tags.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            "aadhaar" => Self::Aadhaar,
            _ => Self::String,
        }
    }

    /// Returns the serialized tag.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Aadhaar => "aadhaar",
        }
    }
}

impl<'de> Deserialize<'de> for ItemKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Any non-string tag (number, object, null) is treated as unknown
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(tag) => Ok(Self::from_tag(&tag)),
            _ => Ok(Self::String),
        }
    }
}

/// One labeled field of a tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileItem {
    /// Display label, also the base of the field key
    pub label: String,
    /// Current value
    pub value: TileValue,
    /// Type tag (defaults to string)
    #[serde(rename = "type", default)]
    pub kind: ItemKind,
}

impl TileItem {
    /// Creates a new item.
    pub fn new(label: impl Into<String>, value: impl Into<TileValue>, kind: ItemKind) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            kind,
        }
    }
}

/// Visual column layout of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TileLayout {
    /// One column
    #[default]
    SingleColumn,
    /// Two columns
    TwoColumn,
    /// Three columns
    ThreeColumn,
}

impl TileLayout {
    /// Number of visual columns for this layout.
    pub const fn column_count(&self) -> usize {
        match self {
            Self::SingleColumn => 1,
            Self::TwoColumn => 2,
            Self::ThreeColumn => 3,
        }
    }

    /// Returns the serialized name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SingleColumn => "single-column",
            Self::TwoColumn => "two-column",
            Self::ThreeColumn => "three-column",
        }
    }
}

/// A titled panel of labeled items.
///
/// # Validation
///
/// - Title must be non-empty
/// - At least one item
/// - Every item label must be non-empty
/// - IDs must be unique within a tile list (see [`validate_tiles`])
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Unique identifier (e.g., "profile")
    pub id: String,
    /// Display title (e.g., "User Profile")
    pub title: String,
    /// Column layout
    pub layout: TileLayout,
    /// Items in display order
    pub items: Vec<TileItem>,
}

impl Tile {
    /// Creates a new tile.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        layout: TileLayout,
        items: Vec<TileItem>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            layout,
            items,
        }
    }

    /// Checks the tile structure and returns every problem found.
    ///
    /// An empty list means the tile is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push("Title is required".to_string());
        }

        if self.items.is_empty() {
            errors.push("Tile must have at least one item".to_string());
        }

        for (idx, item) in self.items.iter().enumerate() {
            if item.label.trim().is_empty() {
                errors.push(format!("Item {}: Label is required", idx + 1));
            }
        }

        errors
    }
}

/// Validates a list of tiles, prefixing each problem with the tile id.
pub fn validate_tiles(tiles: &[Tile]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for tile in tiles {
        if !seen.insert(tile.id.as_str()) {
            errors.push(format!("[{}] Duplicate tile id", tile.id));
        }
        errors.extend(
            tile.validate()
                .into_iter()
                .map(|e| format!("[{}] {e}", tile.id)),
        );
    }

    errors
}
