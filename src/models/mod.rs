//! Data models for tiles, tile items and their values.
//!
//! Models are independent of form projection and of any delivery surface
//! (CLI or web API).

pub mod tile;
pub mod value;

// Re-export all model types
pub use tile::{validate_tiles, ItemKind, Tile, TileItem, TileLayout};
pub use value::{format_value, parse_value_for_kind, TileValue};
