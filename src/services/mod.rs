//! Service layer for business logic.
//!
//! This module contains the tile sources, the edit session and the display
//! helpers that sit between the models/forms layers and the CLI and web API.

pub mod cards;
pub mod chunker;
pub mod session;
pub mod tiles;

// Re-export commonly used types and functions
pub use cards::TileCard;
pub use chunker::chunk_into_columns;
pub use session::EditSession;
pub use tiles::{find_tile, replace_tile, FileTileSource, MockTileSource, TileSource};
