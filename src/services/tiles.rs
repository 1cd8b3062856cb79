//! Tile sources.
//!
//! The mock source stands in for a network endpoint: it waits a fixed delay
//! and then returns the tiles embedded in the binary. The file source reads
//! and writes a JSON array of tiles.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::models::Tile;

/// Default artificial delay of the mock endpoint.
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(300);

/// Tiles returned by the mock endpoint.
pub fn mock_tiles() -> Result<Vec<Tile>> {
    let json_data = include_str!("../data/tiles.json");
    serde_json::from_str(json_data).context("Failed to parse embedded tile data")
}

/// In-memory tile endpoint with a simulated network delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockTileSource {
    delay: Duration,
}

impl Default for MockTileSource {
    fn default() -> Self {
        Self::new(DEFAULT_MOCK_DELAY)
    }
}

impl MockTileSource {
    /// Creates a mock source with the given delay.
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Waits for the configured delay, then returns the embedded tiles.
    pub async fn fetch_tiles(&self) -> Result<Vec<Tile>> {
        debug!(delay_ms = self.delay.as_millis() as u64, "Fetching mock tiles");
        tokio::time::sleep(self.delay).await;
        mock_tiles()
    }
}

/// Tiles stored as a JSON array on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTileSource {
    path: PathBuf,
}

impl FileTileSource {
    /// Creates a file source.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all tiles from the file.
    pub fn load(&self) -> Result<Vec<Tile>> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read tiles file: {}", self.path.display()))?;
        let tiles: Vec<Tile> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse tiles file: {}", self.path.display()))?;
        debug!(count = tiles.len(), path = %self.path.display(), "Loaded tiles");
        Ok(tiles)
    }

    /// Writes all tiles to the file using temp file + rename.
    pub fn save(&self, tiles: &[Tile]) -> Result<()> {
        let content =
            serde_json::to_string_pretty(tiles).context("Failed to serialize tiles")?;
        let temp_path = self.path.with_extension("json.tmp");

        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp tiles file: {}", temp_path.display())
        })?;
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!("Failed to rename temp tiles file to: {}", self.path.display())
        })?;

        info!(count = tiles.len(), path = %self.path.display(), "Saved tiles");
        Ok(())
    }
}

/// Where tiles come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileSource {
    /// Simulated endpoint
    Mock(MockTileSource),
    /// JSON file
    File(FileTileSource),
}

impl TileSource {
    /// Fetches all tiles from the source.
    pub async fn fetch_tiles(&self) -> Result<Vec<Tile>> {
        match self {
            Self::Mock(source) => source.fetch_tiles().await,
            Self::File(source) => source.load(),
        }
    }

    /// Writes tiles back if the source is writable.
    ///
    /// Returns `Ok(false)` for the mock source, which keeps nothing.
    pub fn store_tiles(&self, tiles: &[Tile]) -> Result<bool> {
        match self {
            Self::Mock(_) => Ok(false),
            Self::File(source) => source.save(tiles).map(|()| true),
        }
    }
}

/// Finds a tile by id.
pub fn find_tile<'a>(tiles: &'a [Tile], id: &str) -> Option<&'a Tile> {
    tiles.iter().find(|t| t.id == id)
}

/// Replaces the tile with the same id. Returns false if no tile matched.
pub fn replace_tile(tiles: &mut [Tile], updated: Tile) -> bool {
    match tiles.iter_mut().find(|t| t.id == updated.id) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}
