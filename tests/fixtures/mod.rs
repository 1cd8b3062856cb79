//! Shared test fixtures for CLI and API tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use tileforms::models::{ItemKind, Tile, TileItem, TileLayout};

/// Path to the tileforms binary.
pub fn tileforms_bin() -> &'static str {
    env!("CARGO_BIN_EXE_tileforms")
}

/// Creates a command that reads its config from `config_dir`.
pub fn tileforms_command(config_dir: &Path) -> Command {
    let mut cmd = Command::new(tileforms_bin());
    cmd.env("TILEFORMS_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd
}

/// A small tile covering every item kind.
pub fn test_tile_all_kinds() -> Tile {
    Tile::new(
        "person",
        "Person",
        TileLayout::TwoColumn,
        vec![
            TileItem::new("Full Name", "Ada Lovelace", ItemKind::String),
            TileItem::new("Age", 36, ItemKind::Number),
            TileItem::new("Active", true, ItemKind::Boolean),
            TileItem::new("Birth Date", "1815-12-10", ItemKind::Date),
            TileItem::new("ID Number", "123456789012", ItemKind::Aadhaar),
        ],
    )
}

/// A tile whose stored ID number is malformed.
pub fn test_tile_bad_id() -> Tile {
    Tile::new(
        "broken",
        "Broken",
        TileLayout::SingleColumn,
        vec![TileItem::new("ID Number", "12ab", ItemKind::Aadhaar)],
    )
}

/// A structurally invalid tile: empty title and an unlabeled item.
pub fn test_tile_invalid_structure() -> Tile {
    Tile::new(
        "empty",
        "",
        TileLayout::SingleColumn,
        vec![TileItem::new("", "x", ItemKind::String)],
    )
}

/// Writes tiles as a JSON array.
pub fn write_tiles_file(tiles: &[Tile], path: &Path) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(tiles).map_err(std::io::Error::other)?;
    fs::write(path, json)
}

/// Creates a tiles file in a temp directory and returns its path.
pub fn create_temp_tiles_file(tiles: &[Tile]) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("tiles.json");
    write_tiles_file(tiles, &path).expect("Failed to write tiles file");
    (path, temp_dir)
}

/// Reads a tiles file back.
pub fn read_tiles_file(path: &Path) -> Vec<Tile> {
    let text = fs::read_to_string(path).expect("Failed to read tiles file");
    serde_json::from_str(&text).expect("Failed to parse tiles file")
}

/// Creates a config dir whose config points the mock endpoint at zero delay.
pub fn fast_config_dir() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        temp_dir.path().join("config.toml"),
        "[source]\ndelay_ms = 0\n",
    )
    .expect("Failed to write config");
    temp_dir
}
