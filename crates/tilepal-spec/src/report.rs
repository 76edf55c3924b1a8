//! Generation report types.

use serde::{Deserialize, Serialize};

/// Current report format version.
pub const REPORT_VERSION: u32 = 1;

/// One persisted tile asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileOutput {
    /// Tile asset path.
    pub path: String,
    /// `[column, row]` on the palette grid.
    pub position: [i32; 2],
    /// Hex-encoded BLAKE3 hash of the persisted bytes.
    pub hash: String,
}

/// Summary of one generated palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub report_version: u32,
    /// Source sheet path.
    pub source: String,
    /// Saved palette manifest path.
    pub palette: String,
    /// Folder holding the tile assets, as created by the store.
    pub tiles_dir: String,
    pub sprite_count: usize,
    pub animation_count: u32,
    pub stride: u32,
    pub cell_size: u32,
    /// Tile columns per row.
    pub chunk: u32,
    pub rows: usize,
    pub tiles: Vec<TileOutput>,
}

impl GenerationReport {
    /// Number of tile assets written.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
