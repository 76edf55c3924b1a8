//! Persisted documents: animated tile assets and palette manifests.

use serde::{Deserialize, Serialize};

use crate::sprite::SpriteRect;
use crate::tile::{AnimatedTileSpec, GridCoord};

/// File extension of persisted tile assets.
pub const TILE_ASSET_EXTENSION: &str = "tile.json";
/// File extension of persisted palette manifests.
pub const PALETTE_EXTENSION: &str = "palette.json";

/// Reference from a tile frame to a sprite in the source sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRef {
    /// Sprite name.
    pub name: String,
    /// Pixel rectangle in the source sheet.
    pub rect: SpriteRect,
}

/// An animated tile as written to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileAsset {
    /// Asset name, e.g. `terrain_4`.
    pub name: String,
    /// Source sheet the frames point into.
    pub source: String,
    /// Lower playback speed bound.
    pub min_speed: f32,
    /// Upper playback speed bound.
    pub max_speed: f32,
    /// Frames in playback order; `null` marks a slot nothing was routed to.
    pub frames: Vec<Option<FrameRef>>,
}

impl TileAsset {
    /// Builds the persisted form of `tile`.
    pub fn from_spec(name: impl Into<String>, source: impl Into<String>, tile: &AnimatedTileSpec) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            min_speed: tile.min_speed,
            max_speed: tile.max_speed,
            frames: tile
                .frames
                .iter()
                .map(|slot| {
                    slot.as_ref().map(|sprite| FrameRef {
                        name: sprite.name.clone(),
                        rect: sprite.rect,
                    })
                })
                .collect(),
        }
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Cell layout of a palette grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellLayout {
    #[default]
    Rectangle,
}

/// Cell sizing passed to `create_palette`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSize {
    /// Cell size in pixels.
    pub pixels: u32,
    /// Cell size in world units on x, y, z.
    pub world: [f32; 3],
}

/// One placed tile in a palette manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// `[column, row]` on the palette grid.
    pub position: [i32; 2],
    /// Tile asset path, relative to the palette file.
    pub tile: String,
}

/// A palette grid as written to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteManifest {
    /// Palette name, e.g. `terrain.Palette`.
    pub name: String,
    pub cell_layout: CellLayout,
    /// Cell size in pixels.
    pub cell_size_px: u32,
    /// Cell size in world units.
    pub cell_size: [f32; 3],
    /// Placed tiles, in placement order.
    pub tiles: Vec<PaletteEntry>,
}

impl PaletteManifest {
    /// Creates an empty palette.
    pub fn new(name: impl Into<String>, cell: CellSize) -> Self {
        Self {
            name: name.into(),
            cell_layout: CellLayout::Rectangle,
            cell_size_px: cell.pixels,
            cell_size: cell.world,
            tiles: Vec::new(),
        }
    }

    /// Places `tile` at `coord`, replacing whatever was there.
    pub fn set_tile(&mut self, coord: GridCoord, tile: impl Into<String>) {
        let position = coord.to_array();
        let tile = tile.into();
        match self.tiles.iter_mut().find(|e| e.position == position) {
            Some(entry) => entry.tile = tile,
            None => self.tiles.push(PaletteEntry { position, tile }),
        }
    }

    /// Returns the tile asset path at `coord`.
    pub fn tile_at(&self, coord: GridCoord) -> Option<&str> {
        let position = coord.to_array();
        self.tiles
            .iter()
            .find(|e| e.position == position)
            .map(|e| e.tile.as_str())
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
