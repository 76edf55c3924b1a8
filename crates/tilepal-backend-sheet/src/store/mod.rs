//! Asset stores.
//!
//! The generator never touches storage directly. Everything it reads or
//! writes goes through an [`AssetStore`]: loading and ordering sprites,
//! creating the palette and tile folder, persisting tiles, and reporting
//! progress. [`FsAssetStore`] works on a directory tree; [`MemoryStore`]
//! keeps everything in memory.

mod fs;
mod memory;

pub use fs::FsAssetStore;
pub use memory::{MemorySheet, MemoryStore};

use std::path::{Path, PathBuf};

use thiserror::Error;
use tilepal_spec::{CellSize, GridCoord, PaletteManifest, SpriteSequence, TileAsset};

use crate::png::PngError;
use crate::slice::{SliceError, SliceOptions};

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Source not found: {0}")]
    NotFound(PathBuf),

    #[error("Could not decode '{path}': {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: PngError,
    },

    #[error("Slicing '{path}' failed: {source}")]
    Slice {
        path: PathBuf,
        #[source]
        source: SliceError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Palette '{0}' was not created by this store")]
    UnknownPalette(PathBuf),
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Severity of a store log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

/// A palette under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteHandle {
    /// Where the store keeps the palette.
    pub path: PathBuf,
    /// Current contents.
    pub manifest: PaletteManifest,
}

impl PaletteHandle {
    /// Directory holding the palette; tile paths are stored relative to it.
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Storage collaborator for palette generation.
pub trait AssetStore {
    /// Returns true if `source` is an image this store can slice.
    fn is_image(&self, source: &Path) -> bool;

    /// Loads every sprite of `source`, ordered by key.
    fn load_ordered_sprites(
        &mut self,
        source: &Path,
        options: &SliceOptions,
    ) -> Result<SpriteSequence, StoreError>;

    /// Width of the source image in pixels.
    fn read_sheet_width(&mut self, source: &Path) -> Result<u32, StoreError>;

    /// Creates an empty palette named `name` in `dest_dir`.
    ///
    /// Stores may defer writing it until [`AssetStore::save_palette`].
    fn create_palette(
        &mut self,
        dest_dir: &Path,
        name: &str,
        cell: CellSize,
    ) -> Result<PaletteHandle, StoreError>;

    /// Creates a folder and returns the path actually used, which differs
    /// from `dest_dir/name` when that name is taken.
    fn create_folder(&mut self, dest_dir: &Path, name: &str) -> Result<PathBuf, StoreError>;

    /// Places the tile asset at `tile_path` on the palette grid.
    fn set_tile(
        &mut self,
        palette: &mut PaletteHandle,
        coord: GridCoord,
        tile_path: &Path,
    ) -> Result<(), StoreError> {
        let relative = relative_asset_path(palette.base_dir(), tile_path);
        palette.manifest.set_tile(coord, relative);
        Ok(())
    }

    /// Writes a tile asset to `path` and returns the BLAKE3 hash of the bytes written.
    fn persist(&mut self, tile: &TileAsset, path: &Path) -> Result<String, StoreError>;

    /// Writes the palette's current contents and returns its path.
    fn save_palette(&mut self, palette: &PaletteHandle) -> Result<PathBuf, StoreError>;

    /// Reports a status or error message to the user.
    fn log(&mut self, level: LogLevel, message: &str);
}

/// First of `name`, `name 1`, `name 2`, ... for which `taken` is false.
pub fn unique_name(name: &str, mut taken: impl FnMut(&str) -> bool) -> String {
    if !taken(name) {
        return name.to_string();
    }
    let mut n = 1u32;
    loop {
        let candidate = format!("{} {}", name, n);
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// `path` relative to `base`, with forward slashes. Falls back to the full
/// path when `path` is not under `base`.
pub fn relative_asset_path(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Serialized tile bytes and their hash.
pub(crate) fn encode_tile(tile: &TileAsset) -> Result<(Vec<u8>, String), StoreError> {
    let bytes = tile.to_json_pretty()?.into_bytes();
    let hash = blake3::hash(&bytes).to_hex().to_string();
    Ok((bytes, hash))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_name() {
        assert_eq!(unique_name("a", |_| false), "a");
        let taken = ["a", "a 1"];
        assert_eq!(unique_name("a", |n| taken.contains(&n)), "a 2");
    }

    #[test]
    fn test_relative_asset_path() {
        assert_eq!(
            relative_asset_path(
                Path::new("art"),
                Path::new("art/terrain.AnimatedTiles/terrain_0.tile.json")
            ),
            "terrain.AnimatedTiles/terrain_0.tile.json"
        );
        assert_eq!(
            relative_asset_path(Path::new("other"), Path::new("art/x.tile.json")),
            "art/x.tile.json"
        );
    }

    #[test]
    fn test_encode_tile_hash_is_stable() {
        let tile = TileAsset {
            name: "t_0".to_string(),
            source: "t.png".to_string(),
            min_speed: 2.0,
            max_speed: 2.0,
            frames: vec![],
        };
        let (bytes_a, hash_a) = encode_tile(&tile).unwrap();
        let (bytes_b, hash_b) = encode_tile(&tile).unwrap();
        assert_eq!(bytes_a, bytes_b);
        assert_eq!(hash_a, hash_b);
        assert_eq!(hash_a.len(), 64);
    }
}
