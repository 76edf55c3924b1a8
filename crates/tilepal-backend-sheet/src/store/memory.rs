//! In-memory asset store.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use tilepal_spec::{
    CellSize, PaletteManifest, SpriteRect, SpriteRef, SpriteSequence, TileAsset, TrailingIndex,
    PALETTE_EXTENSION,
};

use super::{encode_tile, unique_name, AssetStore, LogLevel, PaletteHandle, StoreError};
use crate::slice::SliceOptions;

/// A pre-sliced sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySheet {
    pub width: u32,
    pub height: u32,
    /// Sprites in any order.
    pub sprites: Vec<SpriteRef>,
}

impl MemorySheet {
    /// A sheet of `columns` x `rows` cells named `<stem>_<index>`.
    pub fn grid(stem: &str, columns: u32, rows: u32, cell_size: u32) -> Self {
        let sprites = (0..rows)
            .flat_map(|row| (0..columns).map(move |column| (row, column)))
            .map(|(row, column)| {
                SpriteRef::new(
                    format!("{}_{}", stem, row * columns + column),
                    SpriteRect::new(column * cell_size, row * cell_size, cell_size, cell_size),
                    &TrailingIndex,
                )
            })
            .collect();
        Self {
            width: columns * cell_size,
            height: rows * cell_size,
            sprites,
        }
    }
}

/// Keeps sheets, folders, palettes, and tiles in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sheets: BTreeMap<PathBuf, MemorySheet>,
    other_assets: BTreeSet<PathBuf>,
    folders: BTreeSet<PathBuf>,
    palettes: BTreeMap<PathBuf, PaletteManifest>,
    tiles: BTreeMap<PathBuf, TileAsset>,
    messages: Vec<(LogLevel, String)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an image asset.
    pub fn add_sheet(&mut self, path: impl Into<PathBuf>, sheet: MemorySheet) {
        self.sheets.insert(path.into(), sheet);
    }

    /// Adds an asset that is not an image.
    pub fn add_other(&mut self, path: impl Into<PathBuf>) {
        self.other_assets.insert(path.into());
    }

    pub fn folders(&self) -> &BTreeSet<PathBuf> {
        &self.folders
    }

    pub fn palettes(&self) -> &BTreeMap<PathBuf, PaletteManifest> {
        &self.palettes
    }

    pub fn palette(&self, path: &Path) -> Option<&PaletteManifest> {
        self.palettes.get(path)
    }

    pub fn tiles(&self) -> &BTreeMap<PathBuf, TileAsset> {
        &self.tiles
    }

    pub fn tile(&self, path: &Path) -> Option<&TileAsset> {
        self.tiles.get(path)
    }

    pub fn messages(&self) -> &[(LogLevel, String)] {
        &self.messages
    }

    /// Returns true if no folder, palette, or tile has been created.
    pub fn is_pristine(&self) -> bool {
        self.folders.is_empty() && self.palettes.is_empty() && self.tiles.is_empty()
    }

    fn sheet(&self, source: &Path) -> Result<&MemorySheet, StoreError> {
        self.sheets
            .get(source)
            .ok_or_else(|| StoreError::NotFound(source.to_path_buf()))
    }
}

impl AssetStore for MemoryStore {
    fn is_image(&self, source: &Path) -> bool {
        self.sheets.contains_key(source)
    }

    fn load_ordered_sprites(
        &mut self,
        source: &Path,
        _options: &SliceOptions,
    ) -> Result<SpriteSequence, StoreError> {
        Ok(SpriteSequence::ordered(self.sheet(source)?.sprites.clone()))
    }

    fn read_sheet_width(&mut self, source: &Path) -> Result<u32, StoreError> {
        Ok(self.sheet(source)?.width)
    }

    fn create_palette(
        &mut self,
        dest_dir: &Path,
        name: &str,
        cell: CellSize,
    ) -> Result<PaletteHandle, StoreError> {
        let file = |n: &str| dest_dir.join(format!("{}.{}", n, PALETTE_EXTENSION));
        let name = unique_name(name, |candidate| self.palettes.contains_key(&file(candidate)));
        let handle = PaletteHandle {
            path: file(&name),
            manifest: PaletteManifest::new(name, cell),
        };
        self.palettes
            .insert(handle.path.clone(), handle.manifest.clone());
        Ok(handle)
    }

    fn create_folder(&mut self, dest_dir: &Path, name: &str) -> Result<PathBuf, StoreError> {
        let name = unique_name(name, |candidate| {
            self.folders.contains(&dest_dir.join(candidate))
        });
        let path = dest_dir.join(name);
        self.folders.insert(path.clone());
        Ok(path)
    }

    fn persist(&mut self, tile: &TileAsset, path: &Path) -> Result<String, StoreError> {
        let folder = path.parent().unwrap_or_else(|| Path::new(""));
        if !self.folders.contains(folder) {
            return Err(StoreError::NotFound(folder.to_path_buf()));
        }
        let (_, hash) = encode_tile(tile)?;
        self.tiles.insert(path.to_path_buf(), tile.clone());
        Ok(hash)
    }

    fn save_palette(&mut self, palette: &PaletteHandle) -> Result<PathBuf, StoreError> {
        match self.palettes.get_mut(&palette.path) {
            Some(manifest) => {
                *manifest = palette.manifest.clone();
                Ok(palette.path.clone())
            }
            None => Err(StoreError::UnknownPalette(palette.path.clone())),
        }
    }

    fn log(&mut self, level: LogLevel, message: &str) {
        self.messages.push((level, message.to_string()));
    }
}
