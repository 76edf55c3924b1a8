//! Filesystem-backed asset store.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use tilepal_spec::{
    CellSize, KeyExtractor, PaletteManifest, SpriteSequence, TileAsset, TrailingIndex,
    PALETTE_EXTENSION,
};

use super::{encode_tile, unique_name, AssetStore, LogLevel, PaletteHandle, StoreError};
use crate::png::{self as sheet_png, has_png_signature, PNG_SIGNATURE};
use crate::slice::{slice_entries, slice_file_path, slice_grid, SliceFile, SliceOptions};

/// Stores palettes and tiles as JSON files next to their source sheet.
///
/// Log messages are collected rather than printed; callers drain them with
/// [`FsAssetStore::take_messages`].
pub struct FsAssetStore {
    extractor: Box<dyn KeyExtractor>,
    messages: Vec<(LogLevel, String)>,
}

impl Default for FsAssetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FsAssetStore {
    /// Creates a store using the `name_<index>` ordering convention.
    pub fn new() -> Self {
        Self::with_key_extractor(Box::new(TrailingIndex))
    }

    /// Creates a store ordering sprites with `extractor`.
    pub fn with_key_extractor(extractor: Box<dyn KeyExtractor>) -> Self {
        Self {
            extractor,
            messages: Vec::new(),
        }
    }

    /// Messages logged so far, oldest first.
    pub fn messages(&self) -> &[(LogLevel, String)] {
        &self.messages
    }

    /// Removes and returns every logged message.
    pub fn take_messages(&mut self) -> Vec<(LogLevel, String)> {
        std::mem::take(&mut self.messages)
    }

    fn read_source(&self, source: &Path) -> Result<Vec<u8>, StoreError> {
        if !source.is_file() {
            return Err(StoreError::NotFound(source.to_path_buf()));
        }
        fs::read(source).map_err(|e| StoreError::io(source, e))
    }

    fn write_file(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        fs::write(path, bytes).map_err(|e| StoreError::io(path, e))
    }
}

fn palette_file(dest_dir: &Path, name: &str) -> PathBuf {
    dest_dir.join(format!("{}.{}", name, PALETTE_EXTENSION))
}

impl AssetStore for FsAssetStore {
    fn is_image(&self, source: &Path) -> bool {
        let mut header = [0u8; PNG_SIGNATURE.len()];
        fs::File::open(source)
            .and_then(|mut file| file.read_exact(&mut header))
            .map(|_| has_png_signature(&header))
            .unwrap_or(false)
    }

    fn load_ordered_sprites(
        &mut self,
        source: &Path,
        options: &SliceOptions,
    ) -> Result<SpriteSequence, StoreError> {
        let bytes = self.read_source(source)?;
        let image = sheet_png::decode_rgba(&bytes).map_err(|e| StoreError::Image {
            path: source.to_path_buf(),
            source: e,
        })?;

        let slice_path = slice_file_path(source);
        let sprites = if slice_path.is_file() {
            let json = fs::read_to_string(&slice_path).map_err(|e| StoreError::io(&slice_path, e))?;
            let slice_err = |e| StoreError::Slice {
                path: slice_path.clone(),
                source: e,
            };
            let slices = SliceFile::from_json(&json).map_err(slice_err)?;
            slice_entries(&slices, image.width, image.height, self.extractor.as_ref())
                .map_err(slice_err)?
        } else {
            let stem = source
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            slice_grid(&image, &stem, options, self.extractor.as_ref())
        };

        Ok(SpriteSequence::ordered(sprites))
    }

    fn read_sheet_width(&mut self, source: &Path) -> Result<u32, StoreError> {
        let bytes = self.read_source(source)?;
        let (width, _) = sheet_png::read_dimensions(&bytes).map_err(|e| StoreError::Image {
            path: source.to_path_buf(),
            source: e,
        })?;
        Ok(width)
    }

    fn create_palette(
        &mut self,
        dest_dir: &Path,
        name: &str,
        cell: CellSize,
    ) -> Result<PaletteHandle, StoreError> {
        fs::create_dir_all(dest_dir).map_err(|e| StoreError::io(dest_dir, e))?;

        let name = unique_name(name, |candidate| palette_file(dest_dir, candidate).exists());
        // The file is written by `save_palette` only.
        Ok(PaletteHandle {
            path: palette_file(dest_dir, &name),
            manifest: PaletteManifest::new(name, cell),
        })
    }

    fn create_folder(&mut self, dest_dir: &Path, name: &str) -> Result<PathBuf, StoreError> {
        let name = unique_name(name, |candidate| dest_dir.join(candidate).exists());
        let path = dest_dir.join(name);
        fs::create_dir_all(&path).map_err(|e| StoreError::io(&path, e))?;
        Ok(path)
    }

    fn persist(&mut self, tile: &TileAsset, path: &Path) -> Result<String, StoreError> {
        let (bytes, hash) = encode_tile(tile)?;
        Self::write_file(path, &bytes)?;
        Ok(hash)
    }

    fn save_palette(&mut self, palette: &PaletteHandle) -> Result<PathBuf, StoreError> {
        let json = palette.manifest.to_json_pretty()?;
        Self::write_file(&palette.path, json.as_bytes())?;
        Ok(palette.path.clone())
    }

    fn log(&mut self, level: LogLevel, message: &str) {
        self.messages.push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::png::{write_rgba_to_vec, SheetImage};
    use tempfile::TempDir;
    use tilepal_spec::GridCoord;

    fn write_sheet(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let mut image = SheetImage::new(width, height);
        image.fill_rect(0, 0, width, height, [200, 100, 50, 255]);
        let path = dir.join(name);
        fs::write(&path, write_rgba_to_vec(&image).unwrap()).unwrap();
        path
    }

    fn options() -> SliceOptions {
        SliceOptions {
            cell_size: 24,
            keep_empty: true,
        }
    }

    #[test]
    fn test_is_image() {
        let dir = TempDir::new().unwrap();
        let sheet = write_sheet(dir.path(), "sheet.png", 48, 24);
        let text = dir.path().join("notes.txt");
        fs::write(&text, "hello").unwrap();

        let store = FsAssetStore::new();
        assert!(store.is_image(&sheet));
        assert!(!store.is_image(&text));
        assert!(!store.is_image(&dir.path().join("missing.png")));
    }

    #[test]
    fn test_load_grid_sprites() {
        let dir = TempDir::new().unwrap();
        let sheet = write_sheet(dir.path(), "terrain.png", 72, 48);

        let mut store = FsAssetStore::new();
        let sprites = store.load_ordered_sprites(&sheet, &options()).unwrap();
        assert_eq!(sprites.len(), 6);
        assert_eq!(sprites.as_slice()[0].name, "terrain_0");
        assert_eq!(sprites.as_slice()[5].name, "terrain_5");
        assert_eq!(store.read_sheet_width(&sheet).unwrap(), 72);
    }

    #[test]
    fn test_load_uses_slice_file() {
        let dir = TempDir::new().unwrap();
        let sheet = write_sheet(dir.path(), "hero.png", 32, 16);
        fs::write(
            slice_file_path(&sheet),
            r#"{ "sprites": [
                { "name": "hero_10", "x": 16, "y": 0, "width": 16, "height": 16 },
                { "name": "hero_2", "x": 0, "y": 0, "width": 16, "height": 16 }
            ] }"#,
        )
        .unwrap();

        let mut store = FsAssetStore::new();
        let sprites = store.load_ordered_sprites(&sheet, &options()).unwrap();
        let names: Vec<_> = sprites.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["hero_2", "hero_10"]);
    }

    #[test]
    fn test_missing_source() {
        let dir = TempDir::new().unwrap();
        let mut store = FsAssetStore::new();
        let err = store
            .load_ordered_sprites(&dir.path().join("nope.png"), &options())
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_create_folder_is_unique() {
        let dir = TempDir::new().unwrap();
        let mut store = FsAssetStore::new();
        let first = store.create_folder(dir.path(), "t.AnimatedTiles").unwrap();
        let second = store.create_folder(dir.path(), "t.AnimatedTiles").unwrap();
        assert_eq!(first, dir.path().join("t.AnimatedTiles"));
        assert_eq!(second, dir.path().join("t.AnimatedTiles 1"));
        assert!(second.is_dir());
    }

    #[test]
    fn test_palette_and_tile_files() {
        let dir = TempDir::new().unwrap();
        let mut store = FsAssetStore::new();
        let cell = CellSize {
            pixels: 24,
            world: [0.24, 0.24, 0.24],
        };

        let mut palette = store.create_palette(dir.path(), "t.Palette", cell).unwrap();
        assert!(!palette.path.exists());

        let folder = store.create_folder(dir.path(), "t.AnimatedTiles").unwrap();
        let tile_path = folder.join("t_0.tile.json");
        let tile = TileAsset {
            name: "t_0".to_string(),
            source: "t.png".to_string(),
            min_speed: 2.0,
            max_speed: 2.0,
            frames: vec![],
        };
        let hash = store.persist(&tile, &tile_path).unwrap();
        assert_eq!(hash.len(), 64);

        store
            .set_tile(&mut palette, GridCoord::new(0, 0), &tile_path)
            .unwrap();
        let saved = store.save_palette(&palette).unwrap();

        let manifest =
            PaletteManifest::from_json(&fs::read_to_string(saved).unwrap()).unwrap();
        assert_eq!(
            manifest.tile_at(GridCoord::new(0, 0)),
            Some("t.AnimatedTiles/t_0.tile.json")
        );
        let persisted =
            TileAsset::from_json(&fs::read_to_string(&tile_path).unwrap()).unwrap();
        assert_eq!(persisted, tile);
    }

    #[test]
    fn test_failed_persist_leaves_no_palette() {
        let dir = TempDir::new().unwrap();
        let mut store = FsAssetStore::new();
        let cell = CellSize {
            pixels: 24,
            world: [0.24, 0.24, 0.24],
        };

        let palette = store.create_palette(dir.path(), "t.Palette", cell).unwrap();
        let tile = TileAsset {
            name: "t_0".to_string(),
            source: "t.png".to_string(),
            min_speed: 2.0,
            max_speed: 2.0,
            frames: vec![],
        };
        // The folder was never created, so the write fails.
        let missing = dir.path().join("t.AnimatedTiles").join("t_0.tile.json");
        assert!(matches!(
            store.persist(&tile, &missing),
            Err(StoreError::Io { .. })
        ));

        assert!(!palette.path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_log_collects_messages() {
        let mut store = FsAssetStore::new();
        store.log(LogLevel::Info, "one");
        store.log(LogLevel::Error, "two");
        assert_eq!(store.messages().len(), 2);
        let taken = store.take_messages();
        assert_eq!(taken[1], (LogLevel::Error, "two".to_string()));
        assert!(store.messages().is_empty());
    }
}
