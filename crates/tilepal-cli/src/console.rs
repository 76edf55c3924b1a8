//! Console rendering of store log messages.

use colored::Colorize;
use std::path::{Path, PathBuf};
use tilepal_backend_sheet::slice::SliceOptions;
use tilepal_backend_sheet::store::{AssetStore, FsAssetStore, LogLevel, PaletteHandle, StoreError};
use tilepal_spec::{CellSize, GridCoord, SpriteSequence, TileAsset};

const LOG_PREFIX: &str = "Animated Palette:";

/// A filesystem store that prints its log as it goes.
///
/// With `quiet` set nothing is printed; messages are still collected and
/// can be read back with [`ConsoleStore::messages`].
pub struct ConsoleStore {
    inner: FsAssetStore,
    quiet: bool,
}

impl ConsoleStore {
    pub fn new(quiet: bool) -> Self {
        Self {
            inner: FsAssetStore::new(),
            quiet,
        }
    }

    /// Every message logged so far.
    pub fn messages(&self) -> &[(LogLevel, String)] {
        self.inner.messages()
    }
}

/// Prints one log message with its level's styling.
pub fn print_message(level: LogLevel, message: &str) {
    match level {
        LogLevel::Info => println!("{} {}", LOG_PREFIX.cyan().bold(), message),
        LogLevel::Warning => println!("  {} {}", "!".yellow(), message),
        LogLevel::Error => eprintln!("{} {}", LOG_PREFIX.red().bold(), message.red()),
    }
}

impl AssetStore for ConsoleStore {
    fn is_image(&self, source: &Path) -> bool {
        self.inner.is_image(source)
    }

    fn load_ordered_sprites(
        &mut self,
        source: &Path,
        options: &SliceOptions,
    ) -> Result<SpriteSequence, StoreError> {
        self.inner.load_ordered_sprites(source, options)
    }

    fn read_sheet_width(&mut self, source: &Path) -> Result<u32, StoreError> {
        self.inner.read_sheet_width(source)
    }

    fn create_palette(
        &mut self,
        dest_dir: &Path,
        name: &str,
        cell: CellSize,
    ) -> Result<PaletteHandle, StoreError> {
        self.inner.create_palette(dest_dir, name, cell)
    }

    fn create_folder(&mut self, dest_dir: &Path, name: &str) -> Result<PathBuf, StoreError> {
        self.inner.create_folder(dest_dir, name)
    }

    fn set_tile(
        &mut self,
        palette: &mut PaletteHandle,
        coord: GridCoord,
        tile_path: &Path,
    ) -> Result<(), StoreError> {
        self.inner.set_tile(palette, coord, tile_path)
    }

    fn persist(&mut self, tile: &TileAsset, path: &Path) -> Result<String, StoreError> {
        self.inner.persist(tile, path)
    }

    fn save_palette(&mut self, palette: &PaletteHandle) -> Result<PathBuf, StoreError> {
        self.inner.save_palette(palette)
    }

    fn log(&mut self, level: LogLevel, message: &str) {
        if !self.quiet {
            print_message(level, message);
        }
        self.inner.log(level, message);
    }
}
