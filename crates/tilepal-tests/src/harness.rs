//! Test harness for writing fixture sheets and reading generated assets.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::{DirEntry, WalkDir};

use tilepal_backend_sheet::png::write_rgba_to_vec;
use tilepal_backend_sheet::slice::{slice_file_path, SliceFile};
use tilepal_backend_sheet::SheetImage;
use tilepal_spec::{PaletteManifest, TileAsset};

/// A temporary directory holding fixture sheets and generated output.
pub struct TestHarness {
    /// Working directory for test outputs.
    pub work_dir: TempDir,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().expect("Failed to create work dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.work_dir.path()
    }

    /// Writes an opaque `columns` x `rows` sheet of `cell`-pixel cells.
    ///
    /// Every cell gets its own color so sprites are distinguishable.
    pub fn write_sheet(&self, name: &str, columns: u32, rows: u32, cell: u32) -> PathBuf {
        let mut image = SheetImage::new(columns * cell, rows * cell);
        for row in 0..rows {
            for column in 0..columns {
                let index = row * columns + column;
                let color = [(index * 37 % 256) as u8, (index * 11 % 256) as u8, 128, 255];
                image.fill_rect(column * cell, row * cell, cell, cell, color);
            }
        }
        self.write_image(name, &image)
    }

    /// Writes `image` as a PNG named `name`.
    pub fn write_image(&self, name: &str, image: &SheetImage) -> PathBuf {
        let path = self.path().join(name);
        let bytes = write_rgba_to_vec(image).expect("Failed to encode fixture PNG");
        fs::write(&path, bytes).expect("Failed to write fixture PNG");
        path
    }

    /// Writes a slice file next to `sheet`.
    pub fn write_slices(&self, sheet: &Path, slices: &SliceFile) -> PathBuf {
        let path = slice_file_path(sheet);
        let json = slices.to_json_pretty().expect("Failed to serialize slices");
        fs::write(&path, json).expect("Failed to write slice file");
        path
    }

    /// Writes a text file that is not an image.
    pub fn write_text(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, contents).expect("Failed to write text file");
        path
    }

    /// Every file and directory under the work dir, relative and sorted.
    ///
    /// Directories come right before their contents.
    pub fn entries(&self) -> Vec<String> {
        walk_tree(self.path())
            .map(|(relative, _)| relative)
            .collect()
    }
}

/// Every entry under `root` in file-name order, with its path relative to
/// `root` using forward slashes.
fn walk_tree(root: &Path) -> impl Iterator<Item = (String, DirEntry)> + '_ {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .map(move |entry| {
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            let relative = relative.to_string_lossy().replace('\\', "/");
            (relative, entry)
        })
}

/// Reads a palette manifest.
pub fn read_palette(path: impl AsRef<Path>) -> PaletteManifest {
    let json = fs::read_to_string(path.as_ref()).expect("Failed to read palette");
    PaletteManifest::from_json(&json).expect("Failed to parse palette")
}

/// Reads a tile asset.
pub fn read_tile(path: impl AsRef<Path>) -> TileAsset {
    let json = fs::read_to_string(path.as_ref()).expect("Failed to read tile");
    TileAsset::from_json(&json).expect("Failed to parse tile")
}

/// BLAKE3 hash of every file under `dir`, keyed by relative path.
pub fn hash_tree(dir: &Path) -> BTreeMap<String, String> {
    walk_tree(dir)
        .filter(|(_, entry)| entry.file_type().is_file())
        .map(|(relative, entry)| {
            let bytes = fs::read(entry.path()).expect("Failed to read file");
            (relative, blake3::hash(&bytes).to_hex().to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_entries_include_nested_files() {
        let harness = TestHarness::new();
        harness.write_text("b.txt", "b");
        fs::create_dir(harness.path().join("a.AnimatedTiles")).unwrap();
        fs::write(harness.path().join("a.AnimatedTiles/a_0.tile.json"), "{}").unwrap();

        assert_eq!(
            harness.entries(),
            vec!["a.AnimatedTiles", "a.AnimatedTiles/a_0.tile.json", "b.txt"]
        );
    }

    #[test]
    fn test_hash_tree_skips_directories() {
        let harness = TestHarness::new();
        harness.write_text("b.txt", "b");
        fs::create_dir(harness.path().join("nested")).unwrap();
        fs::write(harness.path().join("nested/c.txt"), "c").unwrap();

        let tree = hash_tree(harness.path());
        let keys: Vec<_> = tree.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b.txt", "nested/c.txt"]);
        assert_eq!(tree["b.txt"], blake3::hash(b"b").to_hex().to_string());
    }
}
