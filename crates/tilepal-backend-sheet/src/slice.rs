//! Slicing a sheet into named sprites.
//!
//! A sheet is cut either by an explicit slice file next to it
//! (`<sheet>.slices.json`) or, without one, by a uniform grid of
//! `cell_size` cells read left to right, top to bottom.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tilepal_spec::{KeyExtractor, SpriteRect, SpriteRef};

use crate::png::SheetImage;

/// Extension appended to a sheet path to find its slice file.
pub const SLICE_FILE_SUFFIX: &str = "slices.json";

/// Errors raised while slicing.
#[derive(Debug, Error)]
pub enum SliceError {
    /// A named rectangle reaches outside the sheet.
    #[error("Sprite '{name}' ({x},{y} {width}x{height}) lies outside the {sheet_width}x{sheet_height} sheet")]
    OutOfBounds {
        name: String,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        sheet_width: u32,
        sheet_height: u32,
    },

    /// Two slices share a name.
    #[error("Duplicate sprite name: '{0}'")]
    DuplicateName(String),

    /// A slice has zero width or height.
    #[error("Sprite '{0}' has an empty rectangle")]
    EmptyRect(String),

    /// The slice file is not valid JSON.
    #[error("Invalid slice file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Slicing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceOptions {
    /// Grid cell size in pixels.
    pub cell_size: u32,
    /// Keep cells whose pixels are all transparent.
    pub keep_empty: bool,
}

/// One named rectangle in a slice file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SliceEntry {
    pub name: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Contents of a `<sheet>.slices.json` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SliceFile {
    pub sprites: Vec<SliceEntry>,
}

impl SliceFile {
    /// Parses a slice file.
    pub fn from_json(json: &str) -> Result<Self, SliceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Path of the slice file for `sheet`, e.g. `terrain.png.slices.json`.
pub fn slice_file_path(sheet: &Path) -> PathBuf {
    let mut name = sheet.as_os_str().to_owned();
    name.push(".");
    name.push(SLICE_FILE_SUFFIX);
    PathBuf::from(name)
}

/// Cuts `image` into `cell_size` squares named `<stem>_<cell index>`.
///
/// Partial cells at the right and bottom edges are dropped. Cell indices
/// count every full cell, so skipping transparent cells leaves gaps in the
/// numbering rather than renumbering.
pub fn slice_grid(
    image: &SheetImage,
    stem: &str,
    options: &SliceOptions,
    extractor: &dyn KeyExtractor,
) -> Vec<SpriteRef> {
    let cell = options.cell_size;
    if cell == 0 {
        return Vec::new();
    }

    let columns = image.width / cell;
    let rows = image.height / cell;
    let mut sprites = Vec::with_capacity((columns * rows) as usize);

    for row in 0..rows {
        for column in 0..columns {
            let index = row * columns + column;
            let (x, y) = (column * cell, row * cell);
            if !options.keep_empty && image.is_transparent(x, y, cell, cell) {
                continue;
            }
            sprites.push(SpriteRef::new(
                format!("{}_{}", stem, index),
                SpriteRect::new(x, y, cell, cell),
                extractor,
            ));
        }
    }

    sprites
}

/// Turns slice file entries into sprites, checking them against the sheet size.
pub fn slice_entries(
    slices: &SliceFile,
    sheet_width: u32,
    sheet_height: u32,
    extractor: &dyn KeyExtractor,
) -> Result<Vec<SpriteRef>, SliceError> {
    let mut seen = std::collections::HashSet::new();
    let mut sprites = Vec::with_capacity(slices.sprites.len());

    for entry in &slices.sprites {
        if !seen.insert(entry.name.as_str()) {
            return Err(SliceError::DuplicateName(entry.name.clone()));
        }
        if entry.width == 0 || entry.height == 0 {
            return Err(SliceError::EmptyRect(entry.name.clone()));
        }
        let right = entry.x as u64 + entry.width as u64;
        let bottom = entry.y as u64 + entry.height as u64;
        if right > sheet_width as u64 || bottom > sheet_height as u64 {
            return Err(SliceError::OutOfBounds {
                name: entry.name.clone(),
                x: entry.x,
                y: entry.y,
                width: entry.width,
                height: entry.height,
                sheet_width,
                sheet_height,
            });
        }
        sprites.push(SpriteRef::new(
            entry.name.clone(),
            SpriteRect::new(entry.x, entry.y, entry.width, entry.height),
            extractor,
        ));
    }

    Ok(sprites)
}
