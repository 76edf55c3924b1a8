//! tilepal Spec Library
//!
//! Types, configuration, and validation shared by the tilepal palette
//! generator.
//!
//! # Overview
//!
//! A sprite sheet is sliced into named sprites, ordered by the index in
//! their names, and grouped into animated tiles of `animation_count` frames.
//! The tiles are laid out on a palette grid `chunk` columns wide.
//!
//! # Example
//!
//! ```
//! use tilepal_spec::{PaletteConfig, SpriteRect, SpriteRef, SpriteSequence, TrailingIndex};
//!
//! let config = PaletteConfig::from_json(r#"{ "animation_count": 2, "stride": 2 }"#).unwrap();
//! assert!(config.validate().is_ok());
//!
//! let sprites = ["sheet_1", "sheet_0", "sheet_3", "sheet_2"]
//!     .iter()
//!     .map(|name| SpriteRef::new(*name, SpriteRect::new(0, 0, 24, 24), &TrailingIndex))
//!     .collect();
//! let sequence = SpriteSequence::ordered(sprites);
//! assert_eq!(sequence.as_slice()[0].name, "sheet_0");
//! ```
//!
//! # Modules
//!
//! - [`asset`]: Persisted tile asset and palette manifest documents
//! - [`config`]: Palette generation parameters
//! - [`error`]: Error taxonomy for invalid inputs
//! - [`report`]: Generation report types
//! - [`sprite`]: Sprite references, ordering keys, and key extraction
//! - [`tile`]: Animated tiles and the tile grid
//! - [`validation`]: Shared parameter and asset-name validation

pub mod asset;
pub mod config;
pub mod error;
pub mod report;
pub mod sprite;
pub mod tile;
pub mod validation;

// Re-export commonly used types at the crate root
pub use asset::{
    CellLayout, CellSize, FrameRef, PaletteEntry, PaletteManifest, TileAsset, PALETTE_EXTENSION,
    TILE_ASSET_EXTENSION,
};
pub use config::{ConfigOverrides, PaletteConfig};
pub use error::{ErrorCode, PaletteError};
pub use report::{GenerationReport, TileOutput, REPORT_VERSION};
pub use sprite::{KeyExtractor, OrderKey, SpriteRect, SpriteRef, SpriteSequence, TrailingIndex};
pub use tile::{AnimatedTileSpec, GridCoord, PlacedTile, TileGrid};
pub use validation::is_safe_asset_name;
