//! tilepal Sprite-Sheet Backend
//!
//! Turns sprite sheets into animated tile palettes.
//!
//! # Features
//!
//! - **Grid assignment**: stride-interleaved routing of sprites into tile
//!   frame slots and row-major placement of tiles on the palette grid
//! - **Slicing**: uniform grid slicing or explicit `<sheet>.slices.json` files
//! - **Asset stores**: a filesystem store and an in-memory store behind one trait
//! - **Validation first**: every input check runs before anything is created
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use tilepal_backend_sheet::generate::generate_palette;
//! use tilepal_backend_sheet::store::{MemorySheet, MemoryStore};
//! use tilepal_spec::PaletteConfig;
//!
//! let mut store = MemoryStore::new();
//! store.add_sheet("terrain.png", MemorySheet::grid("terrain", 16, 3, 24));
//!
//! let report = generate_palette(&mut store, Path::new("terrain.png"), &PaletteConfig::default())
//!     .unwrap();
//! assert_eq!(report.tile_count(), 16);
//! assert_eq!(report.chunk, 5);
//! ```

pub mod generate;
pub mod grid;
pub mod png;
pub mod slice;
pub mod store;

// Re-export main types for convenience
pub use generate::{
    generate_palette, generate_palettes, plan_palette, BatchError, GenerateError, PalettePlan,
};
pub use grid::{
    assign_sprites, build_tile_grid, check_sprite_count, chunk_width, compute_grid, GridParams,
};
pub use crate::png::{PngError, SheetImage};
pub use slice::{SliceError, SliceFile, SliceOptions};
pub use store::{AssetStore, FsAssetStore, LogLevel, MemoryStore, PaletteHandle, StoreError};
