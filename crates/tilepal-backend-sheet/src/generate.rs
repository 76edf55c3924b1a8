//! Palette generation pipeline.
//!
//! Drives an [`AssetStore`] through one generation run per source sheet.
//! All input checks (image type, config, sprite count, chunk width, stride)
//! happen while planning. Nothing is created in the store until the plan is
//! complete, so a rejected input leaves no palette, folder, or tile behind.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tilepal_spec::{
    is_safe_asset_name, CellSize, GenerationReport, OrderKey, PaletteConfig, PaletteError,
    TileAsset, TileGrid, TileOutput, REPORT_VERSION, TILE_ASSET_EXTENSION,
};

use crate::grid::{build_tile_grid, GridParams};
use crate::slice::SliceOptions;
use crate::store::{relative_asset_path, AssetStore, LogLevel, StoreError};

/// Suffix of the generated palette name.
pub const PALETTE_SUFFIX: &str = ".Palette";
/// Suffix of the generated tile folder name.
pub const TILES_FOLDER_SUFFIX: &str = ".AnimatedTiles";

/// Errors from a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Palette(#[from] PaletteError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A batch stopped at its first failing source.
#[derive(Debug, Error)]
#[error("{}: {error}", .source_path.display())]
pub struct BatchError {
    /// Reports of the sources processed before the failure.
    pub completed: Vec<GenerationReport>,
    /// The failing source.
    pub source_path: PathBuf,
    #[source]
    pub error: GenerateError,
}

/// Everything needed to create a palette, computed without side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct PalettePlan {
    /// Source sheet.
    pub source: PathBuf,
    /// Directory the palette and tile folder go into.
    pub dest_dir: PathBuf,
    /// Sheet file stem; prefix of every generated name.
    pub stem: String,
    pub sheet_width: u32,
    pub sprite_count: usize,
    /// Sprites with no trailing index; they keep their sheet order.
    pub unordered: Vec<String>,
    pub grid: TileGrid,
}

impl PalettePlan {
    /// Name passed to `create_palette`.
    pub fn palette_name(&self) -> String {
        format!("{}{}", self.stem, PALETTE_SUFFIX)
    }

    /// Name passed to `create_folder`.
    pub fn folder_name(&self) -> String {
        format!("{}{}", self.stem, TILES_FOLDER_SUFFIX)
    }

    /// Asset name of tile `index`.
    pub fn tile_name(&self, index: usize) -> String {
        format!("{}_{}", self.stem, index)
    }
}

fn source_stem(source: &Path) -> Result<String, PaletteError> {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !is_safe_asset_name(&stem) {
        return Err(PaletteError::InvalidInputType(source.display().to_string()));
    }
    Ok(stem)
}

/// Validates `source` against `config` and computes its tile grid.
pub fn plan_palette<S: AssetStore + ?Sized>(
    store: &mut S,
    source: &Path,
    config: &PaletteConfig,
) -> Result<PalettePlan, GenerateError> {
    if !store.is_image(source) {
        return Err(PaletteError::InvalidInputType(source.display().to_string()).into());
    }
    config.validate()?;
    let stem = source_stem(source)?;

    let options = SliceOptions {
        cell_size: config.cell_size,
        keep_empty: config.keep_empty,
    };
    let sprites = store.load_ordered_sprites(source, &options)?;
    let sheet_width = store.read_sheet_width(source)?;

    let params = GridParams::from_config(config, sheet_width);
    let grid = build_tile_grid(&sprites, &params)?;

    let unordered = sprites
        .iter()
        .filter(|s| s.key == OrderKey::Unordered)
        .map(|s| s.name.clone())
        .collect();

    Ok(PalettePlan {
        source: source.to_path_buf(),
        dest_dir: source.parent().map(Path::to_path_buf).unwrap_or_default(),
        stem,
        sheet_width,
        sprite_count: sprites.len(),
        unordered,
        grid,
    })
}

/// Creates the palette and tile assets for a finished plan.
///
/// The palette is saved last. A store failure part way through can leave the
/// tile folder with some tiles in it, but never a palette that references
/// tiles that were not written.
fn apply_plan<S: AssetStore + ?Sized>(
    store: &mut S,
    plan: &PalettePlan,
    config: &PaletteConfig,
) -> Result<GenerationReport, StoreError> {
    let cell = CellSize {
        pixels: config.cell_size,
        world: config.world_cell_size(),
    };
    let mut palette = store.create_palette(&plan.dest_dir, &plan.palette_name(), cell)?;

    // The store may rename the folder; every tile path derives from what it returns.
    let tiles_dir = store.create_folder(&plan.dest_dir, &plan.folder_name())?;

    let source_ref = relative_asset_path(&plan.dest_dir, &plan.source);
    let mut assets = Vec::with_capacity(plan.grid.len());
    for (index, placed) in plan.grid.tiles.iter().enumerate() {
        let name = plan.tile_name(index);
        let path = tiles_dir.join(format!("{}.{}", name, TILE_ASSET_EXTENSION));
        store.set_tile(&mut palette, placed.coord, &path)?;
        assets.push((
            TileAsset::from_spec(name, source_ref.clone(), &placed.tile),
            path,
            placed.coord,
        ));
    }

    let mut tiles = Vec::with_capacity(assets.len());
    for (asset, path, coord) in &assets {
        let hash = store.persist(asset, path)?;
        tiles.push(TileOutput {
            path: path.display().to_string(),
            position: coord.to_array(),
            hash,
        });
    }

    let palette_path = store.save_palette(&palette)?;

    Ok(GenerationReport {
        report_version: REPORT_VERSION,
        source: plan.source.display().to_string(),
        palette: palette_path.display().to_string(),
        tiles_dir: tiles_dir.display().to_string(),
        sprite_count: plan.sprite_count,
        animation_count: config.animation_count,
        stride: config.stride,
        cell_size: config.cell_size,
        chunk: plan.grid.chunk,
        rows: plan.grid.rows(),
        tiles,
    })
}

/// Generates one palette from `source`.
///
/// Failures are logged through the store before being returned.
pub fn generate_palette<S: AssetStore + ?Sized>(
    store: &mut S,
    source: &Path,
    config: &PaletteConfig,
) -> Result<GenerationReport, GenerateError> {
    let result = plan_palette(store, source, config).and_then(|plan| {
        if let Some(first) = plan.unordered.first() {
            store.log(
                LogLevel::Warning,
                &format!(
                    "{} sprite(s) in {} have no trailing index and keep their sheet order (first: '{}')",
                    plan.unordered.len(),
                    plan.source.display(),
                    first
                ),
            );
        }
        apply_plan(store, &plan, config).map_err(GenerateError::from)
    });

    match result {
        Ok(report) => {
            store.log(
                LogLevel::Info,
                &format!(
                    "Created tile palette and {} animated tiles of size {}x{} using a stride of {} with {} sprites per tile",
                    report.tile_count(),
                    config.cell_size,
                    config.cell_size,
                    config.stride,
                    config.animation_count
                ),
            );
            Ok(report)
        }
        Err(e) => {
            store.log(LogLevel::Error, &e.to_string());
            Err(e)
        }
    }
}

/// Generates palettes for `sources` in order, stopping at the first failure.
pub fn generate_palettes<S, P>(
    store: &mut S,
    sources: &[P],
    config: &PaletteConfig,
) -> Result<Vec<GenerationReport>, BatchError>
where
    S: AssetStore + ?Sized,
    P: AsRef<Path>,
{
    let mut completed = Vec::with_capacity(sources.len());
    for source in sources {
        let source = source.as_ref();
        match generate_palette(store, source, config) {
            Ok(report) => completed.push(report),
            Err(error) => {
                return Err(BatchError {
                    completed,
                    source_path: source.to_path_buf(),
                    error,
                })
            }
        }
    }
    Ok(completed)
}
