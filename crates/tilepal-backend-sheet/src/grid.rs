//! Grid tile assignment.
//!
//! Turns an ordered sprite sequence into animated tiles laid out on a
//! palette grid. Two independent rules are involved:
//!
//! - **Placement**: tile `j` sits at `(j mod chunk, -(j div chunk))`, where
//!   `chunk = sheet_width / (animation_count * cell_size)`.
//! - **Stride interleaving**: the sprite at position `count` goes to tile
//!   `(count mod stride) + stride * (count div (stride * animation_count))`,
//!   frame `(count div stride) mod animation_count`. Inside each block of
//!   `stride * animation_count` sprites, tile `t` frame `f` takes the sprite
//!   at block offset `f * stride + t`.
//!
//! The routing is injective, so a slot is never written twice. When the tile
//! count is not a multiple of `stride` (and tiles have more than one frame)
//! the last block routes sprites past the final tile; that is reported as
//! [`PaletteError::StrideOverflow`].

use tilepal_spec::{
    AnimatedTileSpec, GridCoord, PaletteConfig, PaletteError, PlacedTile, SpriteSequence,
    TileGrid,
};

/// Inputs to the grid computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParams {
    /// Frames per tile.
    pub animation_count: usize,
    /// Distance between consecutive frames of one tile.
    pub stride: usize,
    /// Source sheet width in pixels.
    pub sheet_width: u32,
    /// Cell size in pixels.
    pub cell_size: u32,
    pub min_speed: f32,
    pub max_speed: f32,
}

impl GridParams {
    /// Takes everything but the sheet width from `config`.
    pub fn from_config(config: &PaletteConfig, sheet_width: u32) -> Self {
        Self {
            animation_count: config.frames_per_tile(),
            stride: config.stride_len(),
            sheet_width,
            cell_size: config.cell_size,
            min_speed: config.min_speed,
            max_speed: config.max_speed(),
        }
    }
}

/// Where one sprite lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRoute {
    pub tile: usize,
    pub frame: usize,
}

/// Returns the number of tiles `sprites` sprites make.
///
/// Fails with `InvalidSpriteCount` unless `sprites` is a non-zero multiple of
/// `animation_count`.
pub fn check_sprite_count(sprites: usize, animation_count: usize) -> Result<usize, PaletteError> {
    if animation_count == 0 || sprites == 0 || sprites % animation_count != 0 {
        return Err(PaletteError::InvalidSpriteCount {
            sprites,
            animation_count,
        });
    }
    Ok(sprites / animation_count)
}

/// Tile columns per palette row.
pub fn chunk_width(
    sheet_width: u32,
    animation_count: usize,
    cell_size: u32,
) -> Result<u32, PaletteError> {
    let tile_width = animation_count as u64 * cell_size as u64;
    let chunk = if tile_width == 0 {
        0
    } else {
        sheet_width as u64 / tile_width
    };

    if chunk == 0 {
        return Err(PaletteError::DegenerateChunkWidth {
            sheet_width,
            animation_count,
            cell_size,
        });
    }
    // chunk <= sheet_width, so it fits.
    Ok(chunk as u32)
}

/// Grid position of tile `index`.
///
/// # Panics
///
/// Panics if `chunk` is zero. [`chunk_width`] never returns zero.
pub fn grid_coord(index: usize, chunk: u32) -> GridCoord {
    let chunk = chunk as usize;
    GridCoord::new((index % chunk) as i32, -((index / chunk) as i32))
}

/// Creates `total_tiles` empty tiles at their grid positions.
///
/// # Panics
///
/// Panics if `chunk` is zero and `total_tiles` is not.
pub fn compute_grid(total_tiles: usize, chunk: u32, params: &GridParams) -> Vec<PlacedTile> {
    (0..total_tiles)
        .map(|j| PlacedTile {
            coord: grid_coord(j, chunk),
            tile: AnimatedTileSpec::new(params.animation_count, params.min_speed, params.max_speed),
        })
        .collect()
}

/// Tile and frame for the sprite at position `count`.
///
/// # Panics
///
/// Panics if `stride` or `animation_count` is zero.
pub fn route(count: usize, stride: usize, animation_count: usize) -> SlotRoute {
    SlotRoute {
        tile: count % stride + stride * (count / (stride * animation_count)),
        frame: (count / stride) % animation_count,
    }
}

/// Writes every sprite into its routed slot.
///
/// Stops at the first sprite routed past the last tile. `tiles` may then be
/// partly filled and should be discarded.
///
/// # Panics
///
/// Panics if `sprites` is non-empty and `stride` or `animation_count` is
/// zero. [`build_tile_grid`] rejects both before calling this.
pub fn assign_sprites(
    sprites: &SpriteSequence,
    tiles: &mut [PlacedTile],
    stride: usize,
    animation_count: usize,
) -> Result<(), PaletteError> {
    for (count, sprite) in sprites.iter().enumerate() {
        let slot = route(count, stride, animation_count);
        let placed = tiles
            .get_mut(slot.tile)
            .ok_or(PaletteError::StrideOverflow {
                stride,
                sprite: count,
                tile: slot.tile,
                total_tiles: sprites.len() / animation_count,
            })?;
        placed.tile.frames[slot.frame] = Some(sprite.clone());
    }
    Ok(())
}

/// Builds the full tile grid for `sprites`.
///
/// Never panics. Zero parameters that would make the helpers above divide by
/// zero come back as errors instead.
pub fn build_tile_grid(
    sprites: &SpriteSequence,
    params: &GridParams,
) -> Result<TileGrid, PaletteError> {
    if params.stride == 0 {
        return Err(PaletteError::InvalidConfig(
            "stride must be positive, got 0".to_string(),
        ));
    }

    let total_tiles = check_sprite_count(sprites.len(), params.animation_count)?;
    let chunk = chunk_width(params.sheet_width, params.animation_count, params.cell_size)?;

    let mut tiles = compute_grid(total_tiles, chunk, params);
    assign_sprites(sprites, &mut tiles, params.stride, params.animation_count)?;

    Ok(TileGrid { chunk, tiles })
}
