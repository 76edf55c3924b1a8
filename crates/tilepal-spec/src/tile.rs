//! Animated tiles and the grid they are laid out on.

use serde::{Deserialize, Serialize};

use crate::sprite::SpriteRef;

/// Cell position on the palette grid. Rows grow downward as `0, -1, -2, ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    pub column: i32,
    pub row: i32,
}

impl GridCoord {
    /// Creates a new coordinate.
    pub fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Coordinate as an `[x, y]` pair.
    pub fn to_array(self) -> [i32; 2] {
        [self.column, self.row]
    }
}

/// One animated tile: a fixed number of frame slots plus playback bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimatedTileSpec {
    /// Frame slots in playback order. `None` until a sprite is assigned.
    pub frames: Vec<Option<SpriteRef>>,
    /// Lower playback speed bound.
    pub min_speed: f32,
    /// Upper playback speed bound.
    pub max_speed: f32,
}

impl AnimatedTileSpec {
    /// Creates a tile with `frame_count` empty slots.
    pub fn new(frame_count: usize, min_speed: f32, max_speed: f32) -> Self {
        Self {
            frames: vec![None; frame_count],
            min_speed,
            max_speed,
        }
    }

    /// Returns true when every slot holds a sprite.
    pub fn is_complete(&self) -> bool {
        self.frames.iter().all(Option::is_some)
    }

    /// Number of slots still empty.
    pub fn empty_slots(&self) -> usize {
        self.frames.iter().filter(|f| f.is_none()).count()
    }

    /// Assigned sprites in slot order, skipping empty slots.
    pub fn sprites(&self) -> impl Iterator<Item = &SpriteRef> {
        self.frames.iter().flatten()
    }
}

/// A tile together with its grid position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedTile {
    pub coord: GridCoord,
    pub tile: AnimatedTileSpec,
}

/// Every tile of a palette, in tile index order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    /// Tile columns per row.
    pub chunk: u32,
    /// Tiles in index order; `tiles[j]` is tile `j`.
    pub tiles: Vec<PlacedTile>,
}

impl TileGrid {
    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns true when every tile has all of its frame slots filled.
    pub fn is_complete(&self) -> bool {
        self.tiles.iter().all(|placed| placed.tile.is_complete())
    }

    /// Returns true if the grid has no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of rows, including a partially filled last row.
    pub fn rows(&self) -> usize {
        if self.chunk == 0 {
            return 0;
        }
        self.tiles.len().div_ceil(self.chunk as usize)
    }

    /// Looks up the tile placed at `coord`.
    pub fn tile_at(&self, coord: GridCoord) -> Option<&AnimatedTileSpec> {
        self.tiles
            .iter()
            .find(|placed| placed.coord == coord)
            .map(|placed| &placed.tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::{SpriteRect, TrailingIndex};

    #[test]
    fn test_new_tile_is_empty() {
        let tile = AnimatedTileSpec::new(3, 2.0, 2.0);
        assert_eq!(tile.frames.len(), 3);
        assert_eq!(tile.empty_slots(), 3);
        assert!(!tile.is_complete());
    }

    #[test]
    fn test_complete_tile() {
        let mut tile = AnimatedTileSpec::new(2, 1.0, 1.0);
        for (i, slot) in tile.frames.iter_mut().enumerate() {
            *slot = Some(SpriteRef::new(
                format!("s_{}", i),
                SpriteRect::new(0, 0, 4, 4),
                &TrailingIndex,
            ));
        }
        assert!(tile.is_complete());
        assert_eq!(tile.sprites().count(), 2);
    }

    #[test]
    fn test_rows_round_up() {
        let placed = |j: i32| PlacedTile {
            coord: GridCoord::new(j % 2, -(j / 2)),
            tile: AnimatedTileSpec::new(1, 1.0, 1.0),
        };
        let grid = TileGrid {
            chunk: 2,
            tiles: (0..3).map(placed).collect(),
        };
        assert_eq!(grid.rows(), 2);
        assert!(grid.tile_at(GridCoord::new(0, -1)).is_some());
        assert!(grid.tile_at(GridCoord::new(1, -1)).is_none());
    }
}
