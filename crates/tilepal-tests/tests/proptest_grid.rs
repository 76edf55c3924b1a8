//! Property-based tests for tile grid assignment using proptest.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p tilepal-tests --test proptest_grid
//! ```

use proptest::prelude::*;
use std::collections::HashSet;

use tilepal_backend_sheet::grid::{build_tile_grid, route, GridParams};
use tilepal_spec::{
    ErrorCode, OrderKey, SpriteRect, SpriteRef, SpriteSequence, TrailingIndex,
};

fn sequence(names: impl IntoIterator<Item = String>) -> SpriteSequence {
    SpriteSequence::ordered(
        names
            .into_iter()
            .map(|name| SpriteRef::new(name, SpriteRect::new(0, 0, 8, 8), &TrailingIndex))
            .collect(),
    )
}

fn numbered(n: usize) -> SpriteSequence {
    sequence((0..n).map(|i| format!("s_{}", i)))
}

fn params(animation_count: usize, stride: usize, sheet_width: u32) -> GridParams {
    GridParams {
        animation_count,
        stride,
        sheet_width,
        cell_size: 8,
        min_speed: 1.0,
        max_speed: 1.0,
    }
}

// ============================================================================
// 1. Assignment
// ============================================================================

proptest! {
    /// When the tile count is a multiple of the stride, every slot is filled
    /// and every sprite appears exactly once.
    #[test]
    fn every_sprite_lands_once(
        animation_count in 1usize..6,
        stride in 1usize..6,
        blocks in 1usize..5,
        chunk in 1u32..8,
    ) {
        let total_tiles = stride * blocks;
        let sprites = numbered(total_tiles * animation_count);
        let width = chunk * animation_count as u32 * 8;

        let grid = build_tile_grid(&sprites, &params(animation_count, stride, width)).unwrap();
        prop_assert_eq!(grid.len(), total_tiles);
        prop_assert!(grid.is_complete());

        let placed: Vec<_> = grid
            .tiles
            .iter()
            .flat_map(|t| t.tile.sprites().map(|s| s.name.clone()))
            .collect();
        let unique: HashSet<_> = placed.iter().cloned().collect();
        prop_assert_eq!(placed.len(), sprites.len());
        prop_assert_eq!(unique.len(), sprites.len());
    }

    /// Routes of distinct sprites never collide.
    #[test]
    fn routes_are_injective(
        animation_count in 1usize..6,
        stride in 1usize..8,
        n in 1usize..200,
    ) {
        let mut seen = HashSet::new();
        for count in 0..n {
            let slot = route(count, stride, animation_count);
            prop_assert!(slot.frame < animation_count);
            prop_assert!(seen.insert((slot.tile, slot.frame)));
        }
    }

    /// Tiles occupy distinct coordinates, row-major with rows going down.
    #[test]
    fn coordinates_are_row_major(
        tiles in 1usize..40,
        chunk in 1u32..10,
    ) {
        let sprites = numbered(tiles);
        let grid = build_tile_grid(&sprites, &params(1, 1, chunk * 8)).unwrap();

        let mut seen = HashSet::new();
        for (j, placed) in grid.tiles.iter().enumerate() {
            prop_assert_eq!(placed.coord.column, (j % chunk as usize) as i32);
            prop_assert_eq!(placed.coord.row, -((j / chunk as usize) as i32));
            prop_assert!(seen.insert(placed.coord));
        }
        prop_assert_eq!(grid.rows(), tiles.div_ceil(chunk as usize));
    }
}

// ============================================================================
// 2. Rejections
// ============================================================================

proptest! {
    /// A count that is not a multiple of the animation count is always rejected.
    #[test]
    fn uneven_counts_rejected(
        animation_count in 2usize..8,
        tiles in 0usize..10,
        extra in 1usize..8,
    ) {
        let extra = extra % animation_count;
        prop_assume!(extra != 0);

        let sprites = numbered(tiles * animation_count + extra);
        let err = build_tile_grid(&sprites, &params(animation_count, 1, 10_000)).unwrap_err();
        prop_assert_eq!(err.code(), ErrorCode::InvalidSpriteCount);
    }

    /// Tile counts that leave a partial stride block overflow.
    #[test]
    fn partial_stride_block_overflows(
        animation_count in 2usize..5,
        stride in 2usize..6,
        blocks in 0usize..4,
        remainder in 1usize..6,
    ) {
        let remainder = remainder % stride;
        prop_assume!(remainder != 0);

        let total_tiles = stride * blocks + remainder;
        let sprites = numbered(total_tiles * animation_count);
        let err = build_tile_grid(&sprites, &params(animation_count, stride, 10_000)).unwrap_err();
        prop_assert_eq!(err.code(), ErrorCode::StrideOverflow);
    }
}

// ============================================================================
// 3. Ordering
// ============================================================================

proptest! {
    /// Ordering is independent of the input order and re-sorting is a no-op.
    #[test]
    fn ordering_is_canonical(indices in prop::collection::vec(0u32..1000, 0..50)) {
        let names: Vec<_> = indices.iter().map(|i| format!("sheet_{}", i)).collect();
        let mut reversed = names.clone();
        reversed.reverse();

        let a = sequence(names);
        let b = sequence(reversed);
        let keys_a: Vec<_> = a.iter().map(|s| s.key).collect();
        let keys_b: Vec<_> = b.iter().map(|s| s.key).collect();
        prop_assert_eq!(&keys_a, &keys_b);
        prop_assert!(a.is_ordered());

        let mut again = a.clone();
        again.resort();
        prop_assert_eq!(again, a);
    }

    /// Unindexed names sort before indexed ones.
    #[test]
    fn unindexed_first(word in "[a-z]{1,8}", index in 0u32..100) {
        let seq = sequence(vec![format!("tile_{}", index), word.clone()]);
        prop_assert_eq!(seq.as_slice()[0].key, OrderKey::Unordered);
        prop_assert_eq!(&seq.as_slice()[0].name, &word);
    }
}
