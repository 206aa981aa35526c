//! 4-connected neighbourhood over the tile grid (N/S/E/W).
//!
//! Off-grid neighbours are excluded: corner cells have two neighbours,
//! edge cells three. There is no diagonal adjacency anywhere in the
//! environment — buildability and road scoring both use this module.

use smallvec::SmallVec;
use stead_core::{CellPos, Tile, TileGrid};

const OFFSETS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// The in-bounds orthogonal neighbours of `pos`.
pub fn neighbours4(grid: &TileGrid, pos: CellPos) -> SmallVec<[CellPos; 4]> {
    let mut result = SmallVec::new();
    for (dx, dy) in OFFSETS {
        let nx = pos.x as i64 + dx as i64;
        let ny = pos.y as i64 + dy as i64;
        if nx < 0 || ny < 0 {
            continue;
        }
        let n = CellPos::new(nx as u32, ny as u32);
        if grid.contains(n) {
            result.push(n);
        }
    }
    result
}

/// Whether any orthogonal neighbour of `pos` satisfies `predicate`.
pub fn is_adjacent(grid: &TileGrid, pos: CellPos, predicate: impl Fn(&Tile) -> bool) -> bool {
    neighbours4(grid, pos)
        .into_iter()
        .any(|n| predicate(grid.tile(n)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stead_core::TerrainKind;

    fn grid(w: u32, h: u32) -> TileGrid {
        TileGrid::new(w, h, TerrainKind::Land).unwrap()
    }

    #[test]
    fn interior_has_four_neighbours() {
        let g = grid(5, 5);
        let n = neighbours4(&g, CellPos::new(2, 2));
        assert_eq!(n.len(), 4);
        assert!(n.contains(&CellPos::new(2, 1))); // north
        assert!(n.contains(&CellPos::new(2, 3))); // south
        assert!(n.contains(&CellPos::new(1, 2))); // west
        assert!(n.contains(&CellPos::new(3, 2))); // east
    }

    #[test]
    fn corner_has_two_neighbours() {
        let g = grid(5, 5);
        let n = neighbours4(&g, CellPos::new(0, 0));
        assert_eq!(n.len(), 2);
        assert!(n.contains(&CellPos::new(1, 0)));
        assert!(n.contains(&CellPos::new(0, 1)));
    }

    #[test]
    fn edge_has_three_neighbours() {
        let g = grid(5, 5);
        let n = neighbours4(&g, CellPos::new(2, 0));
        assert_eq!(n.len(), 3);
    }

    #[test]
    fn single_cell_has_none() {
        let g = grid(1, 1);
        assert!(neighbours4(&g, CellPos::new(0, 0)).is_empty());
    }

    #[test]
    fn is_adjacent_checks_neighbours_not_self() {
        let mut g = grid(3, 3);
        let center = CellPos::new(1, 1);
        g.set(center, Tile::Terrain(TerrainKind::Peak));
        // The peak is at the center; the center itself never matches.
        assert!(!is_adjacent(&g, center, |t| t.terrain() == TerrainKind::Peak));
        assert!(is_adjacent(&g, CellPos::new(1, 0), |t| {
            t.terrain() == TerrainKind::Peak
        }));
        assert!(!is_adjacent(&g, CellPos::new(0, 2), |t| {
            t.terrain() == TerrainKind::Peak
        }));
    }

    proptest! {
        #[test]
        fn neighbours_symmetric(
            w in 1u32..8,
            h in 1u32..8,
            x in 0u32..8,
            y in 0u32..8,
        ) {
            let g = grid(w, h);
            let pos = CellPos::new(x % w, y % h);
            for n in neighbours4(&g, pos) {
                prop_assert!(
                    neighbours4(&g, n).contains(&pos),
                    "neighbour symmetry violated between {pos} and {n}",
                );
            }
        }

        #[test]
        fn neighbours_are_distance_one(
            w in 2u32..8,
            h in 2u32..8,
            x in 0u32..8,
            y in 0u32..8,
        ) {
            let g = grid(w, h);
            let pos = CellPos::new(x % w, y % h);
            for n in neighbours4(&g, pos) {
                let dx = (n.x as i64 - pos.x as i64).abs();
                let dy = (n.y as i64 - pos.y as i64).abs();
                prop_assert_eq!(dx + dy, 1);
            }
        }
    }
}
