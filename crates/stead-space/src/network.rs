//! Disjoint-component analysis of the placed-road graph.
//!
//! Two road cells belong to the same component iff they are connected
//! through orthogonally adjacent road cells. Traversal uses an explicit
//! worklist stack over a coordinate-keyed visited set — no recursion,
//! no reliance on structure identity.

use indexmap::IndexSet;
use stead_core::{CellPos, RuleSet, TileGrid};

use crate::adjacency::neighbours4;

/// Whether the cell at `pos` holds a road-type structure.
pub fn is_road_cell(grid: &TileGrid, rules: &RuleSet, pos: CellPos) -> bool {
    grid.get(pos)
        .and_then(|tile| tile.structure())
        .is_some_and(|s| rules.is_road(s.building))
}

/// All road cells in the grid, in row-major order.
pub fn road_cells(grid: &TileGrid, rules: &RuleSet) -> IndexSet<CellPos> {
    grid.iter()
        .filter(|(_, tile)| {
            tile.structure()
                .is_some_and(|s| rules.is_road(s.building))
        })
        .map(|(pos, _)| pos)
        .collect()
}

/// Number of disjoint road components in the grid.
///
/// Pops an arbitrary road cell from the working set, floods through
/// adjacent road cells removing each, and counts one component per
/// flood start. O(n) in the number of road cells; grid lookups are
/// direct indexing.
///
/// Empty road set → 0; a single isolated road tile is its own
/// component.
pub fn component_count(grid: &TileGrid, rules: &RuleSet) -> usize {
    let mut remaining = road_cells(grid, rules);
    let mut components = 0;
    let mut stack: Vec<CellPos> = Vec::new();

    while let Some(&start) = remaining.first() {
        remaining.swap_remove(&start);
        components += 1;
        stack.push(start);
        while let Some(current) = stack.pop() {
            for n in neighbours4(grid, current) {
                // Only road cells are ever in `remaining`, so a successful
                // removal is both the road test and the visited test.
                if remaining.swap_remove(&n) {
                    stack.push(n);
                }
            }
        }
    }
    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stead_core::{BuildingId, Structure, TerrainKind, Tile};

    fn road_grid(w: u32, h: u32, roads: &[(u32, u32)]) -> (TileGrid, RuleSet) {
        let rules = RuleSet::standard();
        let road = rules.road_id().unwrap();
        let mut grid = TileGrid::new(w, h, TerrainKind::Land).unwrap();
        for &(x, y) in roads {
            let pos = CellPos::new(x, y);
            grid.set(
                pos,
                Tile::Occupied {
                    terrain: TerrainKind::Land,
                    structure: Structure::new(pos, road),
                },
            );
        }
        (grid, rules)
    }

    #[test]
    fn empty_road_set_has_zero_components() {
        let (grid, rules) = road_grid(5, 5, &[]);
        assert_eq!(component_count(&grid, &rules), 0);
    }

    #[test]
    fn isolated_tiles_are_their_own_components() {
        let (grid, rules) = road_grid(7, 7, &[(0, 0), (2, 2), (4, 4), (6, 0)]);
        assert_eq!(component_count(&grid, &rules), 4);
    }

    #[test]
    fn orthogonal_chain_is_one_component() {
        let (grid, rules) = road_grid(7, 7, &[(1, 1), (2, 1), (3, 1), (3, 2), (3, 3)]);
        assert_eq!(component_count(&grid, &rules), 1);
    }

    #[test]
    fn diagonal_touch_does_not_connect() {
        let (grid, rules) = road_grid(5, 5, &[(1, 1), (2, 2)]);
        assert_eq!(component_count(&grid, &rules), 2);
    }

    #[test]
    fn bridging_tile_merges_two_segments() {
        // Two 2-tile segments separated by one cell.
        let (grid, rules) = road_grid(7, 7, &[(1, 3), (2, 3), (4, 3), (5, 3)]);
        assert_eq!(component_count(&grid, &rules), 2);

        let (bridged, rules) = road_grid(7, 7, &[(1, 3), (2, 3), (3, 3), (4, 3), (5, 3)]);
        assert_eq!(component_count(&bridged, &rules), 1);
    }

    #[test]
    fn non_road_structures_are_ignored() {
        let rules = RuleSet::standard();
        let mut grid = TileGrid::new(3, 3, TerrainKind::Forest).unwrap();
        let pos = CellPos::new(1, 1);
        grid.set(
            pos,
            Tile::Occupied {
                terrain: TerrainKind::Forest,
                structure: Structure::new(pos, BuildingId(1)), // cabin
            },
        );
        assert_eq!(component_count(&grid, &rules), 0);
        assert!(!is_road_cell(&grid, &rules, pos));
    }

    proptest! {
        #[test]
        fn component_count_bounded_by_road_count(
            coords in proptest::collection::hash_set((0u32..6, 0u32..6), 0..20)
        ) {
            let roads: Vec<(u32, u32)> = coords.into_iter().collect();
            let (grid, rules) = road_grid(6, 6, &roads);
            let count = component_count(&grid, &rules);
            prop_assert!(count <= roads.len());
            if roads.is_empty() {
                prop_assert_eq!(count, 0);
            } else {
                prop_assert!(count >= 1);
            }
        }
    }
}
