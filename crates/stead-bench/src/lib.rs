//! Benchmark profiles for the Stead environment.
//!
//! Provides deterministic world builders shared by the criterion
//! benchmarks, so every run measures the same grids.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use stead_core::{CellPos, RuleSet, Structure, TerrainKind, Tile, TileGrid};

/// Build a `width × height` all-land grid with roads laid out in a
/// serpentine: every even row fully paved, odd rows paved in the last
/// column only, so the whole network is one long connected snake.
pub fn serpentine_roads(width: u32, height: u32, rules: &RuleSet) -> TileGrid {
    let road = rules
        .road_id()
        .unwrap_or_else(|| panic!("rule set has no road building"));
    TileGrid::from_fn(width, height, |pos| {
        let paved = pos.y % 2 == 0 || pos.x == width - 1;
        if paved {
            Tile::Occupied {
                terrain: TerrainKind::Land,
                structure: Structure::new(pos, road),
            }
        } else {
            Tile::Terrain(TerrainKind::Land)
        }
    })
    .unwrap_or_else(|e| panic!("bench grid: {e}"))
}

/// Build a grid with `count` isolated road tiles spread two cells
/// apart (worst case for the component counter).
pub fn scattered_roads(width: u32, height: u32, count: usize, rules: &RuleSet) -> TileGrid {
    let road = rules
        .road_id()
        .unwrap_or_else(|| panic!("rule set has no road building"));
    let mut grid = TileGrid::new(width, height, TerrainKind::Land)
        .unwrap_or_else(|e| panic!("bench grid: {e}"));
    let mut placed = 0;
    for y in (0..height).step_by(2) {
        for x in (0..width).step_by(2) {
            if placed == count {
                return grid;
            }
            let pos = CellPos::new(x, y);
            grid.set(
                pos,
                Tile::Occupied {
                    terrain: TerrainKind::Land,
                    structure: Structure::new(pos, road),
                },
            );
            placed += 1;
        }
    }
    grid
}
