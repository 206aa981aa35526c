//! The observation encoder.

use stead_core::{BuildingId, CostModel, RuleSet, SimSnapshot, TerrainKind};

use crate::layout::ObsLayout;
use crate::plane::Plane;
use crate::scale::scaled_income;

/// One fixed-shape observation: the bundle of named planes handed to
/// the agent after every step.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    /// Per-resource compressed income in `[-1, 1]`, one value per
    /// resource. Held as a vector rather than broadcast into full
    /// planes; the length is part of the shape contract.
    pub relative_income: Vec<f32>,
    /// Terrain one-hot, `W×H×7`.
    pub terrain: Plane<u8>,
    /// Building-type one-hot with the empty channel dropped, `W×H×B`.
    pub buildings: Plane<u8>,
    /// Level of each occupant relative to the highest-leveled structure
    /// of its type, `W×H×1` in `[0, 1]`. Unoccupied cells are 0.
    pub building_levels: Plane<f32>,
    /// Whether the occupant's next upgrade is affordable, `W×H×1`.
    pub can_upgrade: Plane<u8>,
    /// Per-type placement legality and affordability, `W×H×B`.
    pub can_build: Plane<u8>,
}

/// Pure, deterministic encoder from snapshots to [`Observation`]s.
///
/// Constructed once per environment; the [`ObsLayout`] captured here is
/// the shape contract for every bundle the instance ever produces.
#[derive(Clone, Debug)]
pub struct Encoder {
    layout: ObsLayout,
    rules: RuleSet,
}

impl Encoder {
    /// Build an encoder for a `width × height` map under `rules`.
    pub fn new(width: u32, height: u32, rules: &RuleSet) -> Self {
        Self {
            layout: ObsLayout::new(width, height, rules),
            rules: rules.clone(),
        }
    }

    /// The shape contract.
    pub fn layout(&self) -> &ObsLayout {
        &self.layout
    }

    /// Encode one snapshot.
    ///
    /// `costs` answers the affordability queries behind the `can_build`
    /// and `can_upgrade` masks. A snapshot whose grid does not match
    /// the layout is a caller-contract violation (debug-asserted);
    /// there is no runtime failure mode.
    pub fn encode(&self, snap: &SimSnapshot<'_>, costs: &dyn CostModel) -> Observation {
        let (w, h) = (self.layout.width(), self.layout.height());
        debug_assert_eq!(snap.grid.width(), w, "snapshot width mismatch");
        debug_assert_eq!(snap.grid.height(), h, "snapshot height mismatch");
        debug_assert_eq!(snap.income.len(), self.layout.resource_channels());

        let relative_income = scaled_income(snap.income);

        let mut terrain = Plane::new(w, h, self.layout.terrain_channels());
        for (pos, tile) in snap.grid.iter() {
            terrain.set(pos, tile.terrain().channel(), 1);
        }

        // Building planes index directly by type id; reserving channel 0
        // for "empty" and lopping it off again would be a no-op here
        // because unoccupied cells simply stay all-zero.
        let b = self.layout.building_channels();
        let mut buildings = Plane::new(w, h, b);
        let mut max_level = vec![0u32; b];
        for s in snap.structures {
            let channel = s.building.0 as usize;
            debug_assert!(channel < b, "structure type outside rule tables");
            buildings.set(s.pos, channel, 1);
            max_level[channel] = max_level[channel].max(s.level);
        }

        let mut building_levels = Plane::new(w, h, 1);
        let mut can_upgrade = Plane::new(w, h, 1);
        for s in snap.structures {
            let max = max_level[s.building.0 as usize];
            let value = if max > 0 {
                s.level as f32 / max as f32
            } else {
                // Only level-0 instances exist: every one of them is the
                // best of its kind.
                1.0
            };
            building_levels.set(s.pos, 0, value);
            if costs.affordable(s.building, s.level + 1) {
                can_upgrade.set(s.pos, 0, 1);
            }
        }

        let affordable_now: Vec<bool> = (0..b)
            .map(|i| costs.affordable(BuildingId(i as u32), 0))
            .collect();
        let mut can_build = Plane::new(w, h, b);
        for (pos, tile) in snap.grid.iter() {
            if tile.is_occupied() {
                continue;
            }
            let terrain_kind = tile.terrain();
            for (i, def) in self.rules.buildings().iter().enumerate() {
                if affordable_now[i] && def.allowed.contains(terrain_kind) {
                    can_build.set(pos, i, 1);
                }
            }
        }

        Observation {
            relative_income,
            terrain,
            buildings,
            building_levels,
            can_upgrade,
            can_build,
        }
    }

    /// The compact per-cell terrain-code vector used by road-network
    /// variants: the terrain channel index, or the terrain-category
    /// count when a structure occupies the cell. Row-major.
    pub fn terrain_codes(&self, snap: &SimSnapshot<'_>) -> Vec<f32> {
        snap.grid
            .iter()
            .map(|(_, tile)| {
                if tile.is_occupied() {
                    TerrainKind::COUNT as f32
                } else {
                    tile.terrain().channel() as f32
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stead_core::{CellPos, Structure, TickId, Tile, TileGrid};

    /// Cost model with a fixed affordability cutoff per level.
    struct LevelCap(u32);

    impl CostModel for LevelCap {
        fn affordable(&self, _building: BuildingId, level: u32) -> bool {
            level <= self.0
        }
    }

    fn snapshot_parts(structures: &[Structure]) -> (Vec<f64>, Vec<f64>, Vec<u32>) {
        let rules = RuleSet::standard();
        let balances = vec![0.0; rules.resource_count()];
        let income = vec![0.0; rules.resource_count()];
        let mut counts = vec![0u32; rules.building_count()];
        for s in structures {
            counts[s.building.0 as usize] += 1;
        }
        (balances, income, counts)
    }

    fn encode_with(
        grid: &TileGrid,
        structures: &[Structure],
        income: &[f64],
        costs: &dyn CostModel,
    ) -> Observation {
        let rules = RuleSet::standard();
        let encoder = Encoder::new(grid.width(), grid.height(), &rules);
        let (balances, _, counts) = snapshot_parts(structures);
        let snap = SimSnapshot {
            grid,
            structures,
            balances: &balances,
            income,
            building_counts: &counts,
            tick: TickId(0),
        };
        encoder.encode(&snap, costs)
    }

    fn occupied(grid: &mut TileGrid, pos: CellPos, building: BuildingId, level: u32) -> Structure {
        let terrain = grid.tile(pos).terrain();
        let structure = Structure {
            pos,
            building,
            level,
            efficiency: 1.0,
        };
        grid.set(
            pos,
            Tile::Occupied {
                terrain,
                structure,
            },
        );
        structure
    }

    #[test]
    fn terrain_planes_are_one_hot() {
        let grid = TileGrid::new(4, 3, TerrainKind::Coast).unwrap();
        let income = vec![0.0; 3];
        let obs = encode_with(&grid, &[], &income, &LevelCap(0));
        assert_eq!(obs.terrain.shape(), (4, 3, 7));
        for (pos, _) in grid.iter() {
            let hot: u32 = (0..7).map(|c| obs.terrain.get(pos, c) as u32).sum();
            assert_eq!(hot, 1, "cell {pos} not one-hot");
            assert_eq!(obs.terrain.get(pos, TerrainKind::Coast.channel()), 1);
        }
    }

    #[test]
    fn building_planes_mark_only_occupied_cells() {
        let mut grid = TileGrid::new(5, 5, TerrainKind::Forest).unwrap();
        let s = occupied(&mut grid, CellPos::new(2, 1), BuildingId(1), 0);
        let income = vec![0.0; 3];
        let obs = encode_with(&grid, &[s], &income, &LevelCap(0));
        assert_eq!(obs.buildings.shape(), (5, 5, 4));
        assert_eq!(obs.buildings.get(CellPos::new(2, 1), 1), 1);
        let total: u32 = obs.buildings.as_slice().iter().map(|&v| v as u32).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn levels_normalized_against_type_maximum() {
        let mut grid = TileGrid::new(6, 6, TerrainKind::Forest).unwrap();
        let a = occupied(&mut grid, CellPos::new(0, 0), BuildingId(1), 2);
        let b = occupied(&mut grid, CellPos::new(1, 0), BuildingId(1), 4);
        let income = vec![0.0; 3];
        let obs = encode_with(&grid, &[a, b], &income, &LevelCap(0));
        assert_eq!(obs.building_levels.get(CellPos::new(0, 0), 0), 0.5);
        assert_eq!(obs.building_levels.get(CellPos::new(1, 0), 0), 1.0);
        assert_eq!(obs.building_levels.get(CellPos::new(2, 0), 0), 0.0);
    }

    #[test]
    fn all_level_zero_reads_fully_leveled() {
        let mut grid = TileGrid::new(4, 4, TerrainKind::Forest).unwrap();
        let s = occupied(&mut grid, CellPos::new(3, 3), BuildingId(1), 0);
        let income = vec![0.0; 3];
        let obs = encode_with(&grid, &[s], &income, &LevelCap(0));
        assert_eq!(obs.building_levels.get(CellPos::new(3, 3), 0), 1.0);
    }

    #[test]
    fn can_build_requires_vacancy_terrain_and_funds() {
        let mut grid = TileGrid::new(4, 4, TerrainKind::Forest).unwrap();
        grid.set(CellPos::new(0, 0), Tile::Terrain(TerrainKind::DeepWater));
        let s = occupied(&mut grid, CellPos::new(1, 1), BuildingId(1), 0);
        let income = vec![0.0; 3];

        let obs = encode_with(&grid, &[s], &income, &LevelCap(0));
        // Cabin (id 1) builds on forest.
        assert_eq!(obs.can_build.get(CellPos::new(2, 2), 1), 1);
        // Occupied cell: nothing buildable.
        assert_eq!(obs.can_build.get(CellPos::new(1, 1), 1), 0);
        // Deep water allows none of the standard buildings.
        for c in 0..4 {
            assert_eq!(obs.can_build.get(CellPos::new(0, 0), c), 0);
        }
        // Quarry (id 2) needs mountain or peak.
        assert_eq!(obs.can_build.get(CellPos::new(2, 2), 2), 0);

        /// Cost model that can afford nothing.
        struct Broke;
        impl CostModel for Broke {
            fn affordable(&self, _b: BuildingId, _l: u32) -> bool {
                false
            }
        }
        let broke = encode_with(&grid, &[s], &income, &Broke);
        assert!(broke.can_build.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn can_upgrade_asks_for_next_level() {
        let mut grid = TileGrid::new(4, 4, TerrainKind::Forest).unwrap();
        let low = occupied(&mut grid, CellPos::new(0, 0), BuildingId(1), 0);
        let high = occupied(&mut grid, CellPos::new(1, 0), BuildingId(1), 3);
        let income = vec![0.0; 3];
        // Affordable through level 1: the level-0 cabin can upgrade (to
        // level 1), the level-3 one cannot (level 4 is out of reach).
        let obs = encode_with(&grid, &[low, high], &income, &LevelCap(1));
        assert_eq!(obs.can_upgrade.get(CellPos::new(0, 0), 0), 1);
        assert_eq!(obs.can_upgrade.get(CellPos::new(1, 0), 0), 0);
        assert_eq!(obs.can_upgrade.get(CellPos::new(2, 0), 0), 0);
    }

    #[test]
    fn shapes_invariant_across_snapshots() {
        let rules = RuleSet::standard();
        let encoder = Encoder::new(7, 7, &rules);
        let mut grid = TileGrid::new(7, 7, TerrainKind::Land).unwrap();
        let income_a = vec![0.0; 3];
        let income_b = vec![123.0, -9.0, 0.5];

        let mut shapes = Vec::new();
        for income in [&income_a, &income_b] {
            let (balances, _, counts) = snapshot_parts(&[]);
            let snap = SimSnapshot {
                grid: &grid,
                structures: &[],
                balances: &balances,
                income,
                building_counts: &counts,
                tick: TickId(0),
            };
            let obs = encoder.encode(&snap, &LevelCap(0));
            shapes.push((
                obs.relative_income.len(),
                obs.terrain.shape(),
                obs.buildings.shape(),
                obs.building_levels.shape(),
                obs.can_upgrade.shape(),
                obs.can_build.shape(),
            ));
        }
        assert_eq!(shapes[0], shapes[1]);

        // Mutating the world does not change shapes either.
        let s = occupied(&mut grid, CellPos::new(3, 3), BuildingId(3), 0);
        let (balances, _, counts) = snapshot_parts(&[s]);
        let snap = SimSnapshot {
            grid: &grid,
            structures: &[s],
            balances: &balances,
            income: &income_b,
            building_counts: &counts,
            tick: TickId(5),
        };
        let obs = encoder.encode(&snap, &LevelCap(0));
        assert_eq!(obs.terrain.shape(), shapes[0].1);
        assert_eq!(obs.can_build.shape(), shapes[0].5);
    }

    #[test]
    fn terrain_codes_mark_structures() {
        let rules = RuleSet::standard();
        let encoder = Encoder::new(3, 1, &rules);
        let mut grid = TileGrid::new(3, 1, TerrainKind::Mountain).unwrap();
        let s = occupied(&mut grid, CellPos::new(1, 0), BuildingId(0), 0);
        let (balances, income, counts) = snapshot_parts(&[s]);
        let snap = SimSnapshot {
            grid: &grid,
            structures: &[s],
            balances: &balances,
            income: &income,
            building_counts: &counts,
            tick: TickId(0),
        };
        let codes = encoder.terrain_codes(&snap);
        assert_eq!(
            codes,
            vec![
                TerrainKind::Mountain.channel() as f32,
                TerrainKind::COUNT as f32,
                TerrainKind::Mountain.channel() as f32,
            ]
        );
    }
}
