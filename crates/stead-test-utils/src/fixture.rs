//! A deterministic fixture simulation.

use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use stead_core::{
    BuildingId, CellPos, CostModel, ResourceId, RuleSet, SimError, SimSnapshot, Simulation,
    Structure, TerrainKind, TickId, Tile, TileGrid,
};

/// Cost of placing or upgrading any building, scaled by target level.
const BASE_COST: f64 = 10.0;

/// Per-tick production of a non-road structure, scaled by `level + 1`.
const BASE_PRODUCTION: f64 = 1.0;

/// A small deterministic world implementing the [`Simulation`] seam.
///
/// Economy rules are deliberately simple: every build or upgrade costs
/// gold (`BASE_COST * (level + 1)`), and every non-road structure
/// produces `BASE_PRODUCTION * (level + 1) * efficiency` of the
/// resource `building_id % resource_count` per tick. Terrain comes from
/// a fixed template (all land by default) or seeded generation.
///
/// Scheduling hooks (`grant_at`, `fail_at_tick`) let tests script
/// balance transitions and collaborator failures at exact ticks.
#[derive(Clone, Debug)]
pub struct FixtureWorld {
    rules: RuleSet,
    width: u32,
    height: u32,
    /// Terrain reused by every reset; `None` regenerates from the seed.
    template: Option<TileGrid>,
    grid: TileGrid,
    structures: Vec<Structure>,
    balances: Vec<f64>,
    starting_balances: Vec<f64>,
    income: Vec<f64>,
    counts: Vec<u32>,
    tick: u64,
    /// Scheduled `(tick, resource, amount)` balance grants.
    grants: Vec<(u64, ResourceId, f64)>,
    /// Advancing into this tick fails.
    fail_at: Option<u64>,
}

impl FixtureWorld {
    /// An all-land world under the standard rule tables, with enough
    /// starting gold for a handful of placements.
    pub fn new(width: u32, height: u32) -> Self {
        let rules = RuleSet::standard();
        let grid = TileGrid::new(width, height, TerrainKind::Land)
            .unwrap_or_else(|e| panic!("fixture grid: {e}"));
        let starting = Self::default_balances(&rules);
        Self {
            grid: grid.clone(),
            template: Some(grid),
            balances: starting.clone(),
            starting_balances: starting,
            income: vec![0.0; rules.resource_count()],
            counts: vec![0; rules.building_count()],
            structures: Vec::new(),
            tick: 0,
            grants: Vec::new(),
            fail_at: None,
            width,
            height,
            rules,
        }
    }

    /// A world with seed-generated terrain; every reset regenerates
    /// from the new seed.
    pub fn generated(width: u32, height: u32, seed: u64) -> Self {
        let mut world = Self::new(width, height);
        world.template = None;
        world.grid = Self::generate_terrain(width, height, seed);
        world
    }

    fn default_balances(rules: &RuleSet) -> Vec<f64> {
        let mut balances = vec![0.0; rules.resource_count()];
        balances[0] = 100.0;
        balances
    }

    fn generate_terrain(width: u32, height: u32, seed: u64) -> TileGrid {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        TileGrid::from_fn(width, height, |_| {
            let roll: u32 = rng.random_range(0..100);
            let kind = match roll {
                0..=39 => TerrainKind::Land,
                40..=59 => TerrainKind::Forest,
                60..=69 => TerrainKind::Coast,
                70..=79 => TerrainKind::Mountain,
                80..=84 => TerrainKind::Peak,
                85..=94 => TerrainKind::Water,
                _ => TerrainKind::DeepWater,
            };
            Tile::Terrain(kind)
        })
        .unwrap_or_else(|e| panic!("fixture grid: {e}"))
    }

    /// Overwrite the terrain at one (unoccupied) cell, in both the
    /// current grid and the reset template when one exists.
    pub fn set_tile(&mut self, x: u32, y: u32, kind: TerrainKind) {
        let pos = CellPos::new(x, y);
        self.grid.set(pos, Tile::Terrain(kind));
        if let Some(template) = &mut self.template {
            template.set(pos, Tile::Terrain(kind));
        }
    }

    /// Set a balance now and at every future reset.
    pub fn set_starting_balance(&mut self, resource: ResourceId, amount: f64) {
        self.starting_balances[resource.0 as usize] = amount;
        self.balances[resource.0 as usize] = amount;
    }

    /// Schedule a balance grant applied when the world advances into
    /// `tick`.
    pub fn grant_at(&mut self, tick: u64, resource: ResourceId, amount: f64) {
        self.grants.push((tick, resource, amount));
    }

    /// Make [`advance`](Simulation::advance) fail when stepping into
    /// `tick`.
    pub fn fail_at_tick(&mut self, tick: u64) {
        self.fail_at = Some(tick);
    }

    /// Placement/upgrade cost for a target level.
    pub fn cost(level: u32) -> f64 {
        BASE_COST * (level as f64 + 1.0)
    }

    fn production(&self, s: &Structure) -> Option<(usize, f64)> {
        if self.rules.is_road(s.building) {
            return None;
        }
        let resource = s.building.0 as usize % self.rules.resource_count();
        let amount = BASE_PRODUCTION * (s.level as f64 + 1.0) * s.efficiency as f64;
        Some((resource, amount))
    }

    fn try_upgrade(&mut self, at: CellPos) -> bool {
        let Some(index) = self.structures.iter().position(|s| s.pos == at) else {
            return false;
        };
        let next = self.structures[index].level + 1;
        if !self.affordable(self.structures[index].building, next) {
            return false;
        }
        self.balances[0] -= Self::cost(next);
        self.structures[index].level = next;
        let terrain = self.grid.tile(at).terrain();
        self.grid.set(
            at,
            Tile::Occupied {
                terrain,
                structure: self.structures[index],
            },
        );
        true
    }

    fn try_place(&mut self, at: CellPos, building: BuildingId) -> bool {
        let Some(def) = self.rules.building(building) else {
            return false;
        };
        let tile = match self.grid.get(at) {
            Some(tile) => *tile,
            None => return false,
        };
        if tile.is_occupied() || !def.allowed.contains(tile.terrain()) {
            return false;
        }
        if !self.affordable(building, 0) {
            return false;
        }
        self.balances[0] -= Self::cost(0);
        let structure = Structure::new(at, building);
        self.grid.set(
            at,
            Tile::Occupied {
                terrain: tile.terrain(),
                structure,
            },
        );
        self.structures.push(structure);
        self.counts[building.0 as usize] += 1;
        true
    }
}

impl CostModel for FixtureWorld {
    fn affordable(&self, _building: BuildingId, level: u32) -> bool {
        self.balances[0] >= Self::cost(level)
    }
}

impl Simulation for FixtureWorld {
    fn rules(&self) -> &RuleSet {
        &self.rules
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn reset(&mut self, seed: u64) {
        self.grid = match &self.template {
            Some(template) => template.clone(),
            None => Self::generate_terrain(self.width, self.height, seed),
        };
        self.structures.clear();
        self.balances = self.starting_balances.clone();
        self.income = vec![0.0; self.rules.resource_count()];
        self.counts = vec![0; self.rules.building_count()];
        self.tick = 0;
    }

    fn left_click(&mut self, at: CellPos, building: Option<BuildingId>) -> bool {
        if !self.grid.contains(at) {
            return false;
        }
        match building {
            Some(b) if !self.grid.tile(at).is_occupied() => self.try_place(at, b),
            Some(b) => match self.grid.tile(at).structure() {
                Some(s) if s.building == b => self.try_upgrade(at),
                _ => false,
            },
            None => self.try_upgrade(at),
        }
    }

    fn right_click(&mut self, at: CellPos) -> bool {
        if !self.grid.contains(at) {
            return false;
        }
        let Some(structure) = self.grid.tile(at).structure().copied() else {
            return false;
        };
        let terrain = self.grid.tile(at).terrain();
        self.grid.set(at, Tile::Terrain(terrain));
        self.structures.retain(|s| s.pos != at);
        self.counts[structure.building.0 as usize] -= 1;
        true
    }

    fn advance(&mut self) -> Result<(), SimError> {
        let next = self.tick + 1;
        if self.fail_at == Some(next) {
            return Err(SimError::TickFailed {
                reason: format!("scripted failure at tick {next}"),
            });
        }
        let previous = self.balances.clone();
        for i in 0..self.structures.len() {
            if let Some((resource, amount)) = self.production(&self.structures[i]) {
                self.balances[resource] += amount;
            }
        }
        for &(tick, resource, amount) in &self.grants {
            if tick == next {
                self.balances[resource.0 as usize] += amount;
            }
        }
        for (income, (now, before)) in self
            .income
            .iter_mut()
            .zip(self.balances.iter().zip(&previous))
        {
            *income = now - before;
        }
        self.tick = next;
        Ok(())
    }

    fn snapshot(&self) -> SimSnapshot<'_> {
        SimSnapshot {
            grid: &self.grid,
            structures: &self.structures,
            balances: &self.balances,
            income: &self.income,
            building_counts: &self.counts,
            tick: TickId(self.tick),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_terrain_is_seed_deterministic() {
        let a = FixtureWorld::generated(10, 10, 42);
        let b = FixtureWorld::generated(10, 10, 42);
        let c = FixtureWorld::generated(10, 10, 43);
        assert_eq!(a.snapshot().grid, b.snapshot().grid);
        assert_ne!(a.snapshot().grid, c.snapshot().grid);
    }

    #[test]
    fn build_upgrade_demolish_cycle() {
        let mut world = FixtureWorld::new(5, 5);
        let market = BuildingId(3);
        let at = CellPos::new(2, 2);

        assert!(world.left_click(at, Some(market)));
        assert_eq!(world.snapshot().building_counts[3], 1);
        // Building again on the same cell with the same type upgrades.
        assert!(world.left_click(at, Some(market)));
        assert_eq!(world.snapshot().structures[0].level, 1);
        // A different type on an occupied cell does nothing.
        assert!(!world.left_click(at, Some(BuildingId(0))));

        assert!(world.right_click(at));
        assert_eq!(world.snapshot().building_counts[3], 0);
        assert!(!world.right_click(at));
    }

    #[test]
    fn placement_respects_terrain_and_funds() {
        let mut world = FixtureWorld::new(5, 5);
        // Cabin needs forest; the default map is all land.
        assert!(!world.left_click(CellPos::new(0, 0), Some(BuildingId(1))));
        world.set_tile(0, 0, TerrainKind::Forest);
        assert!(world.left_click(CellPos::new(0, 0), Some(BuildingId(1))));

        let mut broke = FixtureWorld::new(5, 5);
        broke.set_starting_balance(ResourceId(0), 0.0);
        assert!(!broke.left_click(CellPos::new(0, 0), Some(BuildingId(3))));
    }

    #[test]
    fn advance_accrues_income_once_per_tick() {
        let mut world = FixtureWorld::new(5, 5);
        world.left_click(CellPos::new(1, 1), Some(BuildingId(3))); // market -> gold
        world.advance().unwrap();
        let snap = world.snapshot();
        assert_eq!(snap.tick, TickId(1));
        assert_eq!(snap.income[0], 1.0);

        world.advance().unwrap();
        assert_eq!(world.snapshot().income[0], 1.0);
    }

    #[test]
    fn grants_apply_at_exact_tick() {
        let mut world = FixtureWorld::new(5, 5);
        world.grant_at(3, ResourceId(1), 5.0);
        world.advance().unwrap();
        world.advance().unwrap();
        assert_eq!(world.snapshot().balances[1], 0.0);
        world.advance().unwrap();
        assert_eq!(world.snapshot().balances[1], 5.0);
        assert_eq!(world.snapshot().income[1], 5.0);
        world.advance().unwrap();
        assert_eq!(world.snapshot().income[1], 0.0);
    }

    #[test]
    fn scripted_failure_surfaces() {
        let mut world = FixtureWorld::new(3, 3);
        world.fail_at_tick(2);
        assert!(world.advance().is_ok());
        assert!(matches!(
            world.advance(),
            Err(SimError::TickFailed { .. })
        ));
    }

    #[test]
    fn reset_restores_template_and_balances() {
        let mut world = FixtureWorld::new(4, 4);
        world.set_tile(1, 1, TerrainKind::Forest);
        world.left_click(CellPos::new(1, 1), Some(BuildingId(1)));
        world.advance().unwrap();

        world.reset(7);
        let snap = world.snapshot();
        assert_eq!(snap.tick, TickId(0));
        assert!(snap.structures.is_empty());
        assert_eq!(snap.balances[0], 100.0);
        // Template edits survive the reset.
        assert_eq!(
            snap.grid.tile(CellPos::new(1, 1)).terrain(),
            TerrainKind::Forest
        );
    }
}
