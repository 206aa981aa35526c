//! Stateful per-episode reward shaping.
//!
//! Three independent reward sources share one [`RewardState`]:
//! one-time milestones, road-adjacency flavor scores, and
//! road-network connectivity deltas. The state is created at `reset`,
//! mutated only by [`RewardShaper::compute`], and replaced at the next
//! `reset`. Bookkeeping is always maintained; the [`RewardConfig`]
//! toggles decide which terms reach the returned total.

use indexmap::IndexSet;

use stead_core::{CellPos, RuleSet, SimSnapshot, TerrainKind};
use stead_space::{component_count, is_road_cell, neighbours4};

use crate::config::NoopPolicy;

/// Divisor applied to the post-merge component count when networks
/// merge.
const MERGE_SCALE: f64 = 5.0;

/// Per-terrain weights used by road-adjacency scoring.
///
/// High-value terrain (peaks, mountains, forest) rewards roads built
/// alongside it; water is worthless to reach.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlavorTable {
    weights: [f64; TerrainKind::COUNT],
}

impl FlavorTable {
    /// Table with explicit weights, indexed by terrain channel.
    pub fn new(weights: [f64; TerrainKind::COUNT]) -> Self {
        Self { weights }
    }

    /// The weight for `kind`.
    pub fn weight(&self, kind: TerrainKind) -> f64 {
        self.weights[kind.channel()]
    }

    /// All weights, indexed by terrain channel.
    pub fn weights(&self) -> &[f64; TerrainKind::COUNT] {
        &self.weights
    }
}

impl Default for FlavorTable {
    /// Peak/mountain/forest 3, land/coast 1, water/deep-water 0.
    fn default() -> Self {
        Self::new([3.0, 3.0, 3.0, 1.0, 1.0, 0.0, 0.0])
    }
}

/// Which reward sources are active and how they are weighted.
#[derive(Clone, Debug, PartialEq)]
pub struct RewardConfig {
    /// Award one-time milestones (first resource, first building type,
    /// first income).
    pub milestones: bool,
    /// Award road-adjacency flavor scores.
    pub road_flavor: bool,
    /// Award connectivity deltas when road networks merge.
    pub connectivity: bool,
    /// Bonus granted per milestone key.
    pub milestone_bonus: f64,
    /// Penalty subtracted when an action had no effect.
    pub useless_penalty: f64,
    /// Whether a deliberate no-op is penalized like a useless action.
    pub noop_policy: NoopPolicy,
    /// Per-terrain flavor weights.
    pub flavor: FlavorTable,
}

impl RewardConfig {
    /// Milestones only: the city-expansion variant.
    pub fn milestones_only() -> Self {
        Self {
            milestones: true,
            road_flavor: false,
            connectivity: false,
            milestone_bonus: 1.0,
            useless_penalty: 1.0,
            noop_policy: NoopPolicy::Free,
            flavor: FlavorTable::default(),
        }
    }

    /// Flavor plus connectivity: the road-network variant.
    pub fn road_building() -> Self {
        Self {
            milestones: false,
            road_flavor: true,
            connectivity: true,
            milestone_bonus: 1.0,
            useless_penalty: 1.0,
            noop_policy: NoopPolicy::Free,
            flavor: FlavorTable::default(),
        }
    }
}

/// How the agent's action turned out, as reported by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The click changed the world.
    Effective,
    /// The click was valid in form but did nothing (occupied cell,
    /// unaffordable build, out-of-range target, malformed raw action).
    NoEffect,
    /// The agent deliberately did nothing.
    NoOp,
}

/// Per-episode reward bookkeeping.
///
/// One value per episode; every set is keyed by grid coordinates, the
/// stable identity of placed structures.
#[derive(Clone, Debug, PartialEq)]
pub struct RewardState {
    /// Per-resource: first positive balance already rewarded.
    resources_rewarded: Vec<bool>,
    /// Per building type: first placement already rewarded.
    buildings_rewarded: Vec<bool>,
    /// Per-resource: first positive income already rewarded.
    income_rewarded: Vec<bool>,
    /// Road cells already processed by flavor scoring.
    seen_roads: IndexSet<CellPos>,
    /// Neighbour tiles whose flavor has been credited.
    credited_tiles: IndexSet<CellPos>,
    /// Disjoint road-component count after the previous step.
    road_components: usize,
}

impl RewardState {
    /// Fresh state sized for the rule tables.
    fn new(rules: &RuleSet) -> Self {
        Self {
            resources_rewarded: vec![false; rules.resource_count()],
            buildings_rewarded: vec![false; rules.building_count()],
            income_rewarded: vec![false; rules.resource_count()],
            seen_roads: IndexSet::new(),
            credited_tiles: IndexSet::new(),
            road_components: 0,
        }
    }

    /// The stored component count.
    pub fn road_components(&self) -> usize {
        self.road_components
    }

    /// Whether the neighbour tile at `pos` has been credited.
    pub fn is_credited(&self, pos: CellPos) -> bool {
        self.credited_tiles.contains(&pos)
    }
}

/// Reward breakdown for one step.
///
/// Disabled sources report zero; [`total`](StepStats::total) is the
/// reward returned to the agent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepStats {
    /// Milestone bonuses awarded this step.
    pub milestone_reward: f64,
    /// Road-adjacency flavor scores this step.
    pub flavor_reward: f64,
    /// Connectivity-delta term this step.
    pub connectivity_reward: f64,
    /// Useless-action penalty this step (zero or negative).
    pub penalty: f64,
    /// Disjoint road components after this step.
    pub road_components: usize,
}

impl StepStats {
    /// Sum of all terms.
    pub fn total(&self) -> f64 {
        self.milestone_reward + self.flavor_reward + self.connectivity_reward + self.penalty
    }
}

/// Computes the per-step reward and maintains the episode state.
#[derive(Clone, Debug)]
pub struct RewardShaper {
    config: RewardConfig,
    rules: RuleSet,
}

impl RewardShaper {
    /// Build a shaper for the given configuration and rule tables.
    pub fn new(config: RewardConfig, rules: RuleSet) -> Self {
        Self { config, rules }
    }

    /// The active configuration.
    pub fn config(&self) -> &RewardConfig {
        &self.config
    }

    /// Fresh episode state, primed against the initial snapshot.
    ///
    /// Roads present in the freshly generated map count as already
    /// seen, and the initial component count becomes the delta
    /// baseline, so nothing pre-existing is ever rewarded.
    pub fn reset_state(&self, snap: &SimSnapshot<'_>) -> RewardState {
        let mut state = RewardState::new(&self.rules);
        for s in snap.structures {
            if self.rules.is_road(s.building) {
                state.seen_roads.insert(s.pos);
            }
        }
        state.road_components = component_count(snap.grid, &self.rules);
        state
    }

    /// Shape the reward for one step.
    pub fn compute(
        &self,
        snap: &SimSnapshot<'_>,
        outcome: ActionOutcome,
        state: &mut RewardState,
    ) -> StepStats {
        let mut stats = StepStats::default();

        let milestone = self.milestones(snap, state);
        if self.config.milestones {
            stats.milestone_reward = milestone;
        }

        let flavor = self.road_flavor(snap, state);
        if self.config.road_flavor {
            stats.flavor_reward = flavor;
        }

        let connectivity = self.connectivity_delta(snap, state);
        if self.config.connectivity {
            stats.connectivity_reward = connectivity;
        }
        stats.road_components = state.road_components;

        let penalized = match outcome {
            ActionOutcome::Effective => false,
            ActionOutcome::NoEffect => true,
            ActionOutcome::NoOp => self.config.noop_policy == NoopPolicy::Penalized,
        };
        if penalized {
            stats.penalty = -self.config.useless_penalty;
        }

        stats
    }

    /// One-time achievement bonuses. Flags flip the first tick a
    /// condition holds and never flip back.
    fn milestones(&self, snap: &SimSnapshot<'_>, state: &mut RewardState) -> f64 {
        let bonus = self.config.milestone_bonus;
        let mut reward = 0.0;
        for (flag, &balance) in state.resources_rewarded.iter_mut().zip(snap.balances) {
            if !*flag && balance > 0.0 {
                *flag = true;
                reward += bonus;
            }
        }
        for (flag, &count) in state.buildings_rewarded.iter_mut().zip(snap.building_counts) {
            if !*flag && count > 0 {
                *flag = true;
                reward += bonus;
            }
        }
        for (flag, &income) in state.income_rewarded.iter_mut().zip(snap.income) {
            if !*flag && income > 0.0 {
                *flag = true;
                reward += bonus;
            }
        }
        reward
    }

    /// Score roads that appeared since the last step.
    ///
    /// Each orthogonal neighbour of a new road earns its terrain
    /// flavor once per episode; a neighbour that is itself a road
    /// instead costs the new tile's own flavor, discouraging doubled
    /// roads.
    fn road_flavor(&self, snap: &SimSnapshot<'_>, state: &mut RewardState) -> f64 {
        let mut reward = 0.0;
        for s in snap.structures {
            if !self.rules.is_road(s.building) || state.seen_roads.contains(&s.pos) {
                continue;
            }
            let own_flavor = self.config.flavor.weight(snap.grid.tile(s.pos).terrain());
            for n in neighbours4(snap.grid, s.pos) {
                if is_road_cell(snap.grid, &self.rules, n) {
                    reward -= own_flavor;
                } else if state.credited_tiles.insert(n) {
                    reward += self.config.flavor.weight(snap.grid.tile(n).terrain());
                }
            }
            state.seen_roads.insert(s.pos);
        }
        reward
    }

    /// `sign(previous - new) * new / 5`, with the stored count updated
    /// unconditionally. Positive only when separate networks merged.
    fn connectivity_delta(&self, snap: &SimSnapshot<'_>, state: &mut RewardState) -> f64 {
        let new_count = component_count(snap.grid, &self.rules);
        let sign = (state.road_components as i64 - new_count as i64).signum() as f64;
        state.road_components = new_count;
        sign * new_count as f64 / MERGE_SCALE
    }
}
