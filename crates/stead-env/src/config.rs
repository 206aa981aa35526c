//! Environment configuration and construction-time validation.
//!
//! All structural problems — empty maps, mismatched rule tables,
//! unusable reward weights — surface as [`ConfigError`] when the
//! environment is built, never during an episode.

use std::error::Error;
use std::fmt;

use stead_core::{Simulation, TerrainKind};

use crate::reward::RewardConfig;

/// Whether a deliberate no-op action is penalized.
///
/// The source revisions disagree on this, so it is policy rather than
/// fixed behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoopPolicy {
    /// A no-op costs nothing.
    #[default]
    Free,
    /// A no-op is penalized like a useless action.
    Penalized,
}

/// Which raw action encoding the environment accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionEncoding {
    /// `(building_or_zero, x, y, click)` tuples.
    MultiDiscrete,
    /// A single flat cell index that always builds the road type;
    /// `width * height` is the no-op.
    FlatIndex,
}

/// Configuration for one [`Env`](crate::Env) instance.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvConfig {
    /// Episode length: `done` turns true once the simulation tick
    /// reaches this value.
    pub max_ticks: u64,
    /// Raw action encoding.
    pub action_encoding: ActionEncoding,
    /// Reward source toggles and weights.
    pub reward: RewardConfig,
    /// Surface the compact terrain codes in the info map (road-network
    /// variants).
    pub debug_observation: bool,
}

impl EnvConfig {
    /// The city-expansion variant: milestone rewards, tuple actions,
    /// long episodes.
    pub fn expansion() -> Self {
        Self {
            max_ticks: 5000,
            action_encoding: ActionEncoding::MultiDiscrete,
            reward: RewardConfig::milestones_only(),
            debug_observation: false,
        }
    }

    /// The road-network variant: flavor and connectivity rewards, flat
    /// road-click actions, short episodes, debug observation in info.
    pub fn road_network() -> Self {
        Self {
            max_ticks: 500,
            action_encoding: ActionEncoding::FlatIndex,
            reward: RewardConfig::road_building(),
            debug_observation: true,
        }
    }

    /// Check this configuration against a simulation's dimensions and
    /// rule tables.
    pub fn validate<S: Simulation>(&self, sim: &S) -> Result<(), ConfigError> {
        if self.max_ticks == 0 {
            return Err(ConfigError::ZeroMaxTicks);
        }
        if sim.width() == 0 || sim.height() == 0 {
            return Err(ConfigError::EmptyMap);
        }
        for kind in TerrainKind::ALL {
            let weight = self.reward.flavor.weight(kind);
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::BadFlavorWeight {
                    terrain: kind,
                    value: weight,
                });
            }
        }
        let rules = sim.rules();
        if self.action_encoding == ActionEncoding::FlatIndex && rules.road_id().is_none() {
            return Err(ConfigError::NoRoadBuilding);
        }
        // The snapshot vectors must agree with the tables the encoder
        // sizes its planes from.
        let snap = sim.snapshot();
        let checks = [
            ("balances", snap.balances.len(), rules.resource_count()),
            ("income", snap.income.len(), rules.resource_count()),
            (
                "building_counts",
                snap.building_counts.len(),
                rules.building_count(),
            ),
        ];
        for (table, got, expected) in checks {
            if got != expected {
                return Err(ConfigError::TableMismatch {
                    table,
                    expected,
                    got,
                });
            }
        }
        Ok(())
    }
}

/// Errors detected when the environment is constructed.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `max_ticks` is zero; the episode could never run.
    ZeroMaxTicks,
    /// The simulation reports a zero-cell map.
    EmptyMap,
    /// A flavor weight is negative, NaN, or infinite.
    BadFlavorWeight {
        /// The terrain whose weight is unusable.
        terrain: TerrainKind,
        /// The offending value.
        value: f64,
    },
    /// Flat-index actions need a road-type building in the tables.
    NoRoadBuilding,
    /// A snapshot vector disagrees with the rule-table sizes.
    TableMismatch {
        /// Which vector mismatched.
        table: &'static str,
        /// Length implied by the rule tables.
        expected: usize,
        /// Length observed in the snapshot.
        got: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxTicks => write!(f, "max_ticks must be at least 1"),
            Self::EmptyMap => write!(f, "simulation map has zero cells"),
            Self::BadFlavorWeight { terrain, value } => {
                write!(f, "flavor weight for {terrain} must be finite and >= 0, got {value}")
            }
            Self::NoRoadBuilding => {
                write!(f, "flat-index actions require a road building in the rule tables")
            }
            Self::TableMismatch {
                table,
                expected,
                got,
            } => {
                write!(f, "snapshot {table} has {got} entries, rule tables imply {expected}")
            }
        }
    }
}

impl Error for ConfigError {}
