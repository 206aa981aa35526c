//! Stead: a grid city-building simulation environment for
//! reinforcement learning.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Stead sub-crates. For most users, adding `stead` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```ignore
//! use stead::prelude::*;
//!
//! // Wrap any `Simulation` implementation in the road-network variant.
//! let mut env = Env::new(sim, EnvConfig::road_network())?;
//! let mut obs = env.reset(Some(42));
//! loop {
//!     let outcome = env.step_raw(&[agent.pick(&obs)])?;
//!     obs = outcome.observation;
//!     if outcome.done {
//!         break;
//!     }
//! }
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `stead-core` | IDs, tiles, rule tables, trait seams |
//! | [`space`] | `stead-space` | Grid adjacency and road components |
//! | [`obs`] | `stead-obs` | Observation layout, planes, encoder |
//! | [`env`] | `stead-env` | Environment adapter and reward shaping |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, rule tables, and trait seams (`stead-core`).
///
/// Contains the tile and structure model, typed IDs, the
/// [`types::Simulation`] collaborator seam, and error types.
pub use stead_core as types;

/// Grid adjacency and road-network analysis (`stead-space`).
///
/// Bounds-checked 4-connected neighbourhoods and the disjoint
/// road-component analyzer.
pub use stead_space as space;

/// Observation encoding (`stead-obs`).
///
/// Fixed-shape plane bundles, income compression, and the
/// [`obs::Encoder`].
pub use stead_obs as obs;

/// Environment adapter and reward shaping (`stead-env`).
///
/// The [`env::Env`] lifecycle, action codecs, reward configuration,
/// and per-step stats.
pub use stead_env as env;

/// Common imports for typical Stead usage.
///
/// ```rust
/// use stead::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use stead_core::{
        BuildingDef, BuildingId, CellPos, CostModel, Render, ResourceDef, ResourceId, RuleSet,
        SimSnapshot, Simulation, Structure, TerrainKind, TerrainMask, TickId, Tile, TileGrid,
    };

    // Errors
    pub use stead_core::{GridError, RulesError, SimError};
    pub use stead_env::{ActionError, ConfigError, StepError};

    // Space
    pub use stead_space::{component_count, is_adjacent, neighbours4};

    // Observation
    pub use stead_obs::{Encoder, ObsLayout, Observation, Plane};

    // Environment
    pub use stead_env::{
        Action, ActionCodec, ActionEncoding, Env, EnvConfig, Info, InfoValue, NoopPolicy,
        RewardConfig, StepOutcome, StepStats,
    };
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use stead_test_utils::FixtureWorld;

    #[test]
    fn facade_wires_a_full_episode() {
        let mut env = Env::new(FixtureWorld::new(6, 6), EnvConfig::expansion()).unwrap();
        let obs = env.reset(Some(9));
        assert_eq!(obs.terrain.shape(), (6, 6, 7));
        let outcome = env.step(Action::NoOp).unwrap();
        assert!(!outcome.done);
    }
}
