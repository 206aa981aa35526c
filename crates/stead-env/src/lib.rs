//! Turn-based environment adapter for the Stead simulation.
//!
//! [`Env`] wraps a [`Simulation`](stead_core::Simulation) behind the
//! standard RL environment contract: `reset(seed)` starts an episode,
//! `step(action)` decodes one click, advances one tick, and returns the
//! encoded observation, the shaped reward, a termination flag, and an
//! info map. Reward shaping combines one-time milestones, road-adjacency
//! flavor scoring, and road-network connectivity deltas, with all
//! per-episode bookkeeping held in one [`RewardState`] value.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod action;
mod config;
mod env;
mod info;
mod reward;

pub use action::{Action, ActionCodec, ActionError};
pub use config::{ActionEncoding, ConfigError, EnvConfig, NoopPolicy};
pub use env::{Env, StepError, StepOutcome};
pub use info::{Info, InfoValue, DEBUG_OBSERVATION_KEY, TOTAL_REWARD_KEY};
pub use reward::{ActionOutcome, FlavorTable, RewardConfig, RewardShaper, RewardState, StepStats};
