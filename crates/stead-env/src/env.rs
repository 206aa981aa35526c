//! The environment adapter: episode lifecycle over a simulation.

use std::error::Error;
use std::fmt;

use stead_core::{CellPos, Render, SimError, Simulation, TickId};
use stead_obs::{Encoder, ObsLayout, Observation};

use crate::action::{Action, ActionCodec};
use crate::config::{ActionEncoding, ConfigError, EnvConfig};
use crate::info::{Info, DEBUG_OBSERVATION_KEY, TOTAL_REWARD_KEY};
use crate::reward::{ActionOutcome, RewardShaper, RewardState, StepStats};

/// Result of one successful [`Env::step`] call.
#[derive(Clone, Debug)]
pub struct StepOutcome {
    /// The encoded observation after this tick.
    pub observation: Observation,
    /// Reward earned by the action that produced this tick.
    pub reward: f64,
    /// Whether the episode just terminated.
    pub done: bool,
    /// Diagnostics, always including the cumulative episode reward.
    pub info: Info,
    /// Reward breakdown for this step.
    pub stats: StepStats,
}

/// Errors from [`Env::step`].
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// The episode already terminated; call
    /// [`reset`](Env::reset) to continue.
    EpisodeOver,
    /// The simulation collaborator failed while advancing the tick.
    /// Propagated unmodified.
    Sim(SimError),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EpisodeOver => write!(f, "episode is over; reset to continue"),
            Self::Sim(e) => write!(f, "simulation failure: {e}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sim(e) => Some(e),
            Self::EpisodeOver => None,
        }
    }
}

/// Turn-based environment over a [`Simulation`].
///
/// Owns the simulation and all per-episode reward state exclusively.
/// `step` and `reset` take `&mut self`, so the borrow checker rules out
/// concurrent or reentrant use; callers wanting parallel episodes run
/// one instance per worker.
///
/// # Example
///
/// ```ignore
/// let mut env = Env::new(sim, EnvConfig::expansion())?;
/// let mut obs = env.reset(Some(42));
/// while let Ok(outcome) = env.step_raw(&agent.act(&obs)) {
///     obs = outcome.observation;
///     if outcome.done {
///         break;
///     }
/// }
/// ```
pub struct Env<S: Simulation> {
    sim: S,
    config: EnvConfig,
    codec: ActionCodec,
    encoder: Encoder,
    shaper: RewardShaper,
    state: RewardState,
    total_reward: f64,
    next_seed: u64,
    done: bool,
}

impl<S: Simulation> Env<S> {
    /// Wrap a simulation.
    ///
    /// Validates the configuration against the simulation's dimensions
    /// and rule tables, and derives the observation layout once; both
    /// are fixed for the instance's lifetime. A freshly constructed
    /// environment is ready to step — the simulation arrives in its
    /// initial state — but most callers [`reset`](Env::reset) first to
    /// pick a seed.
    pub fn new(sim: S, config: EnvConfig) -> Result<Self, ConfigError> {
        config.validate(&sim)?;
        let rules = sim.rules();
        let codec = match config.action_encoding {
            ActionEncoding::MultiDiscrete => ActionCodec::MultiDiscrete {
                buildings: rules.building_count() as u32,
                width: sim.width(),
                height: sim.height(),
            },
            ActionEncoding::FlatIndex => ActionCodec::FlatIndex {
                width: sim.width(),
                height: sim.height(),
                building: rules.road_id().ok_or(ConfigError::NoRoadBuilding)?,
            },
        };
        let encoder = Encoder::new(sim.width(), sim.height(), rules);
        let shaper = RewardShaper::new(config.reward.clone(), rules.clone());
        let state = shaper.reset_state(&sim.snapshot());
        Ok(Self {
            sim,
            config,
            codec,
            encoder,
            shaper,
            state,
            total_reward: 0.0,
            next_seed: 0,
            done: false,
        })
    }

    /// Store the seed used by the next [`reset`](Env::reset) call that
    /// does not pass one explicitly.
    pub fn seed(&mut self, seed: u64) {
        self.next_seed = seed;
    }

    /// Start a fresh episode and return its initial observation.
    ///
    /// Resets the simulation (with `seed`, or the stored one), replaces
    /// the reward state, and zeroes the episode total.
    pub fn reset(&mut self, seed: Option<u64>) -> Observation {
        let seed = seed.unwrap_or(self.next_seed);
        self.next_seed = seed;
        self.sim.reset(seed);
        let state = self.shaper.reset_state(&self.sim.snapshot());
        self.state = state;
        self.total_reward = 0.0;
        self.done = false;
        self.encoder.encode(&self.sim.snapshot(), &self.sim)
    }

    /// Apply one typed action and advance one tick.
    ///
    /// Invalid actions (out-of-range target, useless click) never fail:
    /// the simulation reports them as having no effect and the reward
    /// shaper charges the penalty. Only a terminated episode or a
    /// simulation failure produce an error.
    pub fn step(&mut self, action: Action) -> Result<StepOutcome, StepError> {
        if self.done {
            return Err(StepError::EpisodeOver);
        }
        let outcome = self.perform(action);
        self.advance_and_observe(outcome)
    }

    /// Decode a raw action through the configured codec and step.
    ///
    /// A malformed raw action becomes a penalized no-effect step, never
    /// an error — episodes survive anything an agent can emit.
    pub fn step_raw(&mut self, raw: &[u32]) -> Result<StepOutcome, StepError> {
        if self.done {
            return Err(StepError::EpisodeOver);
        }
        match self.codec.decode(raw) {
            Ok(action) => self.step(action),
            Err(_) => self.advance_and_observe(ActionOutcome::NoEffect),
        }
    }

    /// Forward the current snapshot to an external display.
    pub fn render(&self, display: &mut dyn Render) {
        display.show(&self.sim.snapshot());
    }

    /// Cumulative reward over the current episode.
    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// Current simulation tick.
    pub fn tick(&self) -> TickId {
        self.sim.snapshot().tick
    }

    /// Whether the episode has terminated.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// The raw action codec in use.
    pub fn codec(&self) -> &ActionCodec {
        &self.codec
    }

    /// The observation shape contract.
    pub fn layout(&self) -> &ObsLayout {
        self.encoder.layout()
    }

    /// The active configuration.
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// The wrapped simulation.
    pub fn simulation(&self) -> &S {
        &self.sim
    }

    fn perform(&mut self, action: Action) -> ActionOutcome {
        match action {
            Action::NoOp => ActionOutcome::NoOp,
            Action::Build { at, building } => {
                if !self.in_bounds(at) {
                    ActionOutcome::NoEffect
                } else if self.sim.left_click(at, building) {
                    ActionOutcome::Effective
                } else {
                    ActionOutcome::NoEffect
                }
            }
            Action::Demolish { at } => {
                if !self.in_bounds(at) {
                    ActionOutcome::NoEffect
                } else if self.sim.right_click(at) {
                    ActionOutcome::Effective
                } else {
                    ActionOutcome::NoEffect
                }
            }
        }
    }

    fn advance_and_observe(&mut self, outcome: ActionOutcome) -> Result<StepOutcome, StepError> {
        self.sim.advance().map_err(StepError::Sim)?;

        let snap = self.sim.snapshot();
        let stats = self.shaper.compute(&snap, outcome, &mut self.state);
        let reward = stats.total();
        self.total_reward += reward;
        let done = snap.tick.0 >= self.config.max_ticks;
        self.done = done;

        let observation = self.encoder.encode(&snap, &self.sim);
        let mut info = Info::new();
        info.insert(TOTAL_REWARD_KEY, self.total_reward);
        if self.config.debug_observation {
            info.insert(DEBUG_OBSERVATION_KEY, self.encoder.terrain_codes(&snap));
        }

        Ok(StepOutcome {
            observation,
            reward,
            done,
            info,
            stats,
        })
    }

    fn in_bounds(&self, at: CellPos) -> bool {
        at.x < self.sim.width() && at.y < self.sim.height()
    }
}

impl<S: Simulation + fmt::Debug> fmt::Debug for Env<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Env")
            .field("tick", &self.tick())
            .field("total_reward", &self.total_reward)
            .field("done", &self.done)
            .finish()
    }
}
