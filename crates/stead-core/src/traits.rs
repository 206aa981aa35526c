//! Trait seams between the environment adapter and its collaborators.
//!
//! The adapter never reaches into a concrete simulation type: clicks,
//! tick advancement, snapshots, and affordability all go through these
//! traits, so tests drive the adapter with a fixture world and
//! production code plugs in the real game.

use crate::error::SimError;
use crate::id::{BuildingId, CellPos};
use crate::rules::RuleSet;
use crate::snapshot::SimSnapshot;

/// Affordability queries against the simulation's economy.
///
/// Split from [`Simulation`] so the observation encoder can take the
/// narrow read-only seam it needs for buildability masks.
pub trait CostModel {
    /// Whether `building` is currently affordable at `level`.
    ///
    /// Level 0 asks about a fresh placement; `level + 1` of a placed
    /// structure asks about its next upgrade.
    fn affordable(&self, building: BuildingId, level: u32) -> bool;
}

/// The simulation collaborator behind the environment adapter.
///
/// Implementations own the world state. The adapter calls exactly one
/// click per step, then [`advance`](Simulation::advance), then reads one
/// [`snapshot`](Simulation::snapshot).
pub trait Simulation: CostModel {
    /// The static rule tables this simulation runs under.
    fn rules(&self) -> &RuleSet;

    /// Map width in cells.
    fn width(&self) -> u32;

    /// Map height in cells.
    fn height(&self) -> u32;

    /// Restart from tick 0 with a fresh, seed-determined world.
    fn reset(&mut self, seed: u64);

    /// Left click at `at`: place `building` (or upgrade the occupant when
    /// `building` is `None`, matching the "no building selected" click).
    ///
    /// Returns whether the click changed anything. An unaffordable,
    /// out-of-place, or redundant click is *not* an error — it reports
    /// `false` and the reward shaper turns that into a penalty.
    fn left_click(&mut self, at: CellPos, building: Option<BuildingId>) -> bool;

    /// Right click at `at` (demolish/clear). Returns whether anything
    /// changed.
    fn right_click(&mut self, at: CellPos) -> bool;

    /// Advance the world by one tick.
    ///
    /// Failures here are collaborator failures; the adapter propagates
    /// them to its caller unmodified.
    fn advance(&mut self) -> Result<(), SimError>;

    /// A read view of the current state.
    fn snapshot(&self) -> SimSnapshot<'_>;
}

/// External display collaborator for `render()`.
///
/// Rendering is outside this crate's scope; the adapter only forwards
/// the current snapshot.
pub trait Render {
    /// Present the given snapshot.
    fn show(&mut self, snapshot: &SimSnapshot<'_>);
}
