//! Strongly-typed identifiers and the [`CellPos`] grid position.

use std::fmt;

/// Identifies a building type within the rule tables.
///
/// Building types are registered in a [`RuleSet`](crate::RuleSet) and
/// assigned sequential IDs. `BuildingId(n)` corresponds to the n-th
/// building definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuildingId(pub u32);

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for BuildingId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a resource within the rule tables.
///
/// `ResourceId(n)` corresponds to the n-th resource definition, and
/// indexes the per-resource balance and income vectors in a
/// [`SimSnapshot`](crate::SimSnapshot).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub u32);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ResourceId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing tick counter.
///
/// Incremented each time the simulation advances one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// A cell position on the tile grid.
///
/// `x` is the column in `0..width`, `y` the row in `0..height`.
/// Positions are the stable identity used by all reward bookkeeping:
/// structures never move, so a cell key outlives any structure value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    /// Column index.
    pub x: u32,
    /// Row index.
    pub y: u32,
}

impl CellPos {
    /// Construct a position from column and row.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Row-major flat index for a grid of the given width.
    pub fn index(self, width: u32) -> usize {
        self.y as usize * width as usize + self.x as usize
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(u32, u32)> for CellPos {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}
