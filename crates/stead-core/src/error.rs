//! Error types for the core data model.
//!
//! Each subsystem owns a small enum with manual `Display`/`Error`
//! impls. Configuration problems are fatal at construction time;
//! simulation failures are propagated unmodified by the adapter.

use std::error::Error;
use std::fmt;

/// Errors from [`TileGrid`](crate::TileGrid) construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// Either dimension is zero.
    EmptyGrid,
    /// `width * height` does not fit in `usize`.
    CellCountOverflow {
        /// The requested width.
        width: u32,
        /// The requested height.
        height: u32,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid has zero cells"),
            Self::CellCountOverflow { width, height } => {
                write!(f, "cell count {width}x{height} overflows usize")
            }
        }
    }
}

impl Error for GridError {}

/// Errors from [`RuleSet`](crate::RuleSet) validation.
///
/// A bad rule table is a configuration error: it must abort
/// construction, never surface during an episode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RulesError {
    /// The resource table is empty.
    NoResources,
    /// The building table is empty.
    NoBuildings,
    /// A building definition allows no terrain at all.
    EmptyTerrainMask {
        /// Name of the offending building definition.
        building: String,
    },
    /// A building or resource name is empty.
    UnnamedDefinition,
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoResources => write!(f, "rule set has no resources"),
            Self::NoBuildings => write!(f, "rule set has no buildings"),
            Self::EmptyTerrainMask { building } => {
                write!(f, "building '{building}' allows no terrain")
            }
            Self::UnnamedDefinition => write!(f, "definition has an empty name"),
        }
    }
}

impl Error for RulesError {}

/// Failure raised by the simulation collaborator while advancing a tick.
///
/// The environment adapter does not retry or suppress these; they pass
/// through to the caller unmodified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimError {
    /// The tick could not be advanced.
    TickFailed {
        /// Human-readable description from the collaborator.
        reason: String,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TickFailed { reason } => write!(f, "tick failed: {reason}"),
        }
    }
}

impl Error for SimError {}
