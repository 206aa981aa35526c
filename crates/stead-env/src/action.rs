//! Typed actions and their raw encodings.
//!
//! The environment accepts a typed [`Action`]; agents usually hold a
//! raw integer encoding instead, decoded through an [`ActionCodec`].
//! Two codecs exist, one per environment variant, and an instance keeps
//! the same codec for its whole lifetime.

use std::error::Error;
use std::fmt;

use stead_core::{BuildingId, CellPos};

/// One decoded agent action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Left click: place `building` at `at`, or upgrade the occupant
    /// when no building is selected.
    Build {
        /// Target cell.
        at: CellPos,
        /// Selected building type; `None` means no building selected.
        building: Option<BuildingId>,
    },
    /// Right click at `at` (demolish/clear).
    Demolish {
        /// Target cell.
        at: CellPos,
    },
    /// Do nothing this tick.
    NoOp,
}

/// Raw-action decoding failure.
///
/// Decoding failures never abort an episode: the adapter converts them
/// into a penalized no-effect step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionError {
    /// The raw slice has the wrong number of components.
    WrongArity {
        /// Components the codec expects.
        expected: usize,
        /// Components received.
        got: usize,
    },
    /// The building component exceeds the table size.
    BuildingOutOfRange {
        /// Received value.
        value: u32,
        /// Maximum accepted value.
        max: u32,
    },
    /// A coordinate lies outside the map.
    CoordOutOfRange {
        /// `"x"` or `"y"`.
        axis: &'static str,
        /// Received value.
        value: u32,
        /// Exclusive upper bound.
        bound: u32,
    },
    /// The flat index exceeds `width * height` (the no-op value).
    IndexOutOfRange {
        /// Received value.
        value: u32,
        /// Maximum accepted value (the no-op index).
        max: u32,
    },
    /// The click component is neither 0 (left) nor 1 (right).
    InvalidClick {
        /// Received value.
        value: u32,
    },
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongArity { expected, got } => {
                write!(f, "expected {expected} action components, got {got}")
            }
            Self::BuildingOutOfRange { value, max } => {
                write!(f, "building component {value} exceeds {max}")
            }
            Self::CoordOutOfRange { axis, value, bound } => {
                write!(f, "{axis} coordinate {value} outside 0..{bound}")
            }
            Self::IndexOutOfRange { value, max } => {
                write!(f, "cell index {value} exceeds no-op index {max}")
            }
            Self::InvalidClick { value } => write!(f, "click kind {value} is not 0 or 1"),
        }
    }
}

impl Error for ActionError {}

/// Decoder from raw integer actions to [`Action`]s.
///
/// The encoding is part of the environment's external contract and
/// never changes within an instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionCodec {
    /// `(building_or_zero, x, y, click)`: building 0 means none
    /// selected, click 1 is a right click (building ignored).
    MultiDiscrete {
        /// Number of building types in the rule tables.
        buildings: u32,
        /// Map width.
        width: u32,
        /// Map height.
        height: u32,
    },
    /// A single flat cell index; `width * height` is the global no-op,
    /// anything below left-click-builds the fixed building at
    /// `(x, y) = (index % width, index / width)`.
    FlatIndex {
        /// Map width.
        width: u32,
        /// Map height.
        height: u32,
        /// The building placed by every click (the road type).
        building: BuildingId,
    },
}

impl ActionCodec {
    /// Number of components a raw action must have.
    pub fn arity(&self) -> usize {
        match self {
            Self::MultiDiscrete { .. } => 4,
            Self::FlatIndex { .. } => 1,
        }
    }

    /// Decode a raw action.
    pub fn decode(&self, raw: &[u32]) -> Result<Action, ActionError> {
        if raw.len() != self.arity() {
            return Err(ActionError::WrongArity {
                expected: self.arity(),
                got: raw.len(),
            });
        }
        match *self {
            Self::MultiDiscrete {
                buildings,
                width,
                height,
            } => {
                let (b, x, y, click) = (raw[0], raw[1], raw[2], raw[3]);
                if b > buildings {
                    return Err(ActionError::BuildingOutOfRange {
                        value: b,
                        max: buildings,
                    });
                }
                if x >= width {
                    return Err(ActionError::CoordOutOfRange {
                        axis: "x",
                        value: x,
                        bound: width,
                    });
                }
                if y >= height {
                    return Err(ActionError::CoordOutOfRange {
                        axis: "y",
                        value: y,
                        bound: height,
                    });
                }
                let at = CellPos::new(x, y);
                match click {
                    0 => Ok(Action::Build {
                        at,
                        building: if b == 0 { None } else { Some(BuildingId(b - 1)) },
                    }),
                    1 => Ok(Action::Demolish { at }),
                    value => Err(ActionError::InvalidClick { value }),
                }
            }
            Self::FlatIndex {
                width,
                height,
                building,
            } => {
                let index = raw[0];
                let noop = width * height;
                if index > noop {
                    return Err(ActionError::IndexOutOfRange {
                        value: index,
                        max: noop,
                    });
                }
                if index == noop {
                    return Ok(Action::NoOp);
                }
                Ok(Action::Build {
                    at: CellPos::new(index % width, index / width),
                    building: Some(building),
                })
            }
        }
    }
}
