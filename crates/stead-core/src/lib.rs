//! Core types and trait seams for the Stead environment.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the data model shared by the whole workspace — typed IDs, terrain
//! categories, tiles and structures, the tile grid, the static rule
//! tables — plus the trait seams through which the environment adapter
//! reaches its simulation collaborator.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod grid;
mod id;
mod rules;
mod snapshot;
mod terrain;
mod tile;
mod traits;

pub use error::{GridError, RulesError, SimError};
pub use grid::TileGrid;
pub use id::{BuildingId, CellPos, ResourceId, TickId};
pub use rules::{BuildingDef, ResourceDef, RuleSet};
pub use snapshot::SimSnapshot;
pub use terrain::{TerrainKind, TerrainMask};
pub use tile::{Structure, Tile};
pub use traits::{CostModel, Render, Simulation};
