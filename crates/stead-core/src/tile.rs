//! Tiles and the structures that occupy them.

use crate::id::{BuildingId, CellPos};
use crate::terrain::TerrainKind;

/// A placed building or road occupying one grid cell.
///
/// Owned by the simulation; the environment core only reads it. The
/// stable identity of a structure is its [`CellPos`] — structures never
/// move once placed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Structure {
    /// The cell this structure occupies.
    pub pos: CellPos,
    /// The building type, indexing the rule tables.
    pub building: BuildingId,
    /// Upgrade level, 0 for a freshly placed structure.
    pub level: u32,
    /// Production efficiency in `[0, 1]`.
    pub efficiency: f32,
}

impl Structure {
    /// A fresh level-0 structure at full efficiency.
    pub fn new(pos: CellPos, building: BuildingId) -> Self {
        Self {
            pos,
            building,
            level: 0,
            efficiency: 1.0,
        }
    }
}

/// One cell of the map: bare terrain, or terrain with a structure on it.
///
/// The explicit tag replaces attribute probing — every consumer switches
/// on the variant instead of asking whether an occupant field exists.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tile {
    /// Unoccupied terrain.
    Terrain(TerrainKind),
    /// Terrain with a structure placed on it.
    Occupied {
        /// The underlying terrain category.
        terrain: TerrainKind,
        /// The occupying structure.
        structure: Structure,
    },
}

impl Tile {
    /// The terrain category of this cell. Total — occupation does not
    /// erase the underlying terrain.
    pub fn terrain(&self) -> TerrainKind {
        match self {
            Tile::Terrain(t) => *t,
            Tile::Occupied { terrain, .. } => *terrain,
        }
    }

    /// The structure occupying this cell, if any.
    pub fn structure(&self) -> Option<&Structure> {
        match self {
            Tile::Terrain(_) => None,
            Tile::Occupied { structure, .. } => Some(structure),
        }
    }

    /// Whether a structure occupies this cell.
    pub fn is_occupied(&self) -> bool {
        matches!(self, Tile::Occupied { .. })
    }
}
