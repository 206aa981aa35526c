//! Row-major tile storage with direct cell indexing.

use crate::error::GridError;
use crate::id::CellPos;
use crate::terrain::TerrainKind;
use crate::tile::Tile;

/// A `width × height` grid of [`Tile`]s.
///
/// Storage is a flat row-major `Vec`, so cell lookup is O(1) pointer
/// arithmetic. Coordinates use `(x, y)` with `x` the column and `y` the
/// row; [`CellPos::index`] defines the flat layout.
#[derive(Clone, Debug, PartialEq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Create a grid with every cell set to the given terrain.
    ///
    /// Returns `Err(GridError::EmptyGrid)` if either dimension is 0.
    pub fn new(width: u32, height: u32, fill: TerrainKind) -> Result<Self, GridError> {
        Self::from_fn(width, height, |_| Tile::Terrain(fill))
    }

    /// Create a grid by evaluating `f` at every cell position, in
    /// row-major order.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(CellPos) -> Tile,
    ) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid);
        }
        let cells = (width as usize)
            .checked_mul(height as usize)
            .ok_or(GridError::CellCountOverflow { width, height })?;
        let mut tiles = Vec::with_capacity(cells);
        for y in 0..height {
            for x in 0..width {
                tiles.push(f(CellPos::new(x, y)));
            }
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Grid width (columns).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height (rows).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total cell count.
    pub fn cell_count(&self) -> usize {
        self.tiles.len()
    }

    /// Whether `pos` lies within the grid.
    pub fn contains(&self, pos: CellPos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// The tile at `pos`, or `None` when out of bounds.
    pub fn get(&self, pos: CellPos) -> Option<&Tile> {
        if self.contains(pos) {
            Some(&self.tiles[pos.index(self.width)])
        } else {
            None
        }
    }

    /// The tile at a position the caller knows is in bounds.
    ///
    /// Callers that cannot guarantee bounds use
    /// [`get`](TileGrid::get) instead.
    pub fn tile(&self, pos: CellPos) -> &Tile {
        debug_assert!(self.contains(pos), "tile access out of bounds: {pos}");
        &self.tiles[pos.index(self.width)]
    }

    /// Replace the tile at `pos`. Out-of-bounds writes are ignored and
    /// reported as `false`.
    pub fn set(&mut self, pos: CellPos, tile: Tile) -> bool {
        if self.contains(pos) {
            let idx = pos.index(self.width);
            self.tiles[idx] = tile;
            true
        } else {
            false
        }
    }

    /// Iterate over all cells with their positions, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (CellPos, &Tile)> + '_ {
        let width = self.width as usize;
        self.tiles.iter().enumerate().map(move |(i, tile)| {
            (
                CellPos::new((i % width) as u32, (i / width) as u32),
                tile,
            )
        })
    }
}
