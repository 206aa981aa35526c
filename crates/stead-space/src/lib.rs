//! Grid adjacency and road-network analysis for Stead.
//!
//! Two small, pure pieces: the bounds-checked 4-connected
//! neighbourhood over a [`TileGrid`](stead_core::TileGrid), and the
//! disjoint-component analyzer for the placed-road graph built on top
//! of it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod adjacency;
mod network;

pub use adjacency::{is_adjacent, neighbours4};
pub use network::{component_count, is_road_cell, road_cells};
