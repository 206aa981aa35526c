//! Test utilities for Stead development.
//!
//! Provides [`FixtureWorld`], a small deterministic simulation
//! implementing the [`Simulation`](stead_core::Simulation) seam, so
//! every test exercises the environment adapter through the same
//! interface production simulations use.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod fixture;

pub use fixture::FixtureWorld;
