//! Observation encoding for the Stead environment.
//!
//! Turns a [`SimSnapshot`](stead_core::SimSnapshot) into a fixed-shape
//! bundle of named planes: terrain and building one-hots, normalized
//! building levels, compressed income, and buildability masks. All
//! shapes derive once from the grid dimensions and rule tables when the
//! encoder is constructed; snapshot content never changes them.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod encoder;
mod layout;
mod plane;
mod scale;

pub use encoder::{Encoder, Observation};
pub use layout::ObsLayout;
pub use plane::Plane;
pub use scale::{abs_max_scale, scaled_income, signed_log10};
