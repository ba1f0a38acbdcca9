//! This module contains the placer, the code that assigns X,Y coordinates to
//! all of the vertices of a region.

mod simple;
mod spacing;
mod verifier;

pub mod place;
pub use place::{Placer, RegionGeometry};
