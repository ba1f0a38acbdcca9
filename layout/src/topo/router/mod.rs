//! This module contains the edge router, which turns every edge of a placed
//! region into a list of horizontal and vertical segments.

pub mod corridor;
pub mod route;

pub use route::{route_region, RoutedEdge};
