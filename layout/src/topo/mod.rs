//! This module contains the layout engine: layering, placement, routing and
//! the caches that tie them together.

pub mod cache;
pub mod layering;
pub mod layout;
pub mod placer;
pub mod router;
