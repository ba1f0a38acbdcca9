//! Data structures that the layout passes share.

pub mod rank;
