//! A module that handles the XML document format of RVSDG graphs.

pub mod loader;

pub use loader::load_model;
