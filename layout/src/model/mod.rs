//! The in-memory representation of an RVSDG document: nodes, regions, their
//! ports and the edges between the ports.

pub mod edge;
pub mod element;
pub mod graph;

pub use edge::{Edge, EdgeHandle, EdgeRef};
pub use element::{Element, ElementHandle, ElementKind, NodeData, RegionData, Tag};
pub use graph::{Model, OutlineEntry};
