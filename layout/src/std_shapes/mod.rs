//! Standard shapes: the boxes, regions and port triangles that the viewer
//! draws, and the code that renders a laid out region with them.

pub mod render;
pub mod shapes;
