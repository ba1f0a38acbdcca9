//! Layout configuration. Every distance that the layout engine uses comes
//! from here.

use crate::core::geometry::Coord;

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Width and height of a port glyph (input, output, argument, result).
    pub io_size: Coord,
    /// Horizontal gap between ports on a node.
    pub io_clearance: Coord,
    /// Padding around the text labels of a node.
    pub text_clearance: Coord,
    /// The unit of edge-routing space. Every edge that passes through a gap
    /// widens it by this much.
    pub line_clearance: Coord,
    /// Padding around the regions of an expanded node.
    pub region_clearance: Coord,
    /// Estimated width of one character of label text.
    pub char_width: Coord,
    /// Estimated height of one line of label text.
    pub line_height: Coord,
    /// Round vertex x coordinates up to a multiple of `io_clearance`.
    pub snap_to_port_grid: bool,
    /// Run the placement verifier after every region layout.
    pub validate: bool,
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self {
            io_size: 10,
            io_clearance: 10,
            text_clearance: 10,
            line_clearance: 10,
            region_clearance: 10,
            char_width: 8,
            line_height: 16,
            snap_to_port_grid: false,
            validate: true,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new()
    }
}
