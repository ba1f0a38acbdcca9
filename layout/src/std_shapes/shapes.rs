//! The shapes that are defined in this module describe the vertices that the
//! layout engine places: a node box with its port rows and labels, a nested
//! region, or a single port glyph. A shape knows its own size and where its
//! ports and labels are, relative to its top-left corner.

use crate::core::config::LayoutConfig;
use crate::core::geometry::{get_size_for_str, Coord, Point};
use crate::model::{ElementHandle, ElementKind, Model, Tag};
use crate::topo::layout::RegionLayout;
use std::rc::Rc;

/// The place where edges attach to a port of a node. The anchor is the tip
/// of the port triangle, relative to the top-left corner of the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortAnchor {
    pub port: ElementHandle,
    pub anchor: Point,
}

/// A line of text inside a node. \p pos is the top-left corner of the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub pos: Point,
    pub text: String,
}

impl Label {
    pub fn new(pos: Point, text: &str) -> Self {
        Self {
            pos,
            text: text.to_string(),
        }
    }
}

/// A region that is drawn inside an expanded node.
#[derive(Debug, Clone)]
pub struct NestedRegion {
    pub offset: Point,
    pub layout: Rc<RegionLayout>,
}

#[derive(Debug, Clone)]
pub struct NodeShape {
    pub size: Point,
    pub inputs: Vec<PortAnchor>,
    pub outputs: Vec<PortAnchor>,
    pub labels: Vec<Label>,
    pub nested: Vec<NestedRegion>,
}

#[derive(Debug, Clone)]
pub enum VertexShape {
    Node(NodeShape),
    /// A region that is placed directly in the body of another region.
    Region(Rc<RegionLayout>),
    /// An argument or a result of the enclosing region.
    Port(Tag),
}

impl VertexShape {
    pub fn size(&self, config: &LayoutConfig) -> Point {
        match self {
            VertexShape::Node(node) => node.size,
            VertexShape::Region(layout) => layout.size,
            VertexShape::Port(_) => Point::splat(config.io_size),
        }
    }

    /// \returns the anchors of all of the ports of the shape, relative to its
    /// top-left corner.
    pub fn anchors(&self, handle: ElementHandle, config: &LayoutConfig) -> Vec<PortAnchor> {
        match self {
            VertexShape::Node(node) => node
                .inputs
                .iter()
                .chain(node.outputs.iter())
                .cloned()
                .collect(),
            VertexShape::Region(_) => Vec::new(),
            VertexShape::Port(tag) => vec![PortAnchor {
                port: handle,
                anchor: region_port_anchor(*tag, config),
            }],
        }
    }
}

/// \returns the anchor of an argument or a result glyph. Arguments feed the
/// region from above, so edges leave them at the bottom. Results are fed from
/// above, so edges enter them at the top.
pub fn region_port_anchor(tag: Tag, config: &LayoutConfig) -> Point {
    let io = config.io_size;
    match tag {
        Tag::Argument => Point::new(io / 2, io),
        Tag::Result => Point::new(io / 2, 0),
        _ => panic!("Only arguments and results are region ports"),
    }
}

/// \returns the outline of the triangle that represents the port \p tag
/// whose edges attach at \p anchor. All ports point down, in the direction
/// of the data flow.
pub fn port_polygon(tag: Tag, anchor: Point, config: &LayoutConfig) -> Vec<Point> {
    let half = config.io_size / 2;
    let io = config.io_size;
    match tag {
        // The tip is the anchor on the top edge.
        Tag::Input | Tag::Result => vec![
            anchor,
            Point::new(anchor.x - half, anchor.y + io),
            Point::new(anchor.x + half, anchor.y + io),
        ],
        // The tip is the anchor on the bottom edge.
        Tag::Output | Tag::Argument => vec![
            Point::new(anchor.x - half, anchor.y - io),
            Point::new(anchor.x + half, anchor.y - io),
            anchor,
        ],
        _ => panic!("Expected a port"),
    }
}

/// \returns the bounding box of the glyph of the port \p tag whose edges
/// attach at \p anchor.
pub fn port_bbox(tag: Tag, anchor: Point, config: &LayoutConfig) -> (Point, Point) {
    let poly = port_polygon(tag, anchor, config);
    let x0 = poly.iter().map(|p| p.x).min().unwrap_or(anchor.x);
    let y0 = poly.iter().map(|p| p.y).min().unwrap_or(anchor.y);
    let x1 = poly.iter().map(|p| p.x).max().unwrap_or(anchor.x);
    let y1 = poly.iter().map(|p| p.y).max().unwrap_or(anchor.y);
    (Point::new(x0, y0), Point::new(x1, y1))
}

/// Compute the shape of the node \p node. The node is drawn as a stack: a row
/// of inputs, the name and the id, the nested regions side by side when the
/// node is expanded, and a row of outputs. \p nested holds the layouts of the
/// regions of the node, and must be empty if the node is collapsed.
pub fn measure_node(
    model: &Model,
    config: &LayoutConfig,
    node: ElementHandle,
    nested: Vec<Rc<RegionLayout>>,
) -> NodeShape {
    let elem = model.element(node);
    let data = match &elem.kind {
        ElementKind::Node(data) => data,
        _ => panic!("Expected a node"),
    };
    let io = config.io_size;
    let ioc = config.io_clearance;
    let tc = config.text_clearance;
    let rc = config.region_clearance;

    let mut width: Coord = 0;
    let mut yy: Coord = 0;

    // The row of inputs.
    let mut inputs = Vec::new();
    let mut xx = ioc;
    for input in data.inputs.iter() {
        inputs.push(PortAnchor {
            port: *input,
            anchor: Point::new(xx + io / 2, 0),
        });
        xx += ioc + io;
    }
    if !data.inputs.is_empty() {
        yy += io;
    }
    width = width.max(xx);

    // The name and the id.
    let mut labels = Vec::new();
    for text in [data.name.as_str(), elem.id.as_str()].iter() {
        let size = get_size_for_str(text, config.char_width, config.line_height);
        yy += tc;
        labels.push(Label::new(Point::new(tc, yy), text));
        width = width.max(size.x + 2 * tc);
        yy += size.y;
    }

    // The regions of an expanded node, side by side.
    let mut placed = Vec::new();
    if !nested.is_empty() {
        let mut xx = rc;
        yy += rc;
        let mut max_height = 0;
        for layout in nested {
            let size = layout.size;
            placed.push(NestedRegion {
                offset: Point::new(xx, yy),
                layout,
            });
            xx += size.x + rc;
            max_height = max_height.max(size.y);
        }
        yy += max_height;
        width = width.max(xx);
    }

    // The row of outputs.
    let mut outputs = Vec::new();
    let mut xx = ioc + ioc / 2;
    yy += ioc;
    for output in data.outputs.iter() {
        outputs.push(PortAnchor {
            port: *output,
            anchor: Point::new(xx + io / 2, yy + io),
        });
        xx += ioc + io;
    }
    width = width.max(xx);
    if !data.outputs.is_empty() {
        yy += io;
    }

    NodeShape {
        size: Point::new(width, yy),
        inputs,
        outputs,
        labels,
        nested: placed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::base::NodeKind;

    #[test]
    fn leaf_node_size() {
        let mut m = Model::new();
        let region = m.add_region(m.root(), "r").unwrap();
        let node = m.add_node(region, "n1", "add", NodeKind::Plain).unwrap();
        let i0 = m.add_input(node, "i0").unwrap();
        let o0 = m.add_output(node, "o0").unwrap();

        let config = LayoutConfig::default();
        let shape = measure_node(&m, &config, node, Vec::new());
        assert_eq!(shape.size, Point::new(44, 82));
        assert_eq!(
            shape.inputs,
            vec![PortAnchor {
                port: i0,
                anchor: Point::new(15, 0)
            }]
        );
        assert_eq!(
            shape.outputs,
            vec![PortAnchor {
                port: o0,
                anchor: Point::new(20, 82)
            }]
        );
        assert_eq!(shape.labels[0], Label::new(Point::new(10, 20), "add"));
        assert_eq!(shape.labels[1], Label::new(Point::new(10, 46), "n1"));
    }

    #[test]
    fn port_rows_widen_the_node() {
        let mut m = Model::new();
        let region = m.add_region(m.root(), "r").unwrap();
        let node = m.add_node(region, "n", "x", NodeKind::Plain).unwrap();
        for i in 0..4 {
            m.add_input(node, &format!("i{}", i)).unwrap();
        }
        let config = LayoutConfig::default();
        let shape = measure_node(&m, &config, node, Vec::new());
        // Four inputs need 10 + 4 * 20 pixels. No outputs: the node ends at
        // the output clearance.
        assert_eq!(shape.size, Point::new(90, 72));
        assert_eq!(shape.inputs[3].anchor, Point::new(75, 0));
    }

    #[test]
    fn port_glyphs() {
        let config = LayoutConfig::default();
        assert_eq!(region_port_anchor(Tag::Argument, &config), Point::new(5, 10));
        assert_eq!(region_port_anchor(Tag::Result, &config), Point::new(5, 0));
        let anchor = Point::new(20, 30);
        assert_eq!(
            port_bbox(Tag::Input, anchor, &config),
            (Point::new(15, 30), Point::new(25, 40))
        );
        assert_eq!(
            port_bbox(Tag::Output, anchor, &config),
            (Point::new(15, 20), Point::new(25, 30))
        );
    }
}
