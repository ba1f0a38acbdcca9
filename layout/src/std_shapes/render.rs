//! Implements the drawing of a laid out region on the backing canvas.

use crate::backends::svg::escape_string;
use crate::core::config::LayoutConfig;
use crate::core::format::RenderBackend;
use crate::core::geometry::Point;
use crate::core::style::StyleAttr;
use crate::model::{ElementKind, Model};
use crate::std_shapes::shapes::{port_polygon, region_port_anchor};
use crate::topo::layout::{Layout, PositionedVertex};

fn id_property(model: &Model, vertex: &PositionedVertex) -> Option<String> {
    Some(format!("data-id=\"{}\"", escape_string(model.id(vertex.handle))))
}

fn render_vertex(
    model: &Model,
    config: &LayoutConfig,
    vertex: &PositionedVertex,
    canvas: &mut dyn RenderBackend,
) {
    match &model.element(vertex.handle).kind {
        ElementKind::Node(node) => {
            let look = StyleAttr::node(node.kind);
            canvas.draw_rect(vertex.pos, vertex.size, &look, id_property(model, vertex));
            for label in vertex.labels.iter() {
                canvas.draw_text(label.pos, &label.text, &look);
            }
        }
        ElementKind::Region(_) => {
            canvas.draw_rect(
                vertex.pos,
                vertex.size,
                &StyleAttr::region(),
                id_property(model, vertex),
            );
        }
        ElementKind::Argument | ElementKind::Result => {
            let tag = model.tag(vertex.handle);
            let anchor = vertex.pos.add(region_port_anchor(tag, config));
            let poly = port_polygon(tag, anchor, config);
            canvas.draw_polygon(&poly, &StyleAttr::port(), id_property(model, vertex));
        }
        ElementKind::Input | ElementKind::Output => {
            panic!("Inputs and outputs are not vertices")
        }
    }
}

/// Draw \p layout onto \p canvas. Vertices and the regions nested in them are
/// drawn outside-in, then the ports, and then the edges in stacking order.
/// If \p debug is set then the bounding boxes of the vertices and the ports
/// are drawn on top.
pub fn render_layout(
    model: &Model,
    config: &LayoutConfig,
    layout: &Layout,
    canvas: &mut dyn RenderBackend,
    debug: bool,
) {
    canvas.draw_rect(
        Point::zero(),
        Point::new(layout.width, layout.height),
        &StyleAttr::region(),
        None,
    );

    let max_depth = layout
        .vertices
        .iter()
        .map(|v| v.depth)
        .chain(layout.regions.iter().map(|r| r.depth))
        .max()
        .unwrap_or(0);
    for depth in 0..=max_depth {
        for region in layout.regions.iter().filter(|r| r.depth == depth) {
            let props = format!("data-id=\"{}\"", escape_string(model.id(region.handle)));
            canvas.draw_rect(region.pos, region.size, &StyleAttr::region(), Some(props));
        }
        for vertex in layout.vertices.iter().filter(|v| v.depth == depth) {
            render_vertex(model, config, vertex, canvas);
        }
    }

    for port in layout.ports.iter() {
        let poly = port_polygon(port.tag, port.anchor, config);
        let props = format!("data-id=\"{}\"", escape_string(model.id(port.port)));
        canvas.draw_polygon(&poly, &StyleAttr::port(), Some(props));
    }

    // Recolored edges are raised above the others.
    let mut order: Vec<usize> = (0..layout.edges.len()).collect();
    order.sort_by_key(|i| (model.edge_data(layout.edges[*i].edge).z_value, *i));
    for i in order {
        let route = &layout.edges[i];
        let look = StyleAttr::edge(model.edge_data(route.edge).color);
        let props = format!("data-edge=\"{}\"", route.edge.get_index());
        for seg in route.segments.iter() {
            canvas.draw_line(seg.start, seg.stop, &look, Some(props.clone()));
        }
    }

    if debug {
        let look = StyleAttr::debug0();
        for vertex in layout.vertices.iter() {
            canvas.draw_rect(vertex.pos, vertex.size, &look, None);
        }
        for port in layout.ports.iter() {
            let size = port.bbox.1.sub(port.bbox.0);
            canvas.draw_rect(port.bbox.0, size, &look, None);
        }
    }
}
