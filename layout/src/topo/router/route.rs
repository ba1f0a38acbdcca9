//! Orthogonal edge routing over fixed geometry.
//!
//! An edge between neighboring rows drops from its source to the corridor
//! below the source row, runs across to the target and drops into it. An
//! edge that skips rows also runs down the vertical corridor of the target
//! column, between the corridor below the source row and the corridor above
//! the target row.

#[cfg(feature = "log")]
extern crate log;

use super::corridor::Corridors;
use crate::core::geometry::{Coord, Point, Segment};
use crate::model::{EdgeHandle, ElementHandle};
use crate::topo::layering::LayeredEdge;
use crate::topo::placer::RegionGeometry;
use std::collections::HashMap;

/// The polyline of one edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedEdge {
    pub edge: EdgeHandle,
    /// The source port.
    pub source: ElementHandle,
    /// The target port.
    pub target: ElementHandle,
    pub source_vertex: ElementHandle,
    pub target_vertex: ElementHandle,
    pub segments: Vec<Segment>,
}

impl RoutedEdge {
    pub fn translate(&self, d: Point) -> RoutedEdge {
        let mut res = self.clone();
        res.segments = self.segments.iter().map(|s| s.translate(d)).collect();
        res
    }
}

/// Connect the points \p path with segments.
fn polyline(path: &[Point]) -> Vec<Segment> {
    path.windows(2).map(|w| Segment::new(w[0], w[1])).collect()
}

/// Route the edges \p edges of one region. \p anchors maps every port of the
/// region to the point where edges attach to it. The edges must be in the
/// canonical order: the corridors are handed out in that order.
pub fn route_region(
    edges: &[LayeredEdge],
    anchors: &HashMap<ElementHandle, Point>,
    geometry: &RegionGeometry,
    clearance: Coord,
) -> Vec<RoutedEdge> {
    let mut corridors = Corridors::new(&geometry.routing_xs, &geometry.routing_ys, clearance);
    let mut res = Vec::with_capacity(edges.len());

    for edge in edges {
        assert!(
            edge.source_row > edge.target_row,
            "Edges must flow from a higher row to a lower row"
        );
        let from = anchors[&edge.edge.source];
        let to = anchors[&edge.edge.target];

        let path = if edge.is_adjacent() {
            let y = corridors.take_horizontal(edge.source_row - 1);
            vec![from, Point::new(from.x, y), Point::new(to.x, y), to]
        } else {
            let y_source = corridors.take_horizontal(edge.source_row - 1);
            let x = corridors.take_vertical(edge.target_column);
            let y_target = corridors.take_horizontal(edge.target_row);
            vec![
                from,
                Point::new(from.x, y_source),
                Point::new(x, y_source),
                Point::new(x, y_target),
                Point::new(to.x, y_target),
                to,
            ]
        };

        res.push(RoutedEdge {
            edge: edge.edge.handle,
            source: edge.edge.source,
            target: edge.edge.target,
            source_vertex: edge.source_vertex,
            target_vertex: edge.target_vertex,
            segments: polyline(&path),
        });
    }

    #[cfg(feature = "log")]
    log::debug!("Routed {} edges.", res.len());

    res
}
