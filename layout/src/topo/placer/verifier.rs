use crate::adt::rank::LayerTable;
use crate::core::geometry::{bbox_of, do_boxes_intersect, Point};
use crate::model::ElementHandle;
use crate::topo::layering::LayeredEdge;
use std::collections::HashMap;

pub fn do_it(
    layers: &LayerTable,
    edges: &[LayeredEdge],
    positions: &HashMap<ElementHandle, Point>,
    sizes: &HashMap<ElementHandle, Point>,
) {
    verify_layering(edges);
    verify_order_in_rank(layers, positions, sizes);
    verify_rows_are_stacked(layers, positions, sizes);
}

fn verify_layering(edges: &[LayeredEdge]) {
    for edge in edges {
        assert!(
            edge.source_row > edge.target_row,
            "Edges must flow from a higher row to a lower row"
        );
    }
}

fn verify_order_in_rank(
    layers: &LayerTable,
    positions: &HashMap<ElementHandle, Point>,
    sizes: &HashMap<ElementHandle, Point>,
) {
    for row in layers.ranks() {
        for elem in row.iter() {
            assert!(
                positions[elem].is_non_negative(),
                "Coordinates must be non-negative"
            );
        }

        for pair in row.windows(2) {
            let bb0 = bbox_of(positions[&pair[0]], sizes[&pair[0]]);
            let bb1 = bbox_of(positions[&pair[1]], sizes[&pair[1]]);
            assert!(!do_boxes_intersect(bb0, bb1), "Boxes must not intersect");
            assert!(
                bb0.0.x < bb1.0.x,
                "The order of the boxes must be sequential on the x axis"
            );
        }
    }
}

/// Higher rows are drawn above lower rows.
fn verify_rows_are_stacked(
    layers: &LayerTable,
    positions: &HashMap<ElementHandle, Point>,
    sizes: &HashMap<ElementHandle, Point>,
) {
    for level in 1..layers.num_levels() {
        let bottom_of_upper = layers
            .row(level)
            .iter()
            .map(|e| positions[e].y + sizes[e].y)
            .max();
        let top_of_lower = layers.row(level - 1).iter().map(|e| positions[e].y).min();
        if let (Some(upper), Some(lower)) = (bottom_of_upper, top_of_lower) {
            assert!(upper < lower, "Rows must not overlap");
        }
    }
}
