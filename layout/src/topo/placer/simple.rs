//! This is a simple pass that places the vertices of each row one after the
//! other, in the columns that the spacing pass computed. The top row is
//! placed first.

use super::spacing::Spacing;
use crate::adt::rank::LayerTable;
use crate::core::config::LayoutConfig;
use crate::core::geometry::{Coord, Point};
use crate::model::ElementHandle;
use std::collections::HashMap;

pub struct Coordinates {
    pub positions: HashMap<ElementHandle, Point>,
    /// The y coordinate of the horizontal corridor above each row.
    pub routing_ys: Vec<Coord>,
    pub size: Point,
}

/// Round \p x up to the next multiple of \p grid.
fn snap_up(x: Coord, grid: Coord) -> Coord {
    if grid <= 0 {
        return x;
    }
    ((x + grid - 1) / grid) * grid
}

pub fn do_it(
    layers: &LayerTable,
    sizes: &HashMap<ElementHandle, Point>,
    spacing: &Spacing,
    config: &LayoutConfig,
) -> Coordinates {
    let lc = config.line_clearance;
    let num_rows = layers.num_levels();
    let mut positions = HashMap::new();
    let mut routing_ys = vec![0; num_rows];

    let mut xx = spacing.column_spacing[0];
    let mut yy = 2 * lc;
    let mut width = 0;

    for row in (0..num_rows).rev() {
        routing_ys[row] = yy - lc;
        let mut max_height = 0;

        for (col, elem) in layers.row(row).iter().enumerate() {
            let size = sizes[elem];
            // Center the vertex in its column.
            let mut x = xx + (spacing.column_widths[col] - size.x) / 2;
            if config.snap_to_port_grid {
                x = snap_up(x, config.io_clearance);
            }
            positions.insert(*elem, Point::new(x, yy));

            xx += spacing.column_spacing[col + 1] + spacing.column_widths[col];
            width = width.max(x + size.x);
            max_height = max_height.max(size.y);
        }

        xx = spacing.column_spacing[0];
        yy += spacing.row_spacing[row] + max_height;
    }

    Coordinates {
        positions,
        routing_ys,
        size: Point::new(width + lc, yy + lc),
    }
}

#[test]
fn test_snap() {
    assert_eq!(snap_up(27, 10), 30);
    assert_eq!(snap_up(30, 10), 30);
    assert_eq!(snap_up(0, 10), 0);
    assert_eq!(snap_up(7, 0), 7);
}
