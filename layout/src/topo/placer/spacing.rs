//! Computes the width of the columns and the size of the gaps between rows and
//! columns. Every edge reserves room for its horizontal run in the gap below
//! its source row. Edges that skip rows also reserve room for the vertical
//! run left of the target column, and for the final horizontal run above the
//! target row.

use crate::adt::rank::LayerTable;
use crate::core::geometry::{Coord, Point};
use crate::model::ElementHandle;
use crate::topo::layering::LayeredEdge;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spacing {
    /// The widest vertex of each column, over all rows.
    pub column_widths: Vec<Coord>,
    /// The gap below each row.
    pub row_spacing: Vec<Coord>,
    /// The gap left of each column. The last entry is the gap right of the
    /// last column, which is always zero.
    pub column_spacing: Vec<Coord>,
}

/// \returns the width of each column index: the widest vertex with that
/// column index in any row.
pub fn column_widths(layers: &LayerTable, sizes: &HashMap<ElementHandle, Point>) -> Vec<Coord> {
    let mut widths = vec![0; layers.num_columns()];
    for row in layers.ranks() {
        for (col, elem) in row.iter().enumerate() {
            widths[col] = widths[col].max(sizes[elem].x);
        }
    }
    widths
}

pub fn compute(
    layers: &LayerTable,
    edges: &[LayeredEdge],
    sizes: &HashMap<ElementHandle, Point>,
    clearance: Coord,
) -> Spacing {
    let num_columns = layers.num_columns();
    let mut row_spacing = vec![clearance; layers.num_levels()];
    let mut column_spacing = vec![clearance; num_columns + 1];

    for edge in edges {
        row_spacing[edge.source_row] += clearance;
        if !edge.is_adjacent() {
            row_spacing[edge.target_row + 1] += clearance;
            column_spacing[edge.target_column] += clearance;
        }
    }
    column_spacing[num_columns] = 0;

    Spacing {
        column_widths: column_widths(layers, sizes),
        row_spacing,
        column_spacing,
    }
}

/// \returns the x coordinate of the vertical corridor of each column: one
/// clearance left of the start of the column.
pub fn vertical_corridors(spacing: &Spacing, clearance: Coord) -> Vec<Coord> {
    let mut xs = Vec::with_capacity(spacing.column_widths.len());
    for i in 0..spacing.column_widths.len() {
        let x = if i == 0 {
            spacing.column_spacing[0] - clearance
        } else {
            xs[i - 1] + spacing.column_spacing[i] + spacing.column_widths[i - 1]
        };
        xs.push(x);
    }
    xs
}
