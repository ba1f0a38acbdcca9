//! This module contains the implementation of the placer, which assigns the
//! final (x,y) coordinates to all of the vertices of a region, and computes
//! the corridors that the router runs the edges through.

#[cfg(feature = "log")]
extern crate log;

use crate::adt::rank::LayerTable;
use crate::core::config::LayoutConfig;
use crate::core::geometry::{Coord, Point};
use crate::model::ElementHandle;
use crate::topo::layering::LayeredEdge;
use crate::topo::placer::simple;
use crate::topo::placer::spacing;
use crate::topo::placer::verifier;
use std::collections::HashMap;

/// The geometry of one layered region. All coordinates are relative to the
/// top-left corner of the region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionGeometry {
    pub column_widths: Vec<Coord>,
    pub row_spacing: Vec<Coord>,
    pub column_spacing: Vec<Coord>,
    /// The initial x of the vertical corridor of each column.
    pub routing_xs: Vec<Coord>,
    /// The initial y of the horizontal corridor above each row.
    pub routing_ys: Vec<Coord>,
    pub positions: HashMap<ElementHandle, Point>,
    pub size: Point,
}

pub struct Placer<'a> {
    layers: &'a LayerTable,
    edges: &'a [LayeredEdge],
    sizes: &'a HashMap<ElementHandle, Point>,
    config: &'a LayoutConfig,
}

impl<'a> Placer<'a> {
    pub fn new(
        layers: &'a LayerTable,
        edges: &'a [LayeredEdge],
        sizes: &'a HashMap<ElementHandle, Point>,
        config: &'a LayoutConfig,
    ) -> Self {
        Self {
            layers,
            edges,
            sizes,
            config,
        }
    }

    pub fn layout(&self) -> RegionGeometry {
        #[cfg(feature = "log")]
        log::debug!(
            "Placing {} vertices in {} rows.",
            self.layers.len(),
            self.layers.num_levels()
        );

        let lc = self.config.line_clearance;

        // Make room for the edges between the rows and the columns.
        let spacing = spacing::compute(self.layers, self.edges, self.sizes, lc);
        let routing_xs = spacing::vertical_corridors(&spacing, lc);

        // Assign the coordinates, top row first.
        let coords = simple::do_it(self.layers, self.sizes, &spacing, self.config);

        if self.config.validate {
            verifier::do_it(self.layers, self.edges, &coords.positions, self.sizes);
        }

        RegionGeometry {
            column_widths: spacing.column_widths,
            row_spacing: spacing.row_spacing,
            column_spacing: spacing.column_spacing,
            routing_xs,
            routing_ys: coords.routing_ys,
            positions: coords.positions,
            size: coords.size,
        }
    }
}
