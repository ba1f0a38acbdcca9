//! This module implements the layout engine. The engine lays out one region
//! at a time: it layers the vertices of the region, measures them (laying out
//! the regions of expanded nodes first), places them and routes the edges.
//! Region layouts are immutable and shared through the `LayoutCache`.
//!
//! The result that users see is a `Layout`: the region layout flattened into
//! absolute coordinates, with an index from elements to the edge segments
//! that touch them.

#[cfg(feature = "log")]
extern crate log;

use crate::adt::rank::LayerTable;
use crate::core::config::LayoutConfig;
use crate::core::geometry::{bbox_of, box_contains, Coord, Point, Segment};
use crate::error::LayoutError;
use crate::model::{ElementHandle, ElementKind, Model, Tag};
use crate::std_shapes::shapes::{measure_node, port_bbox, Label, VertexShape};
use crate::topo::cache::{ExpansionState, LayoutCache};
use crate::topo::layering::{layer_region, layered_edges};
use crate::topo::placer::{Placer, RegionGeometry};
use crate::topo::router::{route_region, RoutedEdge};
use std::collections::HashMap;
use std::rc::Rc;

/// A vertex of a region layout, relative to the top-left corner of the
/// region.
#[derive(Debug, Clone)]
pub struct PlacedVertex {
    pub handle: ElementHandle,
    pub row: usize,
    pub column: usize,
    pub pos: Point,
    pub size: Point,
    pub shape: VertexShape,
}

#[derive(Debug, Clone)]
pub struct RegionLayout {
    pub region: ElementHandle,
    pub layers: Rc<LayerTable>,
    /// The vertices, in layer order.
    pub vertices: Vec<PlacedVertex>,
    /// The routed edges, in the canonical edge order.
    pub edges: Vec<RoutedEdge>,
    pub geometry: RegionGeometry,
    pub size: Point,
}

impl RegionLayout {
    pub fn vertex(&self, handle: ElementHandle) -> Option<&PlacedVertex> {
        self.vertices.iter().find(|v| v.handle == handle)
    }
}

pub struct LayoutEngine<'a> {
    model: &'a Model,
    config: &'a LayoutConfig,
    cache: &'a mut LayoutCache,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(model: &'a Model, config: &'a LayoutConfig, cache: &'a mut LayoutCache) -> Self {
        Self {
            model,
            config,
            cache,
        }
    }

    /// Lay out \p region and flatten it into absolute coordinates.
    pub fn layout(&mut self, region: ElementHandle) -> Result<Layout, LayoutError> {
        #[cfg(feature = "log")]
        log::info!("Starting layout of region '{}'.", self.model.id(region));

        let rl = self.region_layout(region)?;
        let layout = Layout::flatten(self.model, self.config, &rl);

        #[cfg(feature = "log")]
        log::info!(
            "Laid out {} vertices and {} edges in a {}x{} region.",
            layout.vertices.len(),
            layout.edges.len(),
            layout.width,
            layout.height
        );
        Ok(layout)
    }

    /// \returns the (possibly cached) layer table of \p region.
    pub fn layers(&mut self, region: ElementHandle) -> Result<Rc<LayerTable>, LayoutError> {
        if let Some(layers) = self.cache.layers(region) {
            return Ok(layers);
        }
        let layers = Rc::new(layer_region(self.model, region)?);
        self.cache.insert_layers(region, layers.clone());
        Ok(layers)
    }

    /// \returns the (possibly cached) layout of \p region, in the coordinates
    /// of the region.
    pub fn region_layout(&mut self, region: ElementHandle) -> Result<Rc<RegionLayout>, LayoutError> {
        if !self.model.is_region(region) {
            return Err(LayoutError::NotARegion(self.model.id(region).to_string()));
        }

        let state = ExpansionState::capture(self.model, region);
        if let Some(layout) = self.cache.lookup(region, &state) {
            return Ok(layout);
        }

        let layers = self.layers(region)?;
        let edges = layered_edges(self.model, &layers);

        // Measure the vertices. This lays out the regions of expanded nodes.
        let mut shapes = HashMap::new();
        let mut sizes = HashMap::new();
        for v in layers.iter() {
            let shape = self.measure(v)?;
            sizes.insert(v, shape.size(self.config));
            shapes.insert(v, shape);
        }

        let geometry = Placer::new(&layers, &edges, &sizes, self.config).layout();

        // Find where the edges attach to the ports of the placed vertices.
        let mut anchors = HashMap::new();
        for v in layers.iter() {
            let pos = geometry.positions[&v];
            for port in shapes[&v].anchors(v, self.config) {
                anchors.insert(port.port, pos.add(port.anchor));
            }
        }

        let routes = route_region(&edges, &anchors, &geometry, self.config.line_clearance);

        let mut vertices = Vec::with_capacity(layers.len());
        for v in layers.iter() {
            let cell = layers.cell(v).expect("Vertex is ranked");
            let shape = shapes.remove(&v).expect("Vertex was measured");
            vertices.push(PlacedVertex {
                handle: v,
                row: cell.row,
                column: cell.column,
                pos: geometry.positions[&v],
                size: sizes[&v],
                shape,
            });
        }

        #[cfg(feature = "log")]
        log::debug!(
            "Region '{}': {} rows, {} columns, size {}.",
            self.model.id(region),
            layers.num_levels(),
            layers.num_columns(),
            geometry.size
        );

        let layout = Rc::new(RegionLayout {
            region,
            layers: layers.clone(),
            vertices,
            edges: routes,
            size: geometry.size,
            geometry,
        });
        self.cache.insert(region, state, layout.clone());
        Ok(layout)
    }

    fn measure(&mut self, v: ElementHandle) -> Result<VertexShape, LayoutError> {
        let model = self.model;
        match &model.element(v).kind {
            ElementKind::Node(data) => {
                let mut nested = Vec::new();
                if data.expanded {
                    for child in model.children(v).iter().filter(|c| model.is_region(**c)) {
                        nested.push(self.region_layout(*child)?);
                    }
                }
                Ok(VertexShape::Node(measure_node(model, self.config, v, nested)))
            }
            ElementKind::Region(_) => Ok(VertexShape::Region(self.region_layout(v)?)),
            ElementKind::Argument | ElementKind::Result => Ok(VertexShape::Port(model.tag(v))),
            ElementKind::Input | ElementKind::Output => {
                panic!("Inputs and outputs are placed with their node")
            }
        }
    }
}

/// A vertex in absolute coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedVertex {
    pub handle: ElementHandle,
    /// The region that the vertex was laid out in.
    pub region: ElementHandle,
    pub row: usize,
    pub column: usize,
    pub pos: Point,
    pub size: Point,
    /// The number of regions between this vertex and the laid out region.
    pub depth: usize,
    pub labels: Vec<Label>,
}

/// A region drawn inside an expanded node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedRegion {
    pub handle: ElementHandle,
    pub pos: Point,
    pub size: Point,
    pub depth: usize,
}

/// An input or output of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedPort {
    pub port: ElementHandle,
    pub tag: Tag,
    pub anchor: Point,
    pub bbox: (Point, Point),
    pub depth: usize,
}

/// Refers to one segment of one route of a `Layout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentHandle {
    pub route: usize,
    pub segment: usize,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub region: ElementHandle,
    pub width: Coord,
    pub height: Coord,
    /// Nested regions, in drawing order.
    pub regions: Vec<PositionedRegion>,
    /// All of the vertices, in drawing order. A vertex comes before the
    /// vertices of the regions nested in it.
    pub vertices: Vec<PositionedVertex>,
    pub ports: Vec<PositionedPort>,
    pub edges: Vec<RoutedEdge>,
    /// Maps ports and vertices to the segments of the edges that touch them.
    segments: HashMap<ElementHandle, Vec<SegmentHandle>>,
}

impl Layout {
    pub fn flatten(model: &Model, config: &LayoutConfig, rl: &RegionLayout) -> Layout {
        let mut layout = Layout {
            region: rl.region,
            width: rl.size.x,
            height: rl.size.y,
            regions: Vec::new(),
            vertices: Vec::new(),
            ports: Vec::new(),
            edges: Vec::new(),
            segments: HashMap::new(),
        };
        layout.add_region(model, config, rl, Point::zero(), 0);
        layout.index_segments();
        layout
    }

    fn add_region(
        &mut self,
        model: &Model,
        config: &LayoutConfig,
        rl: &RegionLayout,
        origin: Point,
        depth: usize,
    ) {
        for v in rl.vertices.iter() {
            let pos = origin.add(v.pos);
            let labels = match &v.shape {
                VertexShape::Node(node) => node
                    .labels
                    .iter()
                    .map(|l| Label::new(pos.add(l.pos), &l.text))
                    .collect(),
                _ => Vec::new(),
            };
            self.vertices.push(PositionedVertex {
                handle: v.handle,
                region: rl.region,
                row: v.row,
                column: v.column,
                pos,
                size: v.size,
                depth,
                labels,
            });

            match &v.shape {
                VertexShape::Node(node) => {
                    for port in node.inputs.iter().chain(node.outputs.iter()) {
                        let tag = model.tag(port.port);
                        let anchor = pos.add(port.anchor);
                        self.ports.push(PositionedPort {
                            port: port.port,
                            tag,
                            anchor,
                            bbox: port_bbox(tag, anchor, config),
                            depth,
                        });
                    }
                    for nested in node.nested.iter() {
                        let region_pos = pos.add(nested.offset);
                        self.regions.push(PositionedRegion {
                            handle: nested.layout.region,
                            pos: region_pos,
                            size: nested.layout.size,
                            depth: depth + 1,
                        });
                        self.add_region(model, config, &nested.layout, region_pos, depth + 1);
                    }
                }
                VertexShape::Region(inner) => {
                    self.add_region(model, config, inner, pos, depth + 1);
                }
                VertexShape::Port(_) => {}
            }
        }

        for route in rl.edges.iter() {
            self.edges.push(route.translate(origin));
        }
    }

    fn index_segments(&mut self) {
        let mut index: HashMap<ElementHandle, Vec<SegmentHandle>> = HashMap::new();
        for (i, route) in self.edges.iter().enumerate() {
            let mut owners = vec![route.source, route.target];
            if route.source_vertex != route.source {
                owners.push(route.source_vertex);
            }
            if route.target_vertex != route.target {
                owners.push(route.target_vertex);
            }
            for owner in owners {
                let entry = index.entry(owner).or_insert_with(Vec::new);
                for s in 0..route.segments.len() {
                    entry.push(SegmentHandle {
                        route: i,
                        segment: s,
                    });
                }
            }
        }
        self.segments = index;
    }

    /// \returns the segments of all of the edges that touch \p elem (a port,
    /// or a vertex through its ports).
    pub fn segments_for(&self, elem: ElementHandle) -> &[SegmentHandle] {
        match self.segments.get(&elem) {
            Some(list) => list,
            None => &[],
        }
    }

    pub fn segment(&self, h: SegmentHandle) -> Segment {
        self.edges[h.route].segments[h.segment]
    }

    pub fn vertex(&self, handle: ElementHandle) -> Option<&PositionedVertex> {
        self.vertices.iter().find(|v| v.handle == handle)
    }

    /// \returns the element that is drawn on top at \p p. Deeper elements
    /// are on top of the nodes and regions that contain them, and ports are
    /// on top of their nodes.
    pub fn element_at(&self, p: Point) -> Option<ElementHandle> {
        // (depth, layer) of the best candidate.
        let mut best: Option<((usize, usize), ElementHandle)> = None;
        let mut consider = |key: (usize, usize), h: ElementHandle| {
            if best.map_or(true, |(k, _)| key >= k) {
                best = Some((key, h));
            }
        };

        for region in self.regions.iter() {
            if box_contains(bbox_of(region.pos, region.size), p) {
                consider((region.depth, 0), region.handle);
            }
        }
        for v in self.vertices.iter() {
            if box_contains(bbox_of(v.pos, v.size), p) {
                consider((v.depth, 1), v.handle);
            }
        }
        for port in self.ports.iter() {
            if box_contains(port.bbox, p) {
                consider((port.depth, 2), port.port);
            }
        }
        best.map(|(_, h)| h)
    }
}
