//! The viewer ties the model, the layout engine and the renderer together. It
//! owns the loaded document, the layout of the region that is currently on
//! display, and the state of the edge recoloring.

#[cfg(feature = "log")]
extern crate log;

use crate::core::color::EDGE_COLORS;
use crate::core::config::LayoutConfig;
use crate::core::format::RenderBackend;
use crate::core::geometry::{Point, Segment};
use crate::error::{LayoutError, LoadError};
use crate::model::{EdgeHandle, ElementHandle, Model};
use crate::std_shapes::render::render_layout;
use crate::topo::cache::LayoutCache;
use crate::topo::layout::{Layout, LayoutEngine, SegmentHandle};
use crate::xml::load_model;

pub struct Viewer {
    model: Model,
    config: LayoutConfig,
    cache: LayoutCache,
    current: Option<Layout>,
    /// The palette entry that the next recolor uses.
    color_counter: usize,
    /// The z value of the most recently recolored edges.
    z_counter: u32,
}

impl Viewer {
    pub fn new(model: Model, config: LayoutConfig) -> Self {
        Self {
            model,
            config,
            cache: LayoutCache::new(),
            current: None,
            color_counter: 0,
            z_counter: 0,
        }
    }

    /// Load the XML document \p text.
    pub fn from_xml(text: &str, config: LayoutConfig) -> Result<Self, LoadError> {
        Ok(Self::new(load_model(text)?, config))
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// \returns the layout that is on display, if any.
    pub fn current(&self) -> Option<&Layout> {
        self.current.as_ref()
    }

    /// Lay out \p region and put it on display.
    pub fn layout_region(&mut self, region: ElementHandle) -> Result<&Layout, LayoutError> {
        let layout = LayoutEngine::new(&self.model, &self.config, &mut self.cache).layout(region)?;
        let layout: &Layout = self.current.insert(layout);
        Ok(layout)
    }

    /// Expand or collapse \p node. The region on display is laid out again.
    /// If that fails then the node keeps its previous state, the previous
    /// layout stays on display, and the error is returned.
    /// \returns true if the node is now expanded.
    pub fn toggle_expansion(&mut self, node: ElementHandle) -> Result<bool, LayoutError> {
        if !self.model.is_expandable(node) {
            return Err(LayoutError::NotExpandable(self.model.id(node).to_string()));
        }
        let expanded = self.model.toggle_expanded(node);
        self.cache.invalidate_ancestors(&self.model, node);

        if let Some(region) = self.current.as_ref().map(|l| l.region) {
            if let Err(err) = self.layout_region(region) {
                self.model.toggle_expanded(node);
                self.cache.invalidate_ancestors(&self.model, node);

                #[cfg(feature = "log")]
                log::warn!("Can't toggle '{}': {}", self.model.id(node), err);

                return Err(err);
            }
        }

        #[cfg(feature = "log")]
        log::info!(
            "{} '{}'.",
            if expanded { "Expanded" } else { "Collapsed" },
            self.model.id(node)
        );

        Ok(expanded)
    }

    /// \returns the segments of the edges on display that touch \p vertex.
    pub fn segments_for_vertex(&self, vertex: ElementHandle) -> Vec<SegmentHandle> {
        match &self.current {
            Some(layout) => layout.segments_for(vertex).to_vec(),
            None => Vec::new(),
        }
    }

    pub fn segment(&self, h: SegmentHandle) -> Option<Segment> {
        self.current.as_ref().map(|l| l.segment(h))
    }

    /// Color the edge \p edge with the palette entry \p color_index. Indices
    /// wrap around the palette.
    pub fn set_edge_color(&mut self, edge: EdgeHandle, color_index: usize) {
        self.model.edge_data_mut(edge).color = Some(color_index % EDGE_COLORS.len());
    }

    pub fn clear_edge_color(&mut self, edge: EdgeHandle) {
        self.model.edge_data_mut(edge).color = None;
    }

    /// Color every edge that touches \p vertex with the next palette entry,
    /// and raise them above all other edges. \returns the palette index.
    pub fn color_edges_of(&mut self, vertex: ElementHandle) -> usize {
        let color = self.color_counter % EDGE_COLORS.len();
        self.color_counter += 1;
        self.z_counter += 1;
        for edge in self.model.edges_touching(vertex) {
            let data = self.model.edge_data_mut(edge);
            data.color = Some(color);
            data.z_value = self.z_counter;
        }
        color
    }

    pub fn clear_colors(&mut self) {
        self.model.clear_colors();
    }

    /// \returns the element that is drawn on top at \p point, in the layout
    /// on display.
    pub fn hit_test(&self, point: Point) -> Option<ElementHandle> {
        self.current.as_ref().and_then(|l| l.element_at(point))
    }

    pub fn element_by_id(&self, id: &str) -> Option<ElementHandle> {
        self.model.get(id)
    }

    /// Draw the layout on display onto \p canvas. Does nothing if nothing is
    /// on display.
    pub fn render(&self, canvas: &mut dyn RenderBackend, debug: bool) {
        if let Some(layout) = &self.current {
            render_layout(&self.model, &self.config, layout, canvas, debug);
        }
    }
}
