//! Memoization of layer tables and region layouts.
//!
//! The layer table of a region only depends on the structure of the region,
//! so it is cached per region. The geometry of a region also depends on which
//! of the nodes inside it are expanded, so region layouts are keyed by the
//! region and the set of expanded nodes below it.

#[cfg(feature = "log")]
extern crate log;

use crate::adt::rank::LayerTable;
use crate::model::{ElementHandle, Model};
use crate::topo::layout::RegionLayout;
use std::collections::HashMap;
use std::rc::Rc;

/// The expanded nodes below a region, in depth-first order. Nodes inside a
/// collapsed node are part of the key too.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpansionState(Vec<ElementHandle>);

impl ExpansionState {
    pub fn capture(model: &Model, region: ElementHandle) -> Self {
        let expanded = model
            .descendants(region)
            .into_iter()
            .filter(|h| model.is_expanded(*h))
            .collect();
        ExpansionState(expanded)
    }

    pub fn expanded_nodes(&self) -> &[ElementHandle] {
        &self.0
    }
}

#[derive(Debug, Default)]
pub struct LayoutCache {
    layers: HashMap<ElementHandle, Rc<LayerTable>>,
    regions: HashMap<(ElementHandle, ExpansionState), Rc<RegionLayout>>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layers(&self, region: ElementHandle) -> Option<Rc<LayerTable>> {
        self.layers.get(&region).cloned()
    }

    pub fn insert_layers(&mut self, region: ElementHandle, layers: Rc<LayerTable>) {
        self.layers.insert(region, layers);
    }

    pub fn lookup(&self, region: ElementHandle, state: &ExpansionState) -> Option<Rc<RegionLayout>> {
        self.regions.get(&(region, state.clone())).cloned()
    }

    pub fn insert(&mut self, region: ElementHandle, state: ExpansionState, layout: Rc<RegionLayout>) {
        self.regions.insert((region, state), layout);
    }

    /// \returns the number of cached region layouts.
    pub fn num_region_layouts(&self) -> usize {
        self.regions.len()
    }

    /// Drop everything that was computed for \p region.
    pub fn invalidate_region(&mut self, region: ElementHandle) {
        self.layers.remove(&region);
        self.regions.retain(|(r, _), _| *r != region);
    }

    /// Drop the layers and layouts of every region that contains \p elem.
    /// Called when \p elem is expanded or collapsed.
    pub fn invalidate_ancestors(&mut self, model: &Model, elem: ElementHandle) {
        for parent in model.ancestors(elem) {
            if model.is_region(parent) {
                self.invalidate_region(parent);
            }
        }
        #[cfg(feature = "log")]
        log::debug!(
            "Invalidated the layouts above '{}', {} left in the cache.",
            model.id(elem),
            self.regions.len()
        );
    }

    pub fn clear(&mut self) {
        self.layers.clear();
        self.regions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::base::NodeKind;

    #[test]
    fn expansion_state_tracks_nested_nodes() {
        let mut m = Model::new();
        let top = m.add_region(m.root(), "top").unwrap();
        let outer = m.add_node(top, "outer", "outer", NodeKind::Theta).unwrap();
        let body = m.add_region(outer, "body").unwrap();
        let inner = m.add_node(body, "inner", "inner", NodeKind::Gamma).unwrap();
        m.add_region(inner, "branch").unwrap();

        let collapsed = ExpansionState::capture(&m, top);
        assert!(collapsed.expanded_nodes().is_empty());

        m.set_expanded(inner, true);
        let inner_only = ExpansionState::capture(&m, top);
        assert_eq!(inner_only.expanded_nodes(), &[inner]);

        m.set_expanded(outer, true);
        let both = ExpansionState::capture(&m, top);
        assert_eq!(both.expanded_nodes(), &[outer, inner]);
        assert_ne!(both, inner_only);

        // The state of a region only covers what is below it.
        assert_eq!(ExpansionState::capture(&m, body).expanded_nodes(), &[inner]);
    }

    #[test]
    fn invalidation_drops_enclosing_regions() {
        let mut m = Model::new();
        let top = m.add_region(m.root(), "top").unwrap();
        let outer = m.add_node(top, "outer", "outer", NodeKind::Theta).unwrap();
        let body = m.add_region(outer, "body").unwrap();
        let inner = m.add_node(body, "inner", "inner", NodeKind::Gamma).unwrap();
        let other = m.add_region(m.root(), "other").unwrap();

        let mut cache = LayoutCache::new();
        for r in [top, body, other].iter() {
            cache.insert_layers(*r, Rc::new(LayerTable::new()));
        }
        cache.invalidate_ancestors(&m, inner);
        assert!(cache.layers(top).is_none());
        assert!(cache.layers(body).is_none());
        assert!(cache.layers(other).is_some());

        cache.clear();
        assert!(cache.layers(other).is_none());
        assert_eq!(cache.num_region_layouts(), 0);
    }
}
