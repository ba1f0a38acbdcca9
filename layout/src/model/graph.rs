//! This module implements the arena that owns every element and edge of a
//! loaded RVSDG document. Elements refer to each other with handles, and the
//! whole graph is dropped at once when the model goes away.

use super::edge::{Edge, EdgeHandle, EdgeRef};
use super::element::{Element, ElementHandle, ElementKind, NodeData, RegionData, Tag};
use crate::core::base::NodeKind;
use crate::error::LoadError;
use std::collections::HashMap;

/// A line of the outline of the document: the compound elements (regions and
/// expandable nodes) in depth-first order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub handle: ElementHandle,
    pub depth: usize,
    pub type_name: &'static str,
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct Model {
    /// A list of all elements. The first element is the synthetic root.
    elements: Vec<Element>,
    edges: Vec<Edge>,
    /// Maps document ids to elements. The root is not in the map.
    ids: HashMap<String, ElementHandle>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    pub fn new() -> Self {
        let root = Element::new("", None, ElementKind::Region(RegionData::default()));
        Model {
            elements: vec![root],
            edges: Vec::new(),
            ids: HashMap::new(),
        }
    }

    /// \returns the synthetic root region that owns the top-level elements.
    pub fn root(&self) -> ElementHandle {
        ElementHandle::new(0)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.len() == 1
    }

    pub fn iter(&self) -> impl Iterator<Item = ElementHandle> {
        (0..self.elements.len()).map(ElementHandle::new)
    }

    pub fn element(&self, h: ElementHandle) -> &Element {
        &self.elements[h.get_index()]
    }

    fn element_mut(&mut self, h: ElementHandle) -> &mut Element {
        &mut self.elements[h.get_index()]
    }

    pub fn tag(&self, h: ElementHandle) -> Tag {
        self.element(h).tag()
    }

    pub fn id(&self, h: ElementHandle) -> &str {
        &self.element(h).id
    }

    /// Lookup an element by its document id.
    pub fn get(&self, id: &str) -> Option<ElementHandle> {
        self.ids.get(id).copied()
    }

    pub fn parent(&self, h: ElementHandle) -> Option<ElementHandle> {
        self.element(h).parent
    }

    pub fn children(&self, h: ElementHandle) -> &[ElementHandle] {
        &self.element(h).children
    }

    pub fn num_edge_records(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_handles(&self) -> impl Iterator<Item = EdgeHandle> {
        (0..self.edges.len()).map(EdgeHandle::new)
    }

    pub fn edge_data(&self, e: EdgeHandle) -> &Edge {
        &self.edges[e.get_index()]
    }

    pub fn edge_data_mut(&mut self, e: EdgeHandle) -> &mut Edge {
        &mut self.edges[e.get_index()]
    }
}

// Building the graph.
impl Model {
    fn insert(
        &mut self,
        id: &str,
        parent: ElementHandle,
        kind: ElementKind,
    ) -> Result<ElementHandle, LoadError> {
        if self.ids.contains_key(id) {
            return Err(LoadError::DuplicateId(id.to_string()));
        }
        let handle = ElementHandle::new(self.elements.len());
        self.elements.push(Element::new(id, Some(parent), kind));
        self.ids.insert(id.to_string(), handle);
        Ok(handle)
    }

    fn assert_container(&self, parent: ElementHandle) {
        assert!(
            matches!(self.tag(parent), Tag::Node | Tag::Region),
            "Only nodes and regions have children"
        );
    }

    /// Add a node to the body of \p parent (a region, or a node).
    pub fn add_node(
        &mut self,
        parent: ElementHandle,
        id: &str,
        name: &str,
        kind: NodeKind,
    ) -> Result<ElementHandle, LoadError> {
        self.assert_container(parent);
        let data = NodeData {
            name: name.to_string(),
            kind,
            expanded: false,
            inputs: Vec::new(),
            outputs: Vec::new(),
        };
        let node = self.insert(id, parent, ElementKind::Node(data))?;
        self.element_mut(parent).children.push(node);
        Ok(node)
    }

    /// Add a region to \p parent (normally a compound node).
    pub fn add_region(
        &mut self,
        parent: ElementHandle,
        id: &str,
    ) -> Result<ElementHandle, LoadError> {
        self.assert_container(parent);
        let region = self.insert(id, parent, ElementKind::Region(RegionData::default()))?;
        self.element_mut(parent).children.push(region);
        Ok(region)
    }

    fn node_data_mut(&mut self, node: ElementHandle) -> &mut NodeData {
        match &mut self.element_mut(node).kind {
            ElementKind::Node(data) => data,
            _ => panic!("Expected a node"),
        }
    }

    fn region_data_mut(&mut self, region: ElementHandle) -> &mut RegionData {
        match &mut self.element_mut(region).kind {
            ElementKind::Region(data) => data,
            _ => panic!("Expected a region"),
        }
    }

    pub fn add_input(
        &mut self,
        node: ElementHandle,
        id: &str,
    ) -> Result<ElementHandle, LoadError> {
        assert_eq!(self.tag(node), Tag::Node, "Inputs belong to nodes");
        let input = self.insert(id, node, ElementKind::Input)?;
        self.node_data_mut(node).inputs.push(input);
        Ok(input)
    }

    pub fn add_output(
        &mut self,
        node: ElementHandle,
        id: &str,
    ) -> Result<ElementHandle, LoadError> {
        assert_eq!(self.tag(node), Tag::Node, "Outputs belong to nodes");
        let output = self.insert(id, node, ElementKind::Output)?;
        self.node_data_mut(node).outputs.push(output);
        Ok(output)
    }

    pub fn add_argument(
        &mut self,
        region: ElementHandle,
        id: &str,
    ) -> Result<ElementHandle, LoadError> {
        assert_eq!(self.tag(region), Tag::Region, "Arguments belong to regions");
        let arg = self.insert(id, region, ElementKind::Argument)?;
        self.region_data_mut(region).arguments.push(arg);
        Ok(arg)
    }

    pub fn add_result(
        &mut self,
        region: ElementHandle,
        id: &str,
    ) -> Result<ElementHandle, LoadError> {
        assert_eq!(self.tag(region), Tag::Region, "Results belong to regions");
        let res = self.insert(id, region, ElementKind::Result)?;
        self.region_data_mut(region).results.push(res);
        Ok(res)
    }

    /// Add an edge from \p source to \p target. Any pair of elements can be
    /// connected. Edges that don't go from an output or an argument to an
    /// input or a result are kept in the model, but layout skips them.
    pub fn add_edge(&mut self, source: ElementHandle, target: ElementHandle) -> EdgeHandle {
        let handle = EdgeHandle::new(self.edges.len());
        self.edges.push(Edge::new(source, target));
        self.element_mut(source).edges.push(handle);
        handle
    }
}

// Graph information.
impl Model {
    /// \returns the number of outgoing edges of \p v. Nodes don't have edges
    /// of their own; they own the edges of all of their outputs.
    pub fn num_edges(&self, v: ElementHandle) -> usize {
        let elem = self.element(v);
        match &elem.kind {
            ElementKind::Node(node) => node
                .outputs
                .iter()
                .map(|o| self.element(*o).edges.len())
                .sum(),
            _ => elem.edges.len(),
        }
    }

    /// \returns the \p n-th outgoing edge of \p v, counting through the edge
    /// lists of the outputs of a node one after the other.
    /// Panics if \p n is out of range.
    pub fn edge(&self, v: ElementHandle, n: usize) -> EdgeRef {
        let elem = self.element(v);
        let (port, handle) = match &elem.kind {
            ElementKind::Node(node) => {
                let mut n = n;
                let mut found = None;
                for output in node.outputs.iter() {
                    let edges = &self.element(*output).edges;
                    if n < edges.len() {
                        found = Some((*output, edges[n]));
                        break;
                    }
                    n -= edges.len();
                }
                match found {
                    Some(x) => x,
                    None => panic!(
                        "Edge index out of range for node '{}' with {} edges",
                        elem.id,
                        self.num_edges(v)
                    ),
                }
            }
            _ => {
                assert!(
                    n < elem.edges.len(),
                    "Edge index {} out of range for '{}' with {} edges",
                    n,
                    elem.id,
                    elem.edges.len()
                );
                (v, elem.edges[n])
            }
        };
        EdgeRef {
            handle,
            source: port,
            target: self.edge_data(handle).target,
        }
    }

    /// \returns the element that takes part in layering on behalf of \p h.
    /// Inputs and outputs are placed together with their node.
    pub fn vertex_of(&self, h: ElementHandle) -> ElementHandle {
        match self.tag(h) {
            Tag::Input | Tag::Output => self.parent(h).expect("Ports have a parent"),
            _ => h,
        }
    }

    /// \returns true if \p h is a node without nested regions.
    pub fn is_leaf_node(&self, h: ElementHandle) -> bool {
        self.tag(h) == Tag::Node && self.children(h).is_empty()
    }

    /// \returns true if \p h is a node that contains regions.
    pub fn is_expandable(&self, h: ElementHandle) -> bool {
        self.tag(h) == Tag::Node && !self.children(h).is_empty()
    }

    pub fn is_region(&self, h: ElementHandle) -> bool {
        self.tag(h) == Tag::Region
    }

    pub fn is_expanded(&self, h: ElementHandle) -> bool {
        self.element(h).as_node().map_or(false, |n| n.expanded)
    }

    pub fn arguments(&self, region: ElementHandle) -> &[ElementHandle] {
        match self.element(region).as_region() {
            Some(r) => &r.arguments,
            None => &[],
        }
    }

    pub fn results(&self, region: ElementHandle) -> &[ElementHandle] {
        match self.element(region).as_region() {
            Some(r) => &r.results,
            None => &[],
        }
    }

    /// Flip the expansion flag of \p node. \returns the new state.
    pub fn toggle_expanded(&mut self, node: ElementHandle) -> bool {
        let data = self.node_data_mut(node);
        data.expanded = !data.expanded;
        data.expanded
    }

    pub fn set_expanded(&mut self, node: ElementHandle, expanded: bool) {
        self.node_data_mut(node).expanded = expanded;
    }

    /// \returns the chain of parents of \p h, nearest first.
    pub fn ancestors(&self, h: ElementHandle) -> Vec<ElementHandle> {
        let mut res = Vec::new();
        let mut curr = self.parent(h);
        while let Some(p) = curr {
            res.push(p);
            curr = self.parent(p);
        }
        res
    }

    /// \returns all nodes and regions below \p h, in depth-first order.
    pub fn descendants(&self, h: ElementHandle) -> Vec<ElementHandle> {
        let mut res = Vec::new();
        let mut worklist: Vec<ElementHandle> = self.children(h).iter().rev().copied().collect();
        while let Some(curr) = worklist.pop() {
            res.push(curr);
            worklist.extend(self.children(curr).iter().rev());
        }
        res
    }

    /// \returns the edges that leave or enter \p v, or any of its ports.
    pub fn edges_touching(&self, v: ElementHandle) -> Vec<EdgeHandle> {
        self.edge_handles()
            .filter(|e| {
                let edge = self.edge_data(*e);
                edge.source == v
                    || edge.target == v
                    || self.vertex_of(edge.source) == v
                    || self.vertex_of(edge.target) == v
            })
            .collect()
    }

    pub fn clear_colors(&mut self) {
        for edge in self.edges.iter_mut() {
            edge.color = None;
        }
    }

    /// \returns the compound elements of the document in depth-first order.
    /// Leaf nodes and ports are not listed.
    pub fn outline(&self) -> Vec<OutlineEntry> {
        let mut res = Vec::new();
        self.outline_inner(self.root(), 0, &mut res);
        res
    }

    fn outline_inner(&self, h: ElementHandle, depth: usize, res: &mut Vec<OutlineEntry>) {
        for child in self.children(h) {
            if self.is_leaf_node(*child) {
                continue;
            }
            res.push(OutlineEntry {
                handle: *child,
                depth,
                type_name: self.element(*child).type_name(),
                id: self.id(*child).to_string(),
            });
            self.outline_inner(*child, depth + 1, res);
        }
    }
}

#[cfg(test)]
fn sample() -> (Model, ElementHandle, ElementHandle) {
    let mut m = Model::new();
    let lambda = m.add_node(m.root(), "f", "f", NodeKind::Lambda).unwrap();
    let region = m.add_region(lambda, "f.r").unwrap();
    let arg = m.add_argument(region, "a0").unwrap();
    let res = m.add_result(region, "r0").unwrap();
    let add = m.add_node(region, "n0", "add", NodeKind::Plain).unwrap();
    let i0 = m.add_input(add, "n0.i0").unwrap();
    let o0 = m.add_output(add, "n0.o0").unwrap();
    let o1 = m.add_output(add, "n0.o1").unwrap();
    m.add_edge(arg, i0);
    m.add_edge(o0, res);
    m.add_edge(o1, res);
    (m, region, add)
}

#[test]
fn test_edges_through_outputs() {
    let (m, _, add) = sample();
    assert_eq!(m.num_edges(add), 2);
    let e0 = m.edge(add, 0);
    let e1 = m.edge(add, 1);
    assert_eq!(m.id(e0.source), "n0.o0");
    assert_eq!(m.id(e1.source), "n0.o1");
    assert_eq!(m.id(e1.target), "r0");
    assert_eq!(m.vertex_of(e0.source), add);
}

#[test]
#[should_panic]
fn test_edge_out_of_range() {
    let (m, _, add) = sample();
    m.edge(add, 2);
}

#[test]
fn test_structure_queries() {
    let (mut m, region, add) = sample();
    let lambda = m.get("f").unwrap();
    assert!(m.is_expandable(lambda));
    assert!(!m.is_leaf_node(lambda));
    assert!(m.is_leaf_node(add));
    assert!(!m.is_expandable(region));
    assert_eq!(m.ancestors(add), vec![region, lambda, m.root()]);
    assert_eq!(m.descendants(m.root()), vec![lambda, region, add]);
    assert!(m.toggle_expanded(lambda));
    assert!(m.is_expanded(lambda));
    assert!(!m.toggle_expanded(lambda));
    assert_eq!(m.edges_touching(add).len(), 3);
}

#[test]
fn test_invalid_construction() {
    let (mut m, region, add) = sample();
    assert!(matches!(
        m.add_node(region, "n0", "dup", NodeKind::Plain),
        Err(LoadError::DuplicateId(_))
    ));
    assert!(matches!(
        m.add_input(add, "a0"),
        Err(LoadError::DuplicateId(_))
    ));
}

#[test]
fn test_structural_edges_are_kept() {
    let (mut m, region, add) = sample();
    let lambda = m.get("f").unwrap();
    let f_in = m.add_input(lambda, "f.i").unwrap();
    let f_out = m.add_output(lambda, "f.o").unwrap();
    let arg = m.get("a0").unwrap();
    let res = m.get("r0").unwrap();
    let into_body = m.add_edge(f_in, arg);
    let out_of_body = m.add_edge(res, f_out);

    assert_eq!(m.edge_data(into_body).target, arg);
    assert_eq!(m.num_edges(res), 1);
    assert_eq!(m.edge(res, 0).target, f_out);
    // Only the outputs of a node count as its edges.
    assert_eq!(m.num_edges(lambda), 0);
    assert_eq!(m.num_edges(add), 2);
    assert!(m.edges_touching(lambda).contains(&out_of_body));
    assert_eq!(m.results(region), &[res]);
}

#[test]
fn test_outline() {
    let (m, _, _) = sample();
    let outline: Vec<(usize, &str, String)> = m
        .outline()
        .into_iter()
        .map(|e| (e.depth, e.type_name, e.id))
        .collect();
    assert_eq!(
        outline,
        vec![
            (0, "Lambda", "f".to_string()),
            (1, "Region", "f.r".to_string())
        ]
    );
}
