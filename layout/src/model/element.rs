//! The elements of an RVSDG graph. All element kinds share the `Element`
//! record; the kind specific data lives in `ElementKind`.

use super::edge::EdgeHandle;
use crate::core::base::NodeKind;

/// Used by users to keep track of elements that are saved in the model.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash, Debug)]
pub struct ElementHandle {
    idx: usize,
}

impl ElementHandle {
    pub fn new(x: usize) -> Self {
        ElementHandle { idx: x }
    }
    pub fn get_index(&self) -> usize {
        self.idx
    }
}

impl From<usize> for ElementHandle {
    fn from(idx: usize) -> Self {
        ElementHandle { idx }
    }
}

/// A flat tag for the element kinds, for callers that only need to branch on
/// the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Node,
    Region,
    Argument,
    Result,
    Input,
    Output,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub name: String,
    pub kind: NodeKind,
    pub expanded: bool,
    pub inputs: Vec<ElementHandle>,
    pub outputs: Vec<ElementHandle>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionData {
    pub arguments: Vec<ElementHandle>,
    pub results: Vec<ElementHandle>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Node(NodeData),
    Region(RegionData),
    Argument,
    Result,
    Input,
    Output,
}

impl ElementKind {
    pub fn tag(&self) -> Tag {
        match self {
            ElementKind::Node(_) => Tag::Node,
            ElementKind::Region(_) => Tag::Region,
            ElementKind::Argument => Tag::Argument,
            ElementKind::Result => Tag::Result,
            ElementKind::Input => Tag::Input,
            ElementKind::Output => Tag::Output,
        }
    }
}

impl Tag {
    /// Ports are the edge endpoints. Inputs and outputs belong to a node,
    /// arguments and results to a region.
    pub fn is_port(&self) -> bool {
        !matches!(self, Tag::Node | Tag::Region)
    }

    /// Edges leave the graph through these ports.
    pub fn is_edge_source(&self) -> bool {
        matches!(self, Tag::Output | Tag::Argument)
    }

    /// Edges enter the graph through these ports.
    pub fn is_edge_target(&self) -> bool {
        matches!(self, Tag::Input | Tag::Result)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: String,
    pub parent: Option<ElementHandle>,
    /// Nested regions of a node, or the body of a region.
    pub children: Vec<ElementHandle>,
    /// Outgoing edges. Only outputs and arguments have edges.
    pub edges: Vec<EdgeHandle>,
    pub kind: ElementKind,
}

impl Element {
    pub fn new(id: &str, parent: Option<ElementHandle>, kind: ElementKind) -> Self {
        Self {
            id: id.to_string(),
            parent,
            children: Vec::new(),
            edges: Vec::new(),
            kind,
        }
    }

    pub fn tag(&self) -> Tag {
        self.kind.tag()
    }

    pub fn as_node(&self) -> Option<&NodeData> {
        if let ElementKind::Node(node) = &self.kind {
            return Some(node);
        }
        None
    }

    pub fn as_region(&self) -> Option<&RegionData> {
        if let ElementKind::Region(region) = &self.kind {
            return Some(region);
        }
        None
    }

    /// \returns the name that the tree outline shows for this element.
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            ElementKind::Node(node) => node.kind.type_name(),
            ElementKind::Region(_) => "Region",
            ElementKind::Argument => "Argument",
            ElementKind::Result => "Result",
            ElementKind::Input => "Input",
            ElementKind::Output => "Output",
        }
    }
}
