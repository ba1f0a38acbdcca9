use super::element::ElementHandle;

#[derive(Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash, Debug)]
pub struct EdgeHandle {
    idx: usize,
}

impl EdgeHandle {
    pub fn new(x: usize) -> Self {
        EdgeHandle { idx: x }
    }
    pub fn get_index(&self) -> usize {
        self.idx
    }
}

/// A connection from an output (or region argument) to an input (or region
/// result). The edge refers to its endpoints by handle and owns neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub source: ElementHandle,
    pub target: ElementHandle,
    /// Index into the edge palette, or None for the default color.
    pub color: Option<usize>,
    /// Stacking order. Edges with a larger value are drawn on top.
    pub z_value: u32,
}

impl Edge {
    pub fn new(source: ElementHandle, target: ElementHandle) -> Self {
        Self {
            source,
            target,
            color: None,
            z_value: 0,
        }
    }
}

/// One outgoing edge of a vertex, as seen through `Model::edge`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRef {
    pub handle: EdgeHandle,
    /// The port that the edge leaves from.
    pub source: ElementHandle,
    /// The port that the edge enters.
    pub target: ElementHandle,
}
