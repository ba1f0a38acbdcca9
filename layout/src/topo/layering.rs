//! Longest-path layering of the vertices of a region.
//!
//! The layers are built bottom-up. Row zero holds the results of the region.
//! Every other vertex is placed in the lowest row that is above all of its
//! successors, and the arguments of the region get a row of their own on top.
//! The order of the vertices in a row follows the declaration order, which
//! makes the result deterministic.

#[cfg(feature = "log")]
extern crate log;

use crate::adt::rank::LayerTable;
use crate::error::LayoutError;
use crate::model::{EdgeRef, ElementHandle, Model, Tag};
use std::collections::HashSet;

/// Assign every child, argument and result of \p region to a row.
pub fn layer_region(model: &Model, region: ElementHandle) -> Result<LayerTable, LayoutError> {
    if model.tag(region) != Tag::Region {
        return Err(LayoutError::NotARegion(model.id(region).to_string()));
    }

    let children = model.children(region);
    let results = model.results(region);

    // Successors outside of this region can't be layered here.
    let members: HashSet<ElementHandle> =
        children.iter().chain(results.iter()).copied().collect();

    let mut table = LayerTable::new();
    let mut nodes_below_current: HashSet<ElementHandle> = HashSet::new();

    // Layer 0 is set to all results.
    table.ensure_level(0);
    for res in results {
        table.add_element_to_rank(*res, 0);
        nodes_below_current.insert(*res);
    }

    // New layer, we don't want more nodes in layer 0.
    let mut current_layer = 1;

    // Layer 1 starts with the nodes that have no outgoing edges.
    let mut unassigned: Vec<ElementHandle> = Vec::new();
    let mut assigned_in_row: Vec<ElementHandle> = Vec::new();
    for node in children {
        if model.num_edges(*node) == 0 {
            table.add_element_to_rank(*node, current_layer);
            assigned_in_row.push(*node);
        } else {
            unassigned.push(*node);
        }
    }

    // The rest of the nodes go into layers 1..n.
    while !unassigned.is_empty() {
        let mut found_node = false;

        // Find the nodes whose successors are all below the current layer.
        let mut i = 0;
        while i < unassigned.len() {
            let node = unassigned[i];
            let eligible = successors(model, node)
                .filter(|succ| members.contains(succ))
                .all(|succ| nodes_below_current.contains(&succ));
            if eligible {
                found_node = true;
                table.add_element_to_rank(node, current_layer);
                assigned_in_row.push(node);
                unassigned.remove(i);
            } else {
                i += 1;
            }
        }

        if !found_node {
            // Nothing was placed in the row that we just finished, so the set
            // of nodes below can't grow anymore.
            if assigned_in_row.is_empty() {
                return Err(LayoutError::Cycle {
                    region: model.id(region).to_string(),
                    vertices: unassigned.iter().map(|n| model.id(*n).to_string()).collect(),
                });
            }
            current_layer += 1;
            nodes_below_current.extend(assigned_in_row.drain(..));
        }
    }

    // The last layer is set to all arguments.
    let arguments = model.arguments(region);
    if !arguments.is_empty() {
        let top = table.num_levels();
        for arg in arguments {
            table.add_element_to_rank(*arg, top);
        }
    }

    table.verify();

    #[cfg(feature = "log")]
    log::debug!(
        "Layered region '{}' into {} rows.",
        model.id(region),
        table.num_levels()
    );

    Ok(table)
}

/// \returns true if \p edge carries a value from an output or an argument to
/// an input or a result. Other edges, such as the ones that connect the
/// inputs of a structural node to the arguments of its regions, are not
/// drawn.
fn is_dataflow(model: &Model, edge: &EdgeRef) -> bool {
    model.tag(edge.source).is_edge_source() && model.tag(edge.target).is_edge_target()
}

/// \returns the vertices that the dataflow edges of \p v point to.
fn successors(model: &Model, v: ElementHandle) -> impl Iterator<Item = ElementHandle> + '_ {
    (0..model.num_edges(v))
        .map(move |i| model.edge(v, i))
        .filter(move |edge| is_dataflow(model, edge))
        .map(move |edge| model.vertex_of(edge.target))
}

/// An edge of a region together with the layer cells of its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayeredEdge {
    pub edge: EdgeRef,
    pub source_vertex: ElementHandle,
    pub target_vertex: ElementHandle,
    pub source_row: usize,
    pub target_row: usize,
    pub target_column: usize,
}

impl LayeredEdge {
    /// \returns true if the edge connects two neighboring rows.
    pub fn is_adjacent(&self) -> bool {
        self.source_row - self.target_row == 1
    }
}

/// \returns the edges of the layered region in the canonical order: bottom
/// row first, vertices in row order, and the edges of each vertex in output
/// order. Spacing and routing both walk the edges in this order, and the
/// corridor assignment depends on it.
/// Edges that leave the region, edges that don't carry a value from an output
/// side port to an input side port, and edges that don't point to a lower row
/// are skipped.
pub fn layered_edges(model: &Model, table: &LayerTable) -> Vec<LayeredEdge> {
    let mut res = Vec::new();
    for vertex in table.iter() {
        let source = table.cell(vertex).expect("Vertex is ranked");
        for i in 0..model.num_edges(vertex) {
            let edge = model.edge(vertex, i);
            let target_vertex = model.vertex_of(edge.target);
            let target = match table.cell(target_vertex) {
                Some(cell) if is_dataflow(model, &edge) && source.row > cell.row => cell,
                _ => {
                    #[cfg(feature = "log")]
                    log::warn!(
                        "Skipping the edge from '{}' to '{}'.",
                        model.id(edge.source),
                        model.id(edge.target)
                    );
                    continue;
                }
            };
            res.push(LayeredEdge {
                edge,
                source_vertex: vertex,
                target_vertex,
                source_row: source.row,
                target_row: target.row,
                target_column: target.column,
            });
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::base::NodeKind;

    fn ids(model: &Model, table: &LayerTable) -> Vec<Vec<String>> {
        table
            .ranks()
            .iter()
            .map(|row| row.iter().map(|h| model.id(*h).to_string()).collect())
            .collect()
    }

    /// Add a node with one input and one output to \p region.
    fn add_simple(
        model: &mut Model,
        region: ElementHandle,
        id: &str,
    ) -> (ElementHandle, ElementHandle, ElementHandle) {
        let node = model.add_node(region, id, id, NodeKind::Plain).unwrap();
        let input = model.add_input(node, &format!("{}.i", id)).unwrap();
        let output = model.add_output(node, &format!("{}.o", id)).unwrap();
        (node, input, output)
    }

    #[test]
    fn single_node() {
        let mut m = Model::new();
        let region = m.add_region(m.root(), "r").unwrap();
        let r0 = m.add_result(region, "r0").unwrap();
        let (_, _, out) = add_simple(&mut m, region, "n");
        m.add_edge(out, r0);

        let table = layer_region(&m, region).unwrap();
        assert_eq!(ids(&m, &table), vec![vec!["r0"], vec!["n"]]);
        let edges = layered_edges(&m, &table);
        assert_eq!(edges.len(), 1);
        assert!(edges[0].is_adjacent());
    }

    #[test]
    fn independent_sinks_keep_declaration_order() {
        let mut m = Model::new();
        let region = m.add_region(m.root(), "r").unwrap();
        let r0 = m.add_result(region, "r0").unwrap();
        let r1 = m.add_result(region, "r1").unwrap();
        let (_, _, a) = add_simple(&mut m, region, "a");
        let (_, _, b) = add_simple(&mut m, region, "b");
        m.add_edge(a, r0);
        m.add_edge(b, r1);

        let table = layer_region(&m, region).unwrap();
        assert_eq!(ids(&m, &table), vec![vec!["r0", "r1"], vec!["a", "b"]]);
    }

    #[test]
    fn chain_with_arguments() {
        let mut m = Model::new();
        let region = m.add_region(m.root(), "r").unwrap();
        let a0 = m.add_argument(region, "a0").unwrap();
        let a1 = m.add_argument(region, "a1").unwrap();
        let r0 = m.add_result(region, "r0").unwrap();
        // Declared out of order on purpose: 'top' feeds 'mid' feeds 'r0'.
        let (_, top_in, top_out) = add_simple(&mut m, region, "top");
        let (_, mid_in, mid_out) = add_simple(&mut m, region, "mid");
        let (_, _, _) = add_simple(&mut m, region, "dead");
        m.add_edge(a0, top_in);
        m.add_edge(a1, mid_in);
        m.add_edge(top_out, mid_in);
        m.add_edge(mid_out, r0);

        let table = layer_region(&m, region).unwrap();
        assert_eq!(
            ids(&m, &table),
            vec![
                vec!["r0"],
                vec!["dead", "mid"],
                vec!["top"],
                vec!["a0", "a1"]
            ]
        );

        let edges = layered_edges(&m, &table);
        // Canonical order: row 1 (mid), row 2 (top), then the arguments.
        let order: Vec<&str> = edges.iter().map(|e| m.id(e.edge.source)).collect();
        assert_eq!(order, vec!["mid.o", "top.o", "a0", "a1"]);
        assert!(!edges[3].is_adjacent());
        assert_eq!(edges[3].target_column, 1);
    }

    #[test]
    fn empty_region() {
        let mut m = Model::new();
        let region = m.add_region(m.root(), "r").unwrap();
        let table = layer_region(&m, region).unwrap();
        assert_eq!(table.num_levels(), 1);
        assert!(table.is_empty());

        m.add_argument(region, "a0").unwrap();
        let table = layer_region(&m, region).unwrap();
        assert_eq!(ids(&m, &table), vec![vec![], vec!["a0".to_string()]]);
    }

    #[test]
    fn cycles_are_reported() {
        let mut m = Model::new();
        let region = m.add_region(m.root(), "r").unwrap();
        let r0 = m.add_result(region, "r0").unwrap();
        let (_, _, ok_out) = add_simple(&mut m, region, "ok");
        let (_, x_in, x_out) = add_simple(&mut m, region, "x");
        let (_, y_in, y_out) = add_simple(&mut m, region, "y");
        m.add_edge(ok_out, r0);
        m.add_edge(x_out, y_in);
        m.add_edge(y_out, x_in);

        let err = layer_region(&m, region).unwrap_err();
        assert_eq!(
            err,
            LayoutError::Cycle {
                region: "r".to_string(),
                vertices: vec!["x".to_string(), "y".to_string()],
            }
        );
    }

    #[test]
    fn edges_that_leave_the_region_are_ignored() {
        let mut m = Model::new();
        let outer = m.add_region(m.root(), "outer").unwrap();
        let r0 = m.add_result(outer, "r0").unwrap();
        let t = m.add_node(outer, "t", "loop", NodeKind::Theta).unwrap();
        let t_out = m.add_output(t, "t.o").unwrap();
        m.add_edge(t_out, r0);
        let inner = m.add_region(t, "inner").unwrap();
        let res = m.add_result(inner, "res").unwrap();
        let (_, a_in, a_out) = add_simple(&mut m, inner, "a");
        let (_, _, b_out) = add_simple(&mut m, inner, "b");
        m.add_edge(a_out, res);
        // 'b' only feeds the result of the enclosing region, and 'a' also
        // feeds it.
        m.add_edge(b_out, r0);
        m.add_edge(a_out, r0);
        m.add_edge(b_out, a_in);

        let table = layer_region(&m, inner).unwrap();
        assert_eq!(ids(&m, &table), vec![vec!["res"], vec!["a"], vec!["b"]]);
        let edges = layered_edges(&m, &table);
        let pairs: Vec<(&str, &str)> = edges
            .iter()
            .map(|e| (m.id(e.edge.source), m.id(e.edge.target)))
            .collect();
        assert_eq!(pairs, vec![("a.o", "res"), ("b.o", "a.i")]);

        // The outer region doesn't see the edges of the inner one.
        let table = layer_region(&m, outer).unwrap();
        assert_eq!(ids(&m, &table), vec![vec!["r0"], vec!["t"]]);
        assert_eq!(layered_edges(&m, &table).len(), 1);
    }

    #[test]
    fn structural_edges_are_skipped() {
        let mut m = Model::new();
        let outer = m.add_region(m.root(), "outer").unwrap();
        let g = m.add_node(outer, "g", "pick", NodeKind::Gamma).unwrap();
        let g_in = m.add_input(g, "g.i").unwrap();
        let g_out = m.add_output(g, "g.o").unwrap();
        let body = m.add_region(g, "body").unwrap();
        let arg = m.add_argument(body, "body.a").unwrap();
        let res = m.add_result(body, "body.r").unwrap();
        m.add_edge(g_in, arg);
        m.add_edge(res, g_out);
        m.add_edge(arg, res);
        // A result can't feed an argument.
        m.add_edge(res, arg);

        let table = layer_region(&m, body).unwrap();
        assert_eq!(ids(&m, &table), vec![vec!["body.r"], vec!["body.a"]]);
        let edges = layered_edges(&m, &table);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].edge.source, arg);
        assert_eq!(edges[0].edge.target, res);

        let table = layer_region(&m, outer).unwrap();
        assert_eq!(ids(&m, &table), vec![Vec::<String>::new(), vec!["g".to_string()]]);
        assert!(layered_edges(&m, &table).is_empty());
    }

    #[test]
    fn not_a_region() {
        let mut m = Model::new();
        let region = m.add_region(m.root(), "r").unwrap();
        let (node, _, _) = add_simple(&mut m, region, "n");
        assert_eq!(
            layer_region(&m, node).unwrap_err(),
            LayoutError::NotARegion("n".to_string())
        );
    }
}
