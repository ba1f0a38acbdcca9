use rvsdg::core::base::NodeKind;
use rvsdg::model::{ElementHandle, Model};

/// Add a node with \p num_inputs inputs and \p num_outputs outputs to
/// \p region. \returns the node, its inputs and its outputs.
#[allow(dead_code)]
fn add_node(
    m: &mut Model,
    region: ElementHandle,
    id: &str,
    num_inputs: usize,
    num_outputs: usize,
) -> (ElementHandle, Vec<ElementHandle>, Vec<ElementHandle>) {
    let node = m.add_node(region, id, id, NodeKind::Plain).unwrap();
    let inputs = (0..num_inputs)
        .map(|i| m.add_input(node, &format!("{}.i{}", id, i)).unwrap())
        .collect();
    let outputs = (0..num_outputs)
        .map(|i| m.add_output(node, &format!("{}.o{}", id, i)).unwrap())
        .collect();
    (node, inputs, outputs)
}

#[cfg(test)]
mod tests {
    use super::add_node;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rvsdg::adt::rank::LayerTable;
    use rvsdg::backends::svg::SVGWriter;
    use rvsdg::core::base::NodeKind;
    use rvsdg::core::config::LayoutConfig;
    use rvsdg::core::geometry::{Point, Segment};
    use rvsdg::error::LayoutError;
    use rvsdg::model::{ElementHandle, Model};
    use rvsdg::topo::cache::LayoutCache;
    use rvsdg::topo::layering::{layer_region, layered_edges};
    use rvsdg::topo::layout::{Layout, LayoutEngine, RegionLayout};
    use rvsdg::viewer::Viewer;
    use std::collections::HashSet;
    use std::rc::Rc;

    /// Build a random acyclic region. Node i only feeds nodes with a larger
    /// index, or the results.
    fn random_region(rng: &mut StdRng, num_nodes: usize) -> (Model, ElementHandle) {
        let mut m = Model::new();
        let region = m.add_region(m.root(), "r").unwrap();
        let num_args = rng.gen_range(0..3);
        let num_results = rng.gen_range(1..4);
        let args: Vec<ElementHandle> = (0..num_args)
            .map(|i| m.add_argument(region, &format!("a{}", i)).unwrap())
            .collect();
        let results: Vec<ElementHandle> = (0..num_results)
            .map(|i| m.add_result(region, &format!("r{}", i)).unwrap())
            .collect();

        let mut nodes = Vec::new();
        for i in 0..num_nodes {
            let num_inputs = rng.gen_range(0..3);
            let num_outputs = rng.gen_range(1..3);
            nodes.push(add_node(&mut m, region, &format!("n{}", i), num_inputs, num_outputs));
        }

        for i in 0..num_nodes {
            for out in nodes[i].2.clone() {
                for _ in 0..rng.gen_range(0..3) {
                    let consumer = if i + 1 < num_nodes && rng.gen_bool(0.7) {
                        let j = rng.gen_range(i + 1..num_nodes);
                        let inputs = &nodes[j].1;
                        if inputs.is_empty() {
                            continue;
                        }
                        inputs[rng.gen_range(0..inputs.len())]
                    } else {
                        results[rng.gen_range(0..results.len())]
                    };
                    m.add_edge(out, consumer);
                }
            }
        }

        for arg in args {
            let j = rng.gen_range(0..num_nodes);
            let inputs = &nodes[j].1;
            if !inputs.is_empty() {
                let input = inputs[rng.gen_range(0..inputs.len())];
                m.add_edge(arg, input);
            }
        }
        (m, region)
    }

    fn region_layout(m: &Model, region: ElementHandle) -> Rc<RegionLayout> {
        let config = LayoutConfig::default();
        let mut cache = LayoutCache::new();
        LayoutEngine::new(m, &config, &mut cache)
            .region_layout(region)
            .unwrap()
    }

    fn layout(m: &Model, region: ElementHandle) -> Layout {
        let config = LayoutConfig::default();
        let mut cache = LayoutCache::new();
        LayoutEngine::new(m, &config, &mut cache)
            .layout(region)
            .unwrap()
    }

    fn check_layers(m: &Model, region: ElementHandle, table: &LayerTable) {
        // Every edge points to a lower row.
        for v in table.iter() {
            for i in 0..m.num_edges(v) {
                let target = m.vertex_of(m.edge(v, i).target);
                assert!(table.level(target) < table.level(v));
            }
        }
        for edge in layered_edges(m, table) {
            assert!(edge.source_row > edge.target_row);
        }

        // Row zero holds the results, and the top row holds the arguments.
        assert_eq!(table.row(0), &m.results(region).to_vec());
        let args = m.arguments(region);
        if !args.is_empty() {
            assert_eq!(table.row(table.num_levels() - 1), &args.to_vec());
        }

        let expected = m.children(region).len() + args.len() + m.results(region).len();
        assert_eq!(table.len(), expected);
    }

    #[test]
    fn layering_of_random_dags() {
        let mut rng = StdRng::seed_from_u64(7);
        for round in 0..50 {
            let (m, region) = random_region(&mut rng, 1 + round % 15);
            let table = layer_region(&m, region).unwrap();
            check_layers(&m, region, &table);
        }
    }

    /// \returns the corridor coordinates that \p segments run through: the
    /// y of every horizontal run and the x of every vertical run between the
    /// first and the last segment.
    fn corridor_runs(segments: &[Segment]) -> (Vec<i32>, Vec<i32>) {
        let mut ys = Vec::new();
        let mut xs = Vec::new();
        ys.push(segments[0].stop.y);
        if segments.len() == 5 {
            xs.push(segments[2].start.x);
            ys.push(segments[3].start.y);
        }
        (ys, xs)
    }

    #[test]
    fn corridors_do_not_collide() {
        let mut rng = StdRng::seed_from_u64(1234);
        for round in 0..30 {
            let (m, region) = random_region(&mut rng, 2 + round % 12);
            let rl = region_layout(&m, region);

            let mut seen_y = HashSet::new();
            let mut seen_x = HashSet::new();
            for route in rl.edges.iter() {
                assert!(route.segments.len() == 3 || route.segments.len() == 5);
                for s in route.segments.iter() {
                    assert!(s.is_horizontal() || s.is_vertical());
                    assert!(s.start.is_non_negative() && s.stop.is_non_negative());
                }
                let (ys, xs) = corridor_runs(&route.segments);
                for y in ys {
                    assert!(seen_y.insert(y), "Two edges share the corridor y={}", y);
                }
                for x in xs {
                    assert!(seen_x.insert(x), "Two edges share the corridor x={}", x);
                }
            }
        }
    }

    #[test]
    fn layout_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..10 {
            let (m, region) = random_region(&mut rng, 12);
            let first = layout(&m, region);
            let second = layout(&m, region);
            assert_eq!(first.vertices, second.vertices);
            assert_eq!(first.edges, second.edges);
            assert_eq!((first.width, first.height), (second.width, second.height));
        }
    }

    #[test]
    fn single_node_region() {
        let mut m = Model::new();
        let region = m.add_region(m.root(), "r").unwrap();
        let r0 = m.add_result(region, "r0").unwrap();
        let (n, _, outs) = add_node(&mut m, region, "n1", 1, 1);
        m.add_edge(outs[0], r0);

        let rl = region_layout(&m, region);
        assert_eq!(rl.layers.row(0), &vec![r0]);
        assert_eq!(rl.layers.row(1), &vec![n]);

        let g = &rl.geometry;
        assert_eq!(g.column_widths, vec![44]);
        assert_eq!(g.row_spacing, vec![10, 20]);
        assert_eq!(g.column_spacing, vec![10, 0]);
        assert_eq!(g.routing_xs, vec![0]);
        assert_eq!(g.routing_ys, vec![112, 10]);
        assert_eq!(g.positions[&n], Point::new(10, 20));
        assert_eq!(g.positions[&r0], Point::new(27, 122));
        assert_eq!(rl.size, Point::new(64, 152));

        assert_eq!(rl.edges.len(), 1);
        assert_eq!(
            rl.edges[0].segments,
            vec![
                Segment::new(Point::new(30, 102), Point::new(30, 112)),
                Segment::new(Point::new(30, 112), Point::new(32, 112)),
                Segment::new(Point::new(32, 112), Point::new(32, 122)),
            ]
        );
    }

    #[test]
    fn two_sinks_use_distinct_offsets() {
        let mut m = Model::new();
        let region = m.add_region(m.root(), "r").unwrap();
        let r0 = m.add_result(region, "r0").unwrap();
        let r1 = m.add_result(region, "r1").unwrap();
        let (a, _, a_out) = add_node(&mut m, region, "A", 0, 1);
        let (b, _, b_out) = add_node(&mut m, region, "B", 0, 1);
        m.add_edge(a_out[0], r0);
        m.add_edge(b_out[0], r1);

        let rl = region_layout(&m, region);
        assert_eq!(rl.layers.row(1), &vec![a, b]);
        assert_eq!(rl.edges.len(), 2);
        let y0 = rl.edges[0].segments[1].start.y;
        let y1 = rl.edges[1].segments[1].start.y;
        assert_eq!(rl.edges[0].segments.len(), 3);
        assert_eq!(rl.edges[1].segments.len(), 3);
        assert_eq!(y0, rl.geometry.routing_ys[0]);
        assert_eq!(y1, y0 - 10);
    }

    #[test]
    fn spanning_edge_uses_three_corridors() {
        let mut m = Model::new();
        let region = m.add_region(m.root(), "r").unwrap();
        let r0 = m.add_result(region, "r0").unwrap();
        let r1 = m.add_result(region, "r1").unwrap();
        let (a, _, a_out) = add_node(&mut m, region, "A", 0, 2);
        let (b, b_in, b_out) = add_node(&mut m, region, "B", 1, 1);
        let (c, c_in, c_out) = add_node(&mut m, region, "C", 1, 1);
        m.add_edge(c_out[0], r0);
        m.add_edge(b_out[0], c_in[0]);
        m.add_edge(a_out[0], b_in[0]);
        m.add_edge(a_out[1], r1);

        let rl = region_layout(&m, region);
        assert_eq!(rl.layers.row(1), &vec![c]);
        assert_eq!(rl.layers.row(2), &vec![b]);
        assert_eq!(rl.layers.row(3), &vec![a]);

        let g = &rl.geometry;
        let route = |src| rl.edges.iter().find(|r| r.source == src).unwrap();

        // The edges that used the corridors first.
        assert_eq!(route(c_out[0]).segments[1].start.y, g.routing_ys[0]);
        assert_eq!(route(a_out[0]).segments[1].start.y, g.routing_ys[2]);

        let long = route(a_out[1]);
        assert_eq!(long.segments.len(), 5);
        assert_eq!(long.segments[1].start.y, g.routing_ys[2] - 10);
        assert_eq!(long.segments[2].start.x, g.routing_xs[1]);
        assert_eq!(long.segments[3].start.y, g.routing_ys[0] - 10);
        assert_eq!(long.segments[4].stop.y, g.positions[&r1].y);
    }

    #[test]
    fn edges_that_leave_a_region_are_not_routed() {
        let mut m = Model::new();
        let outer = m.add_region(m.root(), "outer").unwrap();
        let r0 = m.add_result(outer, "r0").unwrap();
        let t = m.add_node(outer, "t", "loop", NodeKind::Theta).unwrap();
        let t_out = m.add_output(t, "t.o").unwrap();
        m.add_edge(t_out, r0);
        let inner = m.add_region(t, "inner").unwrap();
        let res = m.add_result(inner, "res").unwrap();
        let (n, _, n_out) = add_node(&mut m, inner, "n", 1, 1);
        m.add_edge(n_out[0], res);
        let escaping = m.add_edge(n_out[0], r0);

        // The edge to 'r0' takes no row, no corridor and no route.
        let rl = region_layout(&m, inner);
        assert_eq!(rl.layers.row(1), &vec![n]);
        assert_eq!(rl.edges.len(), 1);
        assert_eq!(rl.edges[0].target, res);
        assert_eq!(rl.geometry.row_spacing, vec![10, 20]);

        m.set_expanded(t, true);
        let flat = layout(&m, outer);
        assert_eq!(flat.edges.len(), 2);
        assert!(flat.edges.iter().all(|r| r.edge != escaping));
    }

    #[test]
    fn cycles_are_errors() {
        let mut m = Model::new();
        let region = m.add_region(m.root(), "r").unwrap();
        let (_, x_in, x_out) = add_node(&mut m, region, "x", 1, 1);
        let (_, y_in, y_out) = add_node(&mut m, region, "y", 1, 1);
        m.add_edge(x_out[0], y_in[0]);
        m.add_edge(y_out[0], x_in[0]);

        let config = LayoutConfig::default();
        let mut cache = LayoutCache::new();
        let res = LayoutEngine::new(&m, &config, &mut cache).layout(region);
        assert!(matches!(res, Err(LayoutError::Cycle { .. })));
    }

    static DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rvsdg>
  <node id="main" name="main" type="lambda">
    <region id="main.body">
      <argument id="p"/>
      <argument id="q"/>
      <result id="res"/>
      <node id="cmp" name="lt">
        <input id="cmp.a"/><input id="cmp.b"/>
        <output id="cmp.o"/>
      </node>
      <node id="sel" name="select" type="gamma">
        <input id="sel.pred"/><input id="sel.v"/>
        <output id="sel.o"/>
        <region id="then">
          <argument id="then.v"/>
          <result id="then.r"/>
          <edge source="then.v" target="then.r"/>
        </region>
        <region id="else">
          <argument id="else.v"/>
          <result id="else.r"/>
          <node id="neg" name="neg &amp; inc"><input id="neg.i"/><output id="neg.o"/></node>
          <edge source="else.v" target="neg.i"/>
          <edge source="neg.o" target="else.r"/>
        </region>
      </node>
      <edge source="p" target="cmp.a"/>
      <edge source="q" target="cmp.b"/>
      <edge source="cmp.o" target="sel.pred"/>
      <edge source="q" target="sel.v"/>
      <edge source="sel.o" target="res"/>
    </region>
  </node>
</rvsdg>"#;

    #[test]
    fn document_end_to_end() {
        let mut viewer = Viewer::from_xml(DOCUMENT, LayoutConfig::default()).unwrap();
        let body = viewer.element_by_id("main.body").unwrap();
        let sel = viewer.element_by_id("sel").unwrap();
        let q = viewer.element_by_id("q").unwrap();

        let collapsed = viewer.layout_region(body).unwrap().clone();
        // Arguments on top, results at the bottom.
        let top_row = collapsed.vertices.iter().map(|v| v.row).max().unwrap();
        for id in ["p", "q"].iter() {
            let h = viewer.element_by_id(id).unwrap();
            assert_eq!(collapsed.vertex(h).unwrap().row, top_row);
        }
        let res = viewer.element_by_id("res").unwrap();
        assert_eq!(collapsed.vertex(res).unwrap().row, 0);
        // 'q' feeds 'cmp' one row down and 'sel' two rows down.
        assert_eq!(viewer.segments_for_vertex(q).len(), 3 + 5);

        viewer.toggle_expansion(sel).unwrap();
        let expanded = viewer.current().unwrap().clone();
        let neg = viewer.element_by_id("neg").unwrap();
        let neg_vertex = expanded.vertex(neg).unwrap();
        assert_eq!(neg_vertex.depth, 1);
        let sel_vertex = expanded.vertex(sel).unwrap();
        assert!(neg_vertex.pos.x > sel_vertex.pos.x && neg_vertex.pos.y > sel_vertex.pos.y);
        assert_eq!(expanded.regions.len(), 2);
        assert_eq!(viewer.hit_test(neg_vertex.pos.add(Point::new(2, 30))), Some(neg));

        viewer.color_edges_of(q);
        let mut svg = SVGWriter::new();
        viewer.render(&mut svg, true);
        let out = svg.finalize();
        for id in ["sel", "then", "else", "neg", "then.v", "cmp.o"].iter() {
            assert!(out.contains(&format!("data-id=\"{}\"", id)), "missing {}", id);
        }
        assert!(out.contains("neg &amp; inc"));
        assert!(out.contains("stroke=\"#ff0000ff\""));
    }

    #[test]
    fn document_root_is_a_region() {
        let mut viewer = Viewer::from_xml(DOCUMENT, LayoutConfig::default()).unwrap();
        let root = viewer.model().root();
        let main = viewer.element_by_id("main").unwrap();
        let layout = viewer.layout_region(root).unwrap();
        assert_eq!(layout.vertices.len(), 1);
        assert_eq!(layout.vertices[0].handle, main);
        assert!(layout.edges.is_empty());

        let outline: Vec<String> = viewer
            .model()
            .outline()
            .iter()
            .map(|e| format!("{}{}", e.depth, e.type_name))
            .collect();
        assert_eq!(outline, vec!["0Lambda", "1Region", "2Gamma", "3Region", "3Region"]);
    }
}
