/*!
This crate provides a library for loading, laying out and rendering RVSDG
(Regionalized Value-State Dependence Graph) documents. An RVSDG is a
hierarchical graph: nodes own regions, regions own nodes, and values flow
along edges from the outputs of nodes to the inputs of other nodes.

The layout is layered. Every region is laid out on its own: its results form
the bottom row, every node is placed above all of the nodes that consume its
values, and the arguments of the region form the top row. Edges are routed as
orthogonal polylines through corridors between the rows and the columns.
Expanded nodes contain the layouts of their regions.

The project also comes with a command line utility that renders a document
to .svg.

# Example: load, lay out and render a document

```rust
use rvsdg::backends::svg::SVGWriter;
use rvsdg::core::config::LayoutConfig;
use rvsdg::viewer::Viewer;

let contents = r#"<rvsdg>
  <region id="main">
    <argument id="x"/>
    <result id="y"/>
    <node id="n0" name="neg">
      <input id="n0.i"/>
      <output id="n0.o"/>
    </node>
    <edge source="x" target="n0.i"/>
    <edge source="n0.o" target="y"/>
  </region>
</rvsdg>"#;

let mut viewer = Viewer::from_xml(contents, LayoutConfig::default()).unwrap();
let main = viewer.element_by_id("main").unwrap();

// Rows, from the bottom: the result, the node, the argument.
let layout = viewer.layout_region(main).unwrap();
assert_eq!(layout.vertices.len(), 3);
assert_eq!(layout.edges.len(), 2);

// Highlight the edges of the node, and render.
let n0 = viewer.element_by_id("n0").unwrap();
viewer.color_edges_of(n0);
let mut svg = SVGWriter::new();
viewer.render(&mut svg, false);
assert!(svg.finalize().contains("data-id=\"n0\""));
```

# Example: build a model by hand

```rust
use rvsdg::core::base::NodeKind;
use rvsdg::core::config::LayoutConfig;
use rvsdg::model::Model;
use rvsdg::topo::cache::LayoutCache;
use rvsdg::topo::layout::LayoutEngine;

let mut model = Model::new();
let region = model.add_region(model.root(), "r").unwrap();
let res = model.add_result(region, "r0").unwrap();
let node = model.add_node(region, "n", "add", NodeKind::Plain).unwrap();
let out = model.add_output(node, "n.o").unwrap();
model.add_edge(out, res);

let config = LayoutConfig::default();
let mut cache = LayoutCache::new();
let layout = LayoutEngine::new(&model, &config, &mut cache)
    .layout(region)
    .unwrap();
assert_eq!(layout.edges[0].segments.len(), 3);
```
*/

pub mod adt;
pub mod backends;
pub mod core;
pub mod error;
pub mod model;
pub mod std_shapes;
pub mod topo;
pub mod viewer;
pub mod xml;
