//! Builds a `Model` from the XML form of an RVSDG document.
//!
//! The document is a tree of `node` and `region` elements. Nodes own their
//! `input` and `output` ports, and regions own their `argument` and `result`
//! ports. `edge` elements may appear anywhere and refer to the ports by id.
//! Elements with other tags are transparent: their children are attached to
//! the enclosing node or region.

#[cfg(feature = "log")]
extern crate log;

use crate::core::base::NodeKind;
use crate::error::LoadError;
use crate::model::{ElementHandle, Model, Tag};
use roxmltree::{Document, Node};

const TAG_NODE: &str = "node";
const TAG_REGION: &str = "region";
const TAG_INPUT: &str = "input";
const TAG_OUTPUT: &str = "output";
const TAG_ARGUMENT: &str = "argument";
const TAG_RESULT: &str = "result";
const TAG_EDGE: &str = "edge";

fn required<'a>(elem: &Node<'a, '_>, attr: &'static str) -> Result<&'a str, LoadError> {
    elem.attribute(attr)
        .ok_or_else(|| LoadError::MissingAttribute {
            tag: elem.tag_name().name().to_string(),
            attr,
        })
}

/// Parse the document \p text into a model. Loading is all-or-nothing.
pub fn load_model(text: &str) -> Result<Model, LoadError> {
    let doc = Document::parse(text)?;
    let mut model = Model::new();
    let root = model.root();
    visit(&doc.root_element(), root, &mut model)?;

    for (index, elem) in doc
        .descendants()
        .filter(|n| n.is_element() && n.has_tag_name(TAG_EDGE))
        .enumerate()
    {
        let source = resolve(&model, &elem, "source", index)?;
        let target = resolve(&model, &elem, "target", index)?;
        model.add_edge(source, target);
    }

    #[cfg(feature = "log")]
    log::info!(
        "Loaded {} elements and {} edges.",
        model.len() - 1,
        model.num_edge_records()
    );

    Ok(model)
}

fn resolve(
    model: &Model,
    elem: &Node,
    attr: &'static str,
    index: usize,
) -> Result<ElementHandle, LoadError> {
    let id = required(elem, attr)?;
    model
        .get(id)
        .ok_or_else(|| LoadError::UnresolvedEndpoint {
            index,
            id: id.to_string(),
        })
}

/// Add the element \p elem to \p parent, and then visit its children.
fn visit(elem: &Node, parent: ElementHandle, model: &mut Model) -> Result<(), LoadError> {
    let parent_tag = model.tag(parent);
    let name = elem.tag_name().name();

    let owner = match name {
        TAG_NODE if !parent_tag.is_port() => {
            let id = required(elem, "id")?;
            let label = elem.attribute("name").unwrap_or_default();
            let kind = NodeKind::from_attr(elem.attribute("type").unwrap_or_default());
            model.add_node(parent, id, label, kind)?
        }
        TAG_REGION if !parent_tag.is_port() => {
            let id = required(elem, "id")?;
            model.add_region(parent, id)?
        }
        TAG_INPUT if parent_tag == Tag::Node => {
            model.add_input(parent, required(elem, "id")?)?
        }
        TAG_OUTPUT if parent_tag == Tag::Node => {
            model.add_output(parent, required(elem, "id")?)?
        }
        TAG_ARGUMENT if parent_tag == Tag::Region => {
            model.add_argument(parent, required(elem, "id")?)?
        }
        TAG_RESULT if parent_tag == Tag::Region => {
            model.add_result(parent, required(elem, "id")?)?
        }
        // Edges are collected in a second pass, once every port exists.
        TAG_EDGE => return Ok(()),
        _ => {
            #[cfg(feature = "log")]
            log::debug!("Ignoring <{}> under '{}'.", name, model.id(parent));
            parent
        }
    };

    for child in elem.children().filter(|n| n.is_element()) {
        visit(&child, owner, model)?;
    }
    Ok(())
}
