//! Errors that the library reports to its users. Broken internal invariants
//! are not errors; they panic.

use thiserror::Error;

/// Loading a document is all-or-nothing: any of these aborts the load and no
/// partial model is returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("<{tag}> element is missing the '{attr}' attribute")]
    MissingAttribute { tag: String, attr: &'static str },

    #[error("duplicate element id '{0}'")]
    DuplicateId(String),

    #[error("edge #{index} refers to unknown element '{id}'")]
    UnresolvedEndpoint { index: usize, id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("element '{0}' is not a region")]
    NotARegion(String),

    #[error("element '{0}' is not an expandable node")]
    NotExpandable(String),

    #[error("region '{region}' contains a dependency cycle through {}", .vertices.join(", "))]
    Cycle {
        region: String,
        vertices: Vec<String>,
    },
}
