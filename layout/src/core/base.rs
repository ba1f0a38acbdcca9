//! Contains utilities, enums, constants and simple data structures that are
//! used across the program.

/// The flavor of an RVSDG node. Selects the color and the type name that the
/// node is displayed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Plain,
    Lambda,
    Gamma,
    Theta,
    Phi,
}

impl NodeKind {
    /// Parse the `type` attribute of a `node` element. Unknown values, and
    /// "none", are plain nodes.
    pub fn from_attr(s: &str) -> Self {
        match s {
            "lambda" => NodeKind::Lambda,
            "gamma" => NodeKind::Gamma,
            "theta" => NodeKind::Theta,
            "phi" => NodeKind::Phi,
            _ => NodeKind::Plain,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Plain => "Node",
            NodeKind::Lambda => "Lambda",
            NodeKind::Gamma => "Gamma",
            NodeKind::Theta => "Theta",
            NodeKind::Phi => "Phi",
        }
    }
}

impl Default for NodeKind {
    fn default() -> Self {
        NodeKind::Plain
    }
}

#[test]
fn test_node_kind() {
    assert_eq!(NodeKind::from_attr("gamma"), NodeKind::Gamma);
    assert_eq!(NodeKind::from_attr("none"), NodeKind::Plain);
    assert_eq!(NodeKind::from_attr(""), NodeKind::Plain);
    assert_eq!(NodeKind::Theta.type_name(), "Theta");
}
