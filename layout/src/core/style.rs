//! This module represents general shape style information.

use crate::core::base::NodeKind;
use crate::core::color::{edge_color, node_color, Color};

#[derive(Debug, Clone, PartialEq)]
pub struct StyleAttr {
    pub line_color: Color,
    pub line_width: usize,
    pub fill_color: Option<Color>,
    pub font_size: usize,
}

impl StyleAttr {
    pub fn new(
        line_color: Color,
        line_width: usize,
        fill_color: Option<Color>,
        font_size: usize,
    ) -> Self {
        Self {
            line_color,
            line_width,
            fill_color,
            font_size,
        }
    }

    pub fn simple() -> Self {
        StyleAttr::new(
            Color::fast("black"),
            1,
            Option::Some(Color::fast("white")),
            12,
        )
    }

    /// The look of a node body of kind \p kind.
    pub fn node(kind: NodeKind) -> Self {
        let mut look = StyleAttr::simple();
        look.fill_color = Some(node_color(kind));
        look
    }

    /// The look of the background of a nested region.
    pub fn region() -> Self {
        StyleAttr::simple()
    }

    /// The look of the small triangles that represent ports.
    pub fn port() -> Self {
        let mut look = StyleAttr::simple();
        look.fill_color = Some(Color::fast("black"));
        look
    }

    /// The look of an edge with the optional palette index \p color.
    pub fn edge(color: Option<usize>) -> Self {
        let line_color = match color {
            Some(idx) => edge_color(idx),
            None => Color::fast("black"),
        };
        StyleAttr::new(line_color, 1, None, 12)
    }

    pub fn debug0() -> Self {
        StyleAttr::new(Color::fast("pink"), 1, None, 12)
    }
}
