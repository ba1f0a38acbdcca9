//! Colors and the fixed palettes used by the viewer.

use crate::core::base::NodeKind;

/// An RGBA color, packed as 0xRRGGBBAA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    color: u32,
}

/// The palette that edges cycle through when they are recolored.
pub const EDGE_COLORS: [&str; 5] = ["red", "green", "blue", "yellow", "cyan"];

/// Display names for the entries of `EDGE_COLORS`.
pub const COLOR_NAMES: [&str; 5] = ["Red", "Green", "Blue", "Yellow", "Cyan"];

impl Color {
    pub fn new(color: u32) -> Self {
        Self { color }
    }

    pub fn transparent() -> Self {
        Self::new(0)
    }

    /// Create a color from a known web color name. Unknown names map to
    /// black.
    pub fn fast(name: &str) -> Self {
        Color::from_name(name).unwrap_or_else(|| Color::new(0x000000ff))
    }

    pub fn from_name(name: &str) -> Option<Color> {
        let rgb: u32 = match name {
            "black" => 0x000000,
            "white" => 0xffffff,
            "gray" => 0xa0a0a4,
            "red" => 0xff0000,
            "green" => 0x00ff00,
            "blue" => 0x0000ff,
            "yellow" => 0xffff00,
            "cyan" => 0x00ffff,
            "orange" => 0xffa500,
            "pink" => 0xffc0cb,
            "aliceblue" => 0xf0f8ff,
            _ => return None,
        };
        Some(Color::new((rgb << 8) | 0xff))
    }

    pub fn to_web_color(&self) -> String {
        format!("#{:08x}", self.color)
    }

    pub fn alpha(&self) -> u32 {
        self.color & 0xff
    }
}

/// \returns the color that edges with palette index \p index are drawn with.
/// Indices wrap around the palette.
pub fn edge_color(index: usize) -> Color {
    Color::fast(EDGE_COLORS[index % EDGE_COLORS.len()])
}

/// \returns the fill color of a node of kind \p kind.
pub fn node_color(kind: NodeKind) -> Color {
    match kind {
        NodeKind::Plain => Color::fast("gray"),
        NodeKind::Lambda => Color::fast("blue"),
        NodeKind::Gamma => Color::fast("green"),
        NodeKind::Theta => Color::fast("red"),
        NodeKind::Phi => Color::fast("orange"),
    }
}

#[test]
fn test_colors() {
    assert_eq!(Color::fast("red").to_web_color(), "#ff0000ff");
    assert_eq!(Color::fast("no-such-color").to_web_color(), "#000000ff");
    assert_eq!(Color::transparent().alpha(), 0);
    assert_eq!(edge_color(5), edge_color(0));
    assert_eq!(node_color(NodeKind::Phi), Color::fast("orange"));
}
