//! Defines the interface between the layout engine and the code that turns
//! draw commands into pixels (or SVG text).

use super::{geometry::Point, style::StyleAttr};

/// This is the trait that all rendering backends need to implement.
///
/// The optional \p properties string is attached verbatim to the emitted
/// element. The renderer uses it to tag glyphs with the id of the model
/// element they belong to, so that backends can implement picking.
pub trait RenderBackend {
    /// Draw a rectangle. The top-left point of the rectangle is \p xy.
    fn draw_rect(
        &mut self,
        xy: Point,
        size: Point,
        look: &StyleAttr,
        properties: Option<String>,
    );

    /// Draw a closed polygon through \p points.
    fn draw_polygon(
        &mut self,
        points: &[Point],
        look: &StyleAttr,
        properties: Option<String>,
    );

    /// Draw a line between \p start and \p stop.
    fn draw_line(
        &mut self,
        start: Point,
        stop: Point,
        look: &StyleAttr,
        properties: Option<String>,
    );

    /// Draw a label. \p xy is the top-left corner of the text.
    fn draw_text(&mut self, xy: Point, text: &str, look: &StyleAttr);
}
