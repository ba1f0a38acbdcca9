//! SVG rendering backend that accepts draw calls and saves the output to a file.

use crate::core::color::Color;
use crate::core::format::RenderBackend;
use crate::core::geometry::Point;
use crate::core::style::StyleAttr;
use std::collections::HashMap;

static SVG_HEADER: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;

static SVG_FOOTER: &str = "</svg>";

/// Escape the characters that can't appear in SVG text or attributes.
pub fn escape_string(x: &str) -> String {
    let mut res = String::new();
    for c in x.chars() {
        match c {
            '&' => {
                res.push_str("&amp;");
            }
            '<' => {
                res.push_str("&lt;");
            }
            '>' => {
                res.push_str("&gt;");
            }
            '"' => {
                res.push_str("&quot;");
            }
            '\'' => {
                res.push_str("&apos;");
            }
            _ => {
                res.push(c);
            }
        }
    }
    res
}

pub struct SVGWriter {
    content: String,
    view_size: Point,
    // Maps font sizes to their class name and class impl.
    font_style_map: HashMap<usize, (String, String)>,
}

impl SVGWriter {
    pub fn new() -> SVGWriter {
        SVGWriter {
            content: String::new(),
            view_size: Point::zero(),
            font_style_map: HashMap::new(),
        }
    }
}

impl Default for SVGWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SVGWriter {
    // Grow the viewable svg window to include the point \p point plus some
    // offset \p size.
    fn grow_window(&mut self, point: Point, size: Point) {
        self.view_size.x = self.view_size.x.max(point.x + size.x + 5);
        self.view_size.y = self.view_size.y.max(point.y + size.y + 5);
    }

    // Gets or creates a font 'class' for the parameters. Returns the class
    // name.
    fn get_or_create_font_style(&mut self, font_size: usize) -> String {
        if let Option::Some(x) = self.font_style_map.get(&font_size) {
            return x.0.clone();
        }
        let class_name = format!("a{}", font_size);
        let class_impl = format!(
            ".a{} {{ font-size: {}px; font-family: monospace; }}",
            font_size, font_size
        );
        let impl_ = (class_name.clone(), class_impl);
        self.font_style_map.insert(font_size, impl_);
        class_name
    }

    fn emit_svg_font_styles(&self) -> String {
        // Sort the classes to make the output stable.
        let mut classes: Vec<&(String, String)> = self.font_style_map.values().collect();
        classes.sort();
        let mut content = String::new();
        content.push_str("<style>\n");
        for p in classes {
            content.push_str(&p.1);
            content.push('\n');
        }
        content.push_str("</style>\n");
        content
    }

    pub fn finalize(&self) -> String {
        let mut result = String::new();
        result.push_str(SVG_HEADER);
        result.push('\n');

        let svg_line = format!(
            "<svg width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\
            \" xmlns=\"http://www.w3.org/2000/svg\">\n",
            self.view_size.x,
            self.view_size.y,
            self.view_size.x,
            self.view_size.y
        );
        result.push_str(&svg_line);
        result.push_str(&self.emit_svg_font_styles());
        result.push_str(&self.content);
        result.push_str(SVG_FOOTER);
        result
    }
}

impl RenderBackend for SVGWriter {
    fn draw_rect(
        &mut self,
        xy: Point,
        size: Point,
        look: &StyleAttr,
        properties: Option<String>,
    ) {
        self.grow_window(xy, size);

        let props = properties.unwrap_or_default();
        let fill_color = look.fill_color.unwrap_or_else(Color::transparent);
        let line = format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" \
            stroke-width=\"{}\" stroke=\"{}\" {}/>\n",
            xy.x,
            xy.y,
            size.x,
            size.y,
            fill_color.to_web_color(),
            look.line_width,
            look.line_color.to_web_color(),
            props
        );
        self.content.push_str(&line);
    }

    fn draw_polygon(
        &mut self,
        points: &[Point],
        look: &StyleAttr,
        properties: Option<String>,
    ) {
        let mut coords = Vec::new();
        for p in points {
            self.grow_window(*p, Point::zero());
            coords.push(format!("{},{}", p.x, p.y));
        }

        let props = properties.unwrap_or_default();
        let fill_color = look.fill_color.unwrap_or_else(Color::transparent);
        let line = format!(
            "<polygon points=\"{}\" fill=\"{}\" stroke-width=\"{}\" stroke=\"{}\" {}/>\n",
            coords.join(" "),
            fill_color.to_web_color(),
            look.line_width,
            look.line_color.to_web_color(),
            props
        );
        self.content.push_str(&line);
    }

    fn draw_line(
        &mut self,
        start: Point,
        stop: Point,
        look: &StyleAttr,
        properties: Option<String>,
    ) {
        self.grow_window(start, Point::zero());
        self.grow_window(stop, Point::zero());

        let props = properties.unwrap_or_default();
        let line = format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke-width=\"{}\" \
            stroke=\"{}\" {}/>\n",
            start.x,
            start.y,
            stop.x,
            stop.y,
            look.line_width,
            look.line_color.to_web_color(),
            props
        );
        self.content.push_str(&line);
    }

    fn draw_text(&mut self, xy: Point, text: &str, look: &StyleAttr) {
        let font_class = self.get_or_create_font_style(look.font_size);

        let mut content = String::new();
        for line in text.lines() {
            content.push_str(&format!("<tspan x=\"{}\" dy=\"1.0em\">", xy.x));
            content.push_str(&escape_string(line));
            content.push_str("</tspan>");
        }

        let lines = text.lines().count().max(1);
        let longest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        self.grow_window(
            xy,
            Point::new(
                (longest * look.font_size) as i32,
                (lines * look.font_size) as i32,
            ),
        );

        let line = format!(
            "<text x=\"{}\" y=\"{}\" class=\"{}\">{}</text>\n",
            xy.x, xy.y, font_class, &content
        );
        self.content.push_str(&line);
    }
}

#[test]
fn test_svg_output() {
    let mut svg = SVGWriter::new();
    let look = StyleAttr::simple();
    svg.draw_rect(
        Point::new(10, 20),
        Point::new(30, 40),
        &look,
        Some("data-id=\"n1\"".to_string()),
    );
    svg.draw_line(Point::new(0, 0), Point::new(0, 100), &look, None);
    svg.draw_text(Point::new(10, 20), "a<b", &look);
    let out = svg.finalize();

    assert!(out.starts_with(SVG_HEADER));
    assert!(out.ends_with(SVG_FOOTER));
    assert!(out.contains("<svg width=\"51\" height=\"105\""));
    assert!(out.contains("data-id=\"n1\""));
    assert!(out.contains("a&lt;b"));
    assert!(out.contains(".a12 { font-size: 12px;"));
}
