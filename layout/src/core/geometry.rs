//! Contains the integer geometry that the layout engine works with: points,
//! axis-aligned line segments, boxes and text size estimation.
//!
//! All layout arithmetic is done on integers so that repeated runs produce
//! bit-identical results. Divisions round toward zero, which for the
//! non-negative coordinates used here means toward the left/top edge.

/// The scalar type of all coordinates and sizes.
pub type Coord = i32;

// Stores a 2D coordinate, or a vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

impl Point {
    pub fn zero() -> Point {
        Self { x: 0, y: 0 }
    }

    pub fn new(x: Coord, y: Coord) -> Point {
        Self { x, y }
    }

    pub fn splat(s: Coord) -> Point {
        Point::new(s, s)
    }

    pub fn neg(&self) -> Point {
        Point::new(-self.x, -self.y)
    }

    pub fn add(&self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(&self, other: Point) -> Point {
        self.add(other.neg())
    }

    pub fn is_non_negative(&self) -> bool {
        self.x >= 0 && self.y >= 0
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "(x: {}, y: {})", self.x, self.y)
    }
}

/// A straight line between two points. The router only produces horizontal
/// and vertical segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub start: Point,
    pub stop: Point,
}

impl Segment {
    pub fn new(start: Point, stop: Point) -> Self {
        Self { start, stop }
    }

    pub fn is_horizontal(&self) -> bool {
        self.start.y == self.stop.y
    }

    pub fn is_vertical(&self) -> bool {
        self.start.x == self.stop.x
    }

    pub fn translate(&self, d: Point) -> Segment {
        Segment::new(self.start.add(d), self.stop.add(d))
    }

    /// \returns the top-left and bottom-right corners of the segment.
    pub fn bbox(&self) -> (Point, Point) {
        (
            Point::new(self.start.x.min(self.stop.x), self.start.y.min(self.stop.y)),
            Point::new(self.start.x.max(self.stop.x), self.start.y.max(self.stop.y)),
        )
    }
}

/// \returns the bounding box (top-left, bottom-right) of a box at \p pos with
/// size \p size.
pub fn bbox_of(pos: Point, size: Point) -> (Point, Point) {
    (pos, pos.add(size))
}

/// \returns true if the inclusive box \p bbox contains the point \p p.
pub fn box_contains(bbox: (Point, Point), p: Point) -> bool {
    p.x >= bbox.0.x && p.x <= bbox.1.x && p.y >= bbox.0.y && p.y <= bbox.1.y
}

/// \returns true if the two half-open boxes overlap. Boxes that only touch
/// along an edge do not intersect.
pub fn do_boxes_intersect(p1: (Point, Point), p2: (Point, Point)) -> bool {
    p1.0.x < p2.1.x && p2.0.x < p1.1.x && p1.0.y < p2.1.y && p2.0.y < p1.1.y
}

fn get_width_of_line(label: &str) -> usize {
    label.chars().count()
}

/// Estimate the bounding box of some rendered text, given the width of one
/// character and the height of one line.
pub fn get_size_for_str(label: &str, char_width: Coord, line_height: Coord) -> Point {
    // Find the longest line.
    let max_line_len = label.lines().map(get_width_of_line).max().unwrap_or(0);
    let lines = label.lines().count().max(1);
    Point::new(
        max_line_len as Coord * char_width,
        lines as Coord * line_height,
    )
}

#[test]
fn test_text_size() {
    assert_eq!(get_size_for_str("add", 8, 16), Point::new(24, 16));
    assert_eq!(get_size_for_str("", 8, 16), Point::new(0, 16));
    assert_eq!(get_size_for_str("ab\nabcd", 8, 16), Point::new(32, 32));
}

#[test]
fn test_box_intersection() {
    let a = bbox_of(Point::new(0, 0), Point::new(10, 10));
    let b = bbox_of(Point::new(10, 0), Point::new(10, 10));
    let c = bbox_of(Point::new(5, 5), Point::new(10, 10));
    assert!(!do_boxes_intersect(a, b));
    assert!(do_boxes_intersect(a, c));
    assert!(box_contains(a, Point::new(10, 10)));
    assert!(!box_contains(a, Point::new(11, 3)));
}
