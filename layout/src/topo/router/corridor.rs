//! Routing corridors. A corridor is a horizontal line above a row or a
//! vertical line left of a column. Every edge that runs through a corridor
//! takes the current offset, and moves the offset by one clearance, so that
//! the next edge runs parallel to it instead of on top of it.

use crate::core::geometry::Coord;

#[derive(Debug, Clone)]
pub struct Corridors {
    xs: Vec<Coord>,
    ys: Vec<Coord>,
    clearance: Coord,
}

impl Corridors {
    pub fn new(xs: &[Coord], ys: &[Coord], clearance: Coord) -> Self {
        Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            clearance,
        }
    }

    /// Use the corridor above row \p row. \returns the y of the run.
    pub fn take_horizontal(&mut self, row: usize) -> Coord {
        let y = self.ys[row];
        self.ys[row] -= self.clearance;
        y
    }

    /// Use the corridor left of column \p col. \returns the x of the run.
    pub fn take_vertical(&mut self, col: usize) -> Coord {
        let x = self.xs[col];
        self.xs[col] -= self.clearance;
        x
    }
}

#[test]
fn test_corridors() {
    let mut c = Corridors::new(&[0, 64], &[112, 10], 10);
    assert_eq!(c.take_horizontal(0), 112);
    assert_eq!(c.take_horizontal(0), 102);
    assert_eq!(c.take_horizontal(1), 10);
    assert_eq!(c.take_vertical(1), 64);
    assert_eq!(c.take_vertical(1), 54);
    assert_eq!(c.take_vertical(0), 0);
    assert_eq!(c.take_horizontal(0), 92);
}
