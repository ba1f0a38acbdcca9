//! This module implements the layer table: the assignment of the vertices of
//! one region to rows and columns. Row zero is the bottom row, where the
//! results of the region live. A rank is the ordering of the vertices of a
//! row along the x-axis.

use crate::model::ElementHandle;
use std::collections::HashMap;

pub type RankType = Vec<Vec<ElementHandle>>;

/// The row and column of a vertex in the layer table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerTable {
    /// Places vertices in rows.
    ranks: RankType,
    /// Maps each vertex to its place in `ranks`.
    cells: HashMap<ElementHandle, Cell>,
}

impl LayerTable {
    pub fn new() -> Self {
        LayerTable {
            ranks: Vec::new(),
            cells: HashMap::new(),
        }
    }

    /// \returns the number of rows in the table.
    pub fn num_levels(&self) -> usize {
        self.ranks.len()
    }

    /// \returns the number of vertices in the table.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// \returns the length of the longest row.
    pub fn num_columns(&self) -> usize {
        self.ranks.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    /// \return a reference to a row at level \p level.
    pub fn row(&self, level: usize) -> &Vec<ElementHandle> {
        assert!(level < self.ranks.len(), "Invalid rank");
        &self.ranks[level]
    }

    /// \return a reference to the whole rank data structure.
    pub fn ranks(&self) -> &RankType {
        &self.ranks
    }

    /// Iterate over all of the vertices, bottom row first.
    pub fn iter(&self) -> impl Iterator<Item = ElementHandle> + '_ {
        self.ranks.iter().flat_map(|row| row.iter().copied())
    }

    /// Make sure that the row \p level exists.
    pub fn ensure_level(&mut self, level: usize) {
        while self.ranks.len() < level + 1 {
            self.ranks.push(Vec::new());
        }
    }

    /// Append the element \p elem to the row \p level. If the level does not
    /// exist then create it. The element must not be in the table.
    /// \returns the column of the element.
    pub fn add_element_to_rank(&mut self, elem: ElementHandle, level: usize) -> usize {
        assert!(!self.cells.contains_key(&elem), "Element is already ranked");
        self.ensure_level(level);
        let column = self.ranks[level].len();
        self.ranks[level].push(elem);
        self.cells.insert(elem, Cell { row: level, column });
        column
    }

    pub fn contains(&self, elem: ElementHandle) -> bool {
        self.cells.contains_key(&elem)
    }

    /// \returns the cell of \p elem, if it is in the table.
    pub fn cell(&self, elem: ElementHandle) -> Option<Cell> {
        self.cells.get(&elem).copied()
    }

    /// \returns the row of the element \p elem. The element must be ranked.
    pub fn level(&self, elem: ElementHandle) -> usize {
        self.cell(elem).expect("Element is not in the layer table").row
    }

    /// Check that the table and the lookup map agree.
    pub fn verify(&self) {
        let mut cnt = 0;
        for (row_idx, row) in self.ranks.iter().enumerate() {
            for (col_idx, elem) in row.iter().enumerate() {
                let cell = self.cell(*elem).expect("Ranked element without a cell");
                assert_eq!(cell, Cell { row: row_idx, column: col_idx });
                cnt += 1;
            }
        }
        assert_eq!(cnt, self.cells.len(), "Element ranked more than once");
    }
}

#[test]
fn test_rank_api() {
    let mut t = LayerTable::new();
    let h0 = ElementHandle::new(3);
    let h1 = ElementHandle::new(4);
    let h2 = ElementHandle::new(5);

    assert_eq!(t.add_element_to_rank(h0, 0), 0);
    assert_eq!(t.add_element_to_rank(h1, 2), 0);
    assert_eq!(t.add_element_to_rank(h2, 2), 1);
    t.verify();

    assert_eq!(t.num_levels(), 3);
    assert!(t.row(1).is_empty());
    assert_eq!(t.num_columns(), 2);
    assert_eq!(t.level(h2), 2);
    assert_eq!(t.cell(h2), Some(Cell { row: 2, column: 1 }));
    assert_eq!(t.iter().collect::<Vec<_>>(), vec![h0, h1, h2]);
}

#[test]
#[should_panic]
fn test_double_insert() {
    let mut t = LayerTable::new();
    let h0 = ElementHandle::new(3);
    t.add_element_to_rank(h0, 0);
    t.add_element_to_rank(h0, 1);
}
