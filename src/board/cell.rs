//! Board coordinates

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single board position, identified by row and column.
///
/// Cells are plain values: two cells are equal exactly when their
/// coordinates match, and ordering is row-major so collections of cells can
/// be displayed and picked deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// Create a cell at the given coordinates.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether this cell lies on a board of the given dimensions.
    pub fn in_bounds(&self, height: usize, width: usize) -> bool {
        self.row < height && self.col < width
    }

    /// In-bounds cells of the 3x3 block centered on this cell, excluding
    /// the cell itself.
    pub fn neighbors(&self, height: usize, width: usize) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(8);

        for dr in -1..=1isize {
            for dc in -1..=1isize {
                if dr == 0 && dc == 0 {
                    continue; // Skip the cell itself
                }

                let row = self.row as isize + dr;
                let col = self.col as isize + dc;

                if row >= 0 && row < height as isize && col >= 0 && col < width as isize {
                    cells.push(Cell::new(row as usize, col as usize));
                }
            }
        }

        cells
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
