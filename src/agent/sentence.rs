//! Logical sentences about groups of board cells

use crate::board::Cell;
use itertools::Itertools;
use std::collections::HashSet;
use std::fmt;

/// A logical assertion that exactly `count` of `cells` are mines.
///
/// Sentences are the only unit of stored knowledge that is not yet a
/// confirmed fact. They shrink in place as cells are confirmed: a confirmed
/// mine is removed and the count drops with it, a confirmed safe cell is
/// removed and the count stands. Two sentences are equal exactly when both
/// the cell group and the count match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    cells: HashSet<Cell>,
    count: usize,
}

impl Sentence {
    /// Create a sentence asserting that exactly `count` of `cells` are
    /// mines.
    pub fn new(cells: HashSet<Cell>, count: usize) -> Self {
        Self { cells, count }
    }

    /// The undetermined cells this sentence speaks about.
    pub fn cells(&self) -> &HashSet<Cell> {
        &self.cells
    }

    /// How many of the cells are mines.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the cell group has emptied out.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells provably mined: the whole group, when it takes every member
    /// to reach the stated count.
    pub fn known_mines(&self) -> HashSet<Cell> {
        if !self.cells.is_empty() && self.cells.len() == self.count {
            self.cells.clone()
        } else {
            HashSet::new()
        }
    }

    /// Cells provably safe: the whole group, when none of them are mines.
    pub fn known_safes(&self) -> HashSet<Cell> {
        if self.count == 0 {
            self.cells.clone()
        } else {
            HashSet::new()
        }
    }

    /// Account for a confirmed mine: the cell leaves the group and the
    /// count drops by one. No-op when the cell is not in the group.
    pub fn mark_mine(&mut self, cell: Cell) {
        if self.cells.remove(&cell) {
            self.count = self.count.saturating_sub(1);
        }
    }

    /// Account for a confirmed safe cell: the cell leaves the group and
    /// the count stands. No-op when the cell is not in the group.
    pub fn mark_safe(&mut self, cell: Cell) {
        self.cells.remove(&cell);
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = self
            .cells
            .iter()
            .sorted()
            .map(|cell| cell.to_string())
            .join(", ");
        write!(f, "{{{}}} = {}", cells, self.count)
    }
}
