//! The agent's accumulated beliefs about a board

use super::Sentence;
use crate::board::Cell;
use std::collections::HashSet;
use std::fmt;

/// Everything the agent believes about the board so far.
///
/// The three cell sets only ever grow, and `safes` and `mines` stay
/// disjoint. Sentences are kept in insertion order so deductions replay
/// deterministically; the collection never holds an emptied-out sentence or
/// two sentences with the same cell group and count.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    moves_made: HashSet<Cell>,
    safes: HashSet<Cell>,
    mines: HashSet<Cell>,
    sentences: Vec<Sentence>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a played cell.
    pub fn record_move(&mut self, cell: Cell) {
        self.moves_made.insert(cell);
    }

    /// Confirm `cell` as a mine and fold the fact into every sentence.
    pub fn mark_mine(&mut self, cell: Cell) {
        self.mines.insert(cell);
        for sentence in &mut self.sentences {
            sentence.mark_mine(cell);
        }
        self.compact();
    }

    /// Confirm `cell` as safe and fold the fact into every sentence.
    pub fn mark_safe(&mut self, cell: Cell) {
        self.safes.insert(cell);
        for sentence in &mut self.sentences {
            sentence.mark_safe(cell);
        }
        self.compact();
    }

    /// Store a sentence, unless its cell group is empty or an equal
    /// sentence is already present. Returns whether it was added.
    pub fn add_sentence(&mut self, sentence: Sentence) -> bool {
        if sentence.is_empty() || self.sentences.contains(&sentence) {
            return false;
        }
        self.sentences.push(sentence);
        true
    }

    /// Cells already played.
    pub fn moves_made(&self) -> &HashSet<Cell> {
        &self.moves_made
    }

    /// Cells proven mine-free.
    pub fn safes(&self) -> &HashSet<Cell> {
        &self.safes
    }

    /// Cells proven to be mines.
    pub fn mines(&self) -> &HashSet<Cell> {
        &self.mines
    }

    /// The stored sentences, oldest first.
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Snapshot of the knowledge base size.
    pub fn statistics(&self) -> KnowledgeStatistics {
        KnowledgeStatistics {
            moves_made: self.moves_made.len(),
            safe_cells: self.safes.len(),
            mine_cells: self.mines.len(),
            active_sentences: self.sentences.len(),
            undetermined_cells: self
                .sentences
                .iter()
                .map(|sentence| sentence.cells().len())
                .sum(),
        }
    }

    /// Drop emptied sentences and later duplicates, keeping first-insertion
    /// order. Marks can shrink two sentences into the same statement.
    fn compact(&mut self) {
        let mut kept: Vec<Sentence> = Vec::with_capacity(self.sentences.len());
        for sentence in self.sentences.drain(..) {
            if !sentence.is_empty() && !kept.contains(&sentence) {
                kept.push(sentence);
            }
        }
        self.sentences = kept;
    }
}

/// Size counters for a knowledge base, for display and analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnowledgeStatistics {
    pub moves_made: usize,
    pub safe_cells: usize,
    pub mine_cells: usize,
    pub active_sentences: usize,
    pub undetermined_cells: usize,
}

impl fmt::Display for KnowledgeStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Knowledge Statistics:")?;
        writeln!(f, "  Moves made: {}", self.moves_made)?;
        writeln!(f, "  Safe cells: {}", self.safe_cells)?;
        writeln!(f, "  Mine cells: {}", self.mine_cells)?;
        writeln!(f, "  Active sentences: {}", self.active_sentences)?;
        write!(f, "  Undetermined cells: {}", self.undetermined_cells)
    }
}
