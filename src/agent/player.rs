//! The automated player and its inference routine

use super::{KnowledgeBase, Sentence};
use crate::board::Cell;
use itertools::Itertools;
use rand::prelude::SliceRandom;
use rand::RngCore;
use std::collections::HashSet;

/// An automated Minesweeper player for one board.
///
/// The agent never sees the minefield. It is told the neighbor-mine count
/// of every cell it reveals, turns each hint into a [`Sentence`], and
/// squeezes the sentence collection for consequences until nothing new can
/// be proven. Each hint is absorbed completely before the call returns.
#[derive(Debug, Clone)]
pub struct Agent {
    height: usize,
    width: usize,
    knowledge: KnowledgeBase,
}

impl Agent {
    /// Create an agent for a board of the given dimensions.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            knowledge: KnowledgeBase::new(),
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Read access to the accumulated beliefs.
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Confirm a mine and fold the fact into every sentence.
    pub fn mark_mine(&mut self, cell: Cell) {
        self.knowledge.mark_mine(cell);
    }

    /// Confirm a safe cell and fold the fact into every sentence.
    pub fn mark_safe(&mut self, cell: Cell) {
        self.knowledge.mark_safe(cell);
    }

    /// Absorb a revealed cell and its neighbor-mine count, then deduce
    /// everything the updated knowledge implies.
    ///
    /// The revealed cell is recorded as played and safe. Its neighbors that
    /// are not yet settled become a new sentence whose count is adjusted
    /// for neighbors already confirmed as mines, and inference runs to a
    /// fixpoint before the call returns.
    pub fn add_knowledge(&mut self, cell: Cell, count: usize) {
        self.knowledge.record_move(cell);
        self.knowledge.mark_safe(cell);

        let mut undetermined = HashSet::new();
        let mut adjusted_count = count;
        for neighbor in cell.neighbors(self.height, self.width) {
            if self.knowledge.mines().contains(&neighbor) {
                // Already accounted for; the sentence describes the rest.
                adjusted_count = adjusted_count.saturating_sub(1);
            } else if !self.knowledge.safes().contains(&neighbor) {
                undetermined.insert(neighbor);
            }
        }

        self.knowledge
            .add_sentence(Sentence::new(undetermined, adjusted_count));
        self.infer();
    }

    /// A proven-safe cell that has not been played yet, lowest in
    /// row-major order, or `None` when no such cell is known.
    pub fn make_safe_move(&self) -> Option<Cell> {
        self.knowledge
            .safes()
            .iter()
            .filter(|cell| !self.knowledge.moves_made().contains(cell))
            .min()
            .copied()
    }

    /// A uniformly random cell among all board cells that are neither
    /// played nor flagged as mines, or `None` when the board is exhausted.
    pub fn make_random_move(&self) -> Option<Cell> {
        self.make_random_move_with(&mut rand::thread_rng())
    }

    /// Random-move selection with an injected rng, for reproducible games.
    pub fn make_random_move_with(&self, rng: &mut dyn RngCore) -> Option<Cell> {
        let candidates: Vec<Cell> = (0..self.height)
            .cartesian_product(0..self.width)
            .map(|(row, col)| Cell::new(row, col))
            .filter(|cell| {
                !self.knowledge.moves_made().contains(cell)
                    && !self.knowledge.mines().contains(cell)
            })
            .collect();

        candidates.choose(rng).copied()
    }

    /// Alternate direct inference and subset resolution until neither can
    /// change the knowledge base.
    fn infer(&mut self) {
        loop {
            let mut changed = self.apply_direct_inference();
            changed |= self.resolve_subsets();
            if !changed {
                break;
            }
        }
    }

    /// Mark every cell some sentence proves mined or safe, rescanning
    /// until a full pass proves nothing new. Marking shrinks the other
    /// sentences, which is what lets later passes fire. Returns whether
    /// anything was marked.
    fn apply_direct_inference(&mut self) -> bool {
        let mut changed = false;
        loop {
            let mut mined = HashSet::new();
            let mut safe = HashSet::new();
            for sentence in self.knowledge.sentences() {
                mined.extend(sentence.known_mines());
                safe.extend(sentence.known_safes());
            }

            if mined.is_empty() && safe.is_empty() {
                break;
            }

            for cell in mined {
                self.knowledge.mark_mine(cell);
            }
            for cell in safe {
                self.knowledge.mark_safe(cell);
            }
            changed = true;
        }
        changed
    }

    /// One round of subset resolution: for every pair of sentences where
    /// one cell group contains the other, the difference group with the
    /// difference count is itself a valid sentence. A difference that
    /// pins down every cell is applied as direct marks; anything else is
    /// stored when novel. Returns whether the knowledge base changed.
    fn resolve_subsets(&mut self) -> bool {
        let mut derived = Vec::new();
        let sentences = self.knowledge.sentences();
        for (first, second) in sentences.iter().tuple_combinations::<(_, _)>() {
            for (subset, superset) in [(first, second), (second, first)] {
                if subset.cells().len() < superset.cells().len()
                    && subset.cells().is_subset(superset.cells())
                {
                    let cells: HashSet<Cell> = superset
                        .cells()
                        .difference(subset.cells())
                        .copied()
                        .collect();
                    let count = superset.count().saturating_sub(subset.count());
                    derived.push(Sentence::new(cells, count));
                }
            }
        }

        let mut changed = false;

        // Store intermediate sentences before applying any marks, so the
        // marks propagate into them as well.
        for sentence in &derived {
            if sentence.count() > 0 && sentence.count() < sentence.cells().len() {
                changed |= self.knowledge.add_sentence(sentence.clone());
            }
        }

        for sentence in &derived {
            if sentence.count() == 0 {
                for &cell in sentence.cells() {
                    self.knowledge.mark_safe(cell);
                }
                changed = true;
            } else if sentence.count() == sentence.cells().len() {
                for &cell in sentence.cells() {
                    self.knowledge.mark_mine(cell);
                }
                changed = true;
            }
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cells(coords: &[(usize, usize)]) -> HashSet<Cell> {
        coords
            .iter()
            .map(|&(row, col)| Cell::new(row, col))
            .collect()
    }

    /// Every stored sentence speaks only about unsettled cells and is
    /// neither trivially safe nor trivially mined.
    fn assert_knowledge_at_rest(agent: &Agent) {
        for sentence in agent.knowledge().sentences() {
            assert!(sentence.count() > 0);
            assert!(sentence.count() < sentence.cells().len());
            for cell in sentence.cells() {
                assert!(!agent.knowledge().safes().contains(cell));
                assert!(!agent.knowledge().mines().contains(cell));
            }
        }
        let overlap: Vec<_> = agent
            .knowledge()
            .safes()
            .intersection(agent.knowledge().mines())
            .collect();
        assert!(overlap.is_empty());
    }

    #[test]
    fn test_zero_hint_marks_whole_neighborhood_safe() {
        let mut agent = Agent::new(4, 4);
        agent.add_knowledge(Cell::new(0, 0), 0);

        for coord in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            assert!(agent.knowledge().safes().contains(&Cell::new(coord.0, coord.1)));
        }
        assert!(agent.knowledge().moves_made().contains(&Cell::new(0, 0)));
        assert!(agent.knowledge().sentences().is_empty());
        assert_knowledge_at_rest(&agent);
    }

    #[test]
    fn test_saturated_hint_confirms_mines() {
        let mut agent = Agent::new(2, 3);
        agent.mark_safe(Cell::new(0, 1));

        agent.add_knowledge(Cell::new(0, 2), 2);

        assert!(agent.knowledge().mines().contains(&Cell::new(1, 1)));
        assert!(agent.knowledge().mines().contains(&Cell::new(1, 2)));
        assert!(agent.knowledge().sentences().is_empty());
        assert_knowledge_at_rest(&agent);
    }

    #[test]
    fn test_subset_resolution_proves_remainder_safe() {
        let mut agent = Agent::new(3, 3);
        for coord in [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2)] {
            agent.mark_safe(Cell::new(coord.0, coord.1));
        }

        // {(2,0), (2,1), (2,2)} = 1
        agent.add_knowledge(Cell::new(1, 1), 1);
        // {(2,0), (2,1)} = 1, a subset of the first group
        agent.add_knowledge(Cell::new(1, 0), 1);

        assert!(agent.knowledge().safes().contains(&Cell::new(2, 2)));
        assert!(!agent.knowledge().mines().contains(&Cell::new(2, 2)));
        assert_eq!(agent.knowledge().sentences().len(), 1);
        assert_eq!(
            agent.knowledge().sentences()[0].cells(),
            &cells(&[(2, 0), (2, 1)])
        );
        assert_knowledge_at_rest(&agent);
    }

    #[test]
    fn test_subset_resolution_proves_remainder_mined() {
        let mut agent = Agent::new(3, 3);
        for coord in [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2)] {
            agent.mark_safe(Cell::new(coord.0, coord.1));
        }

        // {(2,0), (2,1), (2,2)} = 2 against {(2,0), (2,1)} = 1 leaves
        // {(2,2)} = 1, so (2,2) must be a mine.
        agent.add_knowledge(Cell::new(1, 1), 2);
        agent.add_knowledge(Cell::new(1, 0), 1);

        assert!(agent.knowledge().mines().contains(&Cell::new(2, 2)));
        assert_knowledge_at_rest(&agent);
    }

    #[test]
    fn test_hint_count_is_adjusted_for_known_mines() {
        let mut agent = Agent::new(3, 3);
        agent.mark_mine(Cell::new(0, 1));

        agent.add_knowledge(Cell::new(1, 1), 2);

        let sentences = agent.knowledge().sentences();
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].cells().len(), 7);
        assert_eq!(sentences[0].count(), 1);
        assert!(!sentences[0].cells().contains(&Cell::new(0, 1)));
        assert_knowledge_at_rest(&agent);
    }

    #[test]
    fn test_safe_move_prefers_lowest_unplayed_cell() {
        let mut agent = Agent::new(3, 3);
        agent.mark_safe(Cell::new(2, 2));
        agent.mark_safe(Cell::new(0, 1));

        assert_eq!(agent.make_safe_move(), Some(Cell::new(0, 1)));

        // Playing the cell removes it from consideration.
        agent.add_knowledge(Cell::new(0, 1), 3);
        assert_eq!(agent.make_safe_move(), Some(Cell::new(2, 2)));
    }

    #[test]
    fn test_safe_move_none_without_unplayed_safes() {
        let mut agent = Agent::new(2, 2);
        assert_eq!(agent.make_safe_move(), None);

        agent.add_knowledge(Cell::new(0, 0), 3);
        // The only safe cell has been played, the rest are mines.
        assert_eq!(agent.make_safe_move(), None);
    }

    #[test]
    fn test_random_move_covers_whole_board() {
        let agent = Agent::new(2, 2);
        let mut rng = StdRng::seed_from_u64(11);

        let mut seen = HashSet::new();
        for _ in 0..200 {
            let cell = agent.make_random_move_with(&mut rng).unwrap();
            assert!(cell.in_bounds(2, 2));
            seen.insert(cell);
        }

        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_random_move_skips_played_and_flagged_cells() {
        let mut agent = Agent::new(2, 2);
        agent.mark_mine(Cell::new(0, 0));
        agent.add_knowledge(Cell::new(1, 1), 1);

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let cell = agent.make_random_move_with(&mut rng).unwrap();
            assert_ne!(cell, Cell::new(0, 0));
            assert_ne!(cell, Cell::new(1, 1));
        }
    }

    #[test]
    fn test_random_move_none_when_board_is_exhausted() {
        let mut agent = Agent::new(1, 2);
        agent.add_knowledge(Cell::new(0, 0), 1);

        // (0,0) is played and (0,1) was deduced to be the mine.
        assert!(agent.knowledge().mines().contains(&Cell::new(0, 1)));
        assert_eq!(agent.make_random_move_with(&mut StdRng::seed_from_u64(0)), None);
        assert_eq!(agent.make_safe_move(), None);
    }

    #[test]
    fn test_knowledge_only_grows() {
        let mut agent = Agent::new(4, 4);
        let mut previous = (0, 0, 0);

        for (coord, hint) in [((0, 0), 0), ((2, 3), 1), ((3, 0), 2)] {
            agent.add_knowledge(Cell::new(coord.0, coord.1), hint);
            let current = (
                agent.knowledge().moves_made().len(),
                agent.knowledge().safes().len(),
                agent.knowledge().mines().len(),
            );
            assert!(current.0 >= previous.0);
            assert!(current.1 >= previous.1);
            assert!(current.2 >= previous.2);
            previous = current;
        }
    }

    #[test]
    fn test_chained_inference_across_hints() {
        // One mine at (2,2) on a 3x3 board; reveal everything else the way
        // a driver would and check the mine is eventually pinned down.
        let mut agent = Agent::new(3, 3);
        let hints = [
            ((0, 0), 0),
            ((0, 1), 0),
            ((0, 2), 0),
            ((1, 0), 0),
            ((1, 1), 1),
            ((1, 2), 1),
            ((2, 0), 0),
            ((2, 1), 1),
        ];
        for (coord, hint) in hints {
            agent.add_knowledge(Cell::new(coord.0, coord.1), hint);
        }

        assert_eq!(agent.knowledge().mines(), &cells(&[(2, 2)]));
        assert_eq!(agent.knowledge().safes().len(), 8);
        assert_knowledge_at_rest(&agent);
    }
}
