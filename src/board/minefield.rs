//! Ground-truth minefield representation

use super::Cell;
use itertools::Itertools;
use rand::prelude::SliceRandom;
use rand::RngCore;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// A board construction request that can never produce a valid minefield.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("cannot place {mine_count} mines on a {height}x{width} board")]
    TooManyMines {
        height: usize,
        width: usize,
        mine_count: usize,
    },
    #[error("mine at {cell} lies outside the {height}x{width} board")]
    MineOutOfBounds {
        height: usize,
        width: usize,
        cell: Cell,
    },
}

/// A coordinate outside the board was passed to a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cell {cell} is out of bounds for a {height}x{width} board")]
pub struct InvalidCellError {
    pub height: usize,
    pub width: usize,
    pub cell: Cell,
}

/// The true state of a Minesweeper board: dimensions and mine placement.
///
/// Immutable after construction; all queries are side-effect free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minefield {
    height: usize,
    width: usize,
    mines: HashSet<Cell>,
}

impl Minefield {
    /// Create a board with `mine_count` mines placed uniformly at random
    /// without replacement.
    pub fn new(height: usize, width: usize, mine_count: usize) -> Result<Self, ConfigurationError> {
        Self::with_rng(height, width, mine_count, &mut rand::thread_rng())
    }

    /// Random mine placement with an injected rng, for reproducible boards.
    pub fn with_rng(
        height: usize,
        width: usize,
        mine_count: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Self, ConfigurationError> {
        if mine_count > height * width {
            return Err(ConfigurationError::TooManyMines {
                height,
                width,
                mine_count,
            });
        }

        // Shuffle every position and keep a prefix of the requested size.
        let mut positions: Vec<Cell> = (0..height)
            .cartesian_product(0..width)
            .map(|(row, col)| Cell::new(row, col))
            .collect();
        positions.shuffle(rng);

        let mines = positions.into_iter().take(mine_count).collect();

        Ok(Self {
            height,
            width,
            mines,
        })
    }

    /// Create a board with an explicit mine set (useful for testing and
    /// replaying recorded games).
    pub fn from_mines(
        height: usize,
        width: usize,
        mines: HashSet<Cell>,
    ) -> Result<Self, ConfigurationError> {
        for &cell in &mines {
            if !cell.in_bounds(height, width) {
                return Err(ConfigurationError::MineOutOfBounds {
                    height,
                    width,
                    cell,
                });
            }
        }

        Ok(Self {
            height,
            width,
            mines,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of mines on the board.
    pub fn mine_count(&self) -> usize {
        self.mines.len()
    }

    /// The true mine set.
    pub fn mines(&self) -> &HashSet<Cell> {
        &self.mines
    }

    /// Whether `cell` holds a mine.
    pub fn is_mine(&self, cell: Cell) -> Result<bool, InvalidCellError> {
        self.check_bounds(cell)?;
        Ok(self.mines.contains(&cell))
    }

    /// Number of mines among the up-to-8 cells surrounding `cell`.
    pub fn nearby_mine_count(&self, cell: Cell) -> Result<usize, InvalidCellError> {
        self.check_bounds(cell)?;

        let count = cell
            .neighbors(self.height, self.width)
            .into_iter()
            .filter(|neighbor| self.mines.contains(neighbor))
            .count();

        Ok(count)
    }

    /// Whether the flagged set matches the true mine set exactly.
    pub fn won(&self, flagged: &HashSet<Cell>) -> bool {
        *flagged == self.mines
    }

    fn check_bounds(&self, cell: Cell) -> Result<(), InvalidCellError> {
        if cell.in_bounds(self.height, self.width) {
            Ok(())
        } else {
            Err(InvalidCellError {
                height: self.height,
                width: self.width,
                cell,
            })
        }
    }
}

impl fmt::Display for Minefield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let symbol = if self.mines.contains(&Cell::new(row, col)) {
                    '*'
                } else {
                    '·'
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixture() -> Minefield {
        // * · ·
        // · · ·
        // · · *
        let mines = [Cell::new(0, 0), Cell::new(2, 2)].into_iter().collect();
        Minefield::from_mines(3, 3, mines).unwrap()
    }

    #[test]
    fn test_placement_cardinality_and_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let field = Minefield::with_rng(4, 5, 7, &mut rng).unwrap();

        assert_eq!(field.mine_count(), 7);
        assert!(field.mines().iter().all(|cell| cell.in_bounds(4, 5)));
    }

    #[test]
    fn test_seeded_placement_is_deterministic() {
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);

        let field_a = Minefield::with_rng(6, 6, 10, &mut rng_a).unwrap();
        let field_b = Minefield::with_rng(6, 6, 10, &mut rng_b).unwrap();

        assert_eq!(field_a, field_b);
    }

    #[test]
    fn test_full_board_is_allowed() {
        let mut rng = StdRng::seed_from_u64(1);
        let field = Minefield::with_rng(2, 2, 4, &mut rng).unwrap();

        assert_eq!(field.mine_count(), 4);
    }

    #[test]
    fn test_too_many_mines_is_rejected() {
        let result = Minefield::new(2, 2, 5);

        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::TooManyMines {
                height: 2,
                width: 2,
                mine_count: 5,
            }
        );
    }

    #[test]
    fn test_explicit_mine_out_of_bounds_is_rejected() {
        let mines = [Cell::new(3, 0)].into_iter().collect();
        let result = Minefield::from_mines(3, 3, mines);

        assert!(matches!(
            result,
            Err(ConfigurationError::MineOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_is_mine() {
        let field = fixture();

        assert!(field.is_mine(Cell::new(0, 0)).unwrap());
        assert!(!field.is_mine(Cell::new(1, 1)).unwrap());
    }

    #[test]
    fn test_queries_reject_out_of_bounds_cells() {
        let field = fixture();
        let outside = Cell::new(3, 1);

        assert_eq!(
            field.is_mine(outside).unwrap_err(),
            InvalidCellError {
                height: 3,
                width: 3,
                cell: outside,
            }
        );
        assert!(field.nearby_mine_count(Cell::new(0, 3)).is_err());
    }

    #[test]
    fn test_nearby_mine_count() {
        let field = fixture();

        // Center sees both mines, corners see at most one.
        assert_eq!(field.nearby_mine_count(Cell::new(1, 1)).unwrap(), 2);
        assert_eq!(field.nearby_mine_count(Cell::new(0, 1)).unwrap(), 1);
        assert_eq!(field.nearby_mine_count(Cell::new(2, 0)).unwrap(), 0);
        // A mine cell reports only its neighbors, not itself.
        assert_eq!(field.nearby_mine_count(Cell::new(0, 0)).unwrap(), 0);
    }

    #[test]
    fn test_won_requires_exact_flag_set() {
        let field = fixture();

        let exact: HashSet<Cell> = [Cell::new(0, 0), Cell::new(2, 2)].into_iter().collect();
        let partial: HashSet<Cell> = [Cell::new(0, 0)].into_iter().collect();
        let mut excess = exact.clone();
        excess.insert(Cell::new(1, 1));

        assert!(field.won(&exact));
        assert!(!field.won(&partial));
        assert!(!field.won(&excess));
        assert!(!field.won(&HashSet::new()));
    }

    #[test]
    fn test_display_marks_mines() {
        let rendered = fixture().to_string();

        assert_eq!(rendered, "*··\n···\n··*\n");
    }
}
