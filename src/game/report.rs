//! Game reports and batch statistics

use crate::board::Cell;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Terminal state of a finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    /// Every mine was flagged without detonating one
    Won,
    /// A mine was uncovered
    Lost { detonated: Cell },
    /// No safe move was known and no unexplored cell remained
    Stalled,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Won => write!(f, "won"),
            GameOutcome::Lost { detonated } => write!(f, "lost at {}", detonated),
            GameOutcome::Stalled => write!(f, "stalled"),
        }
    }
}

/// How a move was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    /// Deduced to be mine-free
    Safe,
    /// Picked uniformly among unexplored cells
    Random,
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveKind::Safe => write!(f, "safe"),
            MoveKind::Random => write!(f, "random"),
        }
    }
}

/// One uncovered cell and the hint it revealed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub cell: Cell,
    pub kind: MoveKind,
    /// Nearby mine count revealed by the move; absent when the move detonated a mine
    pub nearby: Option<usize>,
}

/// Complete record of a single game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    pub height: usize,
    pub width: usize,
    pub mine_count: usize,
    pub outcome: GameOutcome,
    pub moves: Vec<MoveRecord>,
    pub flagged_mines: Vec<Cell>,
}

impl GameReport {
    /// Number of moves chosen by deduction
    pub fn safe_moves(&self) -> usize {
        self.moves
            .iter()
            .filter(|record| record.kind == MoveKind::Safe)
            .count()
    }

    /// Number of moves chosen at random
    pub fn random_moves(&self) -> usize {
        self.moves
            .iter()
            .filter(|record| record.kind == MoveKind::Random)
            .count()
    }

    pub fn is_won(&self) -> bool {
        self.outcome == GameOutcome::Won
    }

    /// Convert report to JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report to JSON")
    }

    /// Create report from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to deserialize report from JSON")
    }

    /// Save report to a JSON file
    pub fn save_to_file(&self, path: &PathBuf) -> Result<()> {
        let json = self.to_json()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report file: {}", path.display()))?;

        Ok(())
    }

    /// Load report from a JSON file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read report file: {}", path.display()))?;

        Self::from_json(&content)
    }
}

/// Aggregate statistics over a batch of games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub stalls: usize,
    pub total_moves: usize,
    pub safe_moves: usize,
    pub random_moves: usize,
}

impl BatchSummary {
    /// Summarize a batch of finished games
    pub fn from_reports(reports: &[GameReport]) -> Self {
        let mut summary = Self {
            games: reports.len(),
            wins: 0,
            losses: 0,
            stalls: 0,
            total_moves: 0,
            safe_moves: 0,
            random_moves: 0,
        };

        for report in reports {
            match report.outcome {
                GameOutcome::Won => summary.wins += 1,
                GameOutcome::Lost { .. } => summary.losses += 1,
                GameOutcome::Stalled => summary.stalls += 1,
            }
            summary.total_moves += report.moves.len();
            summary.safe_moves += report.safe_moves();
            summary.random_moves += report.random_moves();
        }

        summary
    }

    /// Fraction of games won, in percent
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64 * 100.0
        }
    }

    /// Mean number of moves per game
    pub fn average_moves(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_moves as f64 / self.games as f64
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Batch Summary:")?;
        writeln!(f, "  Games played: {}", self.games)?;
        writeln!(f, "  Wins: {}", self.wins)?;
        writeln!(f, "  Losses: {}", self.losses)?;
        writeln!(f, "  Stalls: {}", self.stalls)?;
        writeln!(f, "  Win rate: {:.1}%", self.win_rate())?;
        writeln!(f, "  Total moves: {}", self.total_moves)?;
        writeln!(f, "  Safe moves: {}", self.safe_moves)?;
        writeln!(f, "  Random moves: {}", self.random_moves)?;
        write!(f, "  Average moves per game: {:.1}", self.average_moves())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_report() -> GameReport {
        GameReport {
            height: 2,
            width: 2,
            mine_count: 1,
            outcome: GameOutcome::Won,
            moves: vec![
                MoveRecord {
                    cell: Cell::new(0, 0),
                    kind: MoveKind::Random,
                    nearby: Some(1),
                },
                MoveRecord {
                    cell: Cell::new(0, 1),
                    kind: MoveKind::Safe,
                    nearby: Some(1),
                },
                MoveRecord {
                    cell: Cell::new(1, 0),
                    kind: MoveKind::Safe,
                    nearby: Some(1),
                },
            ],
            flagged_mines: vec![Cell::new(1, 1)],
        }
    }

    #[test]
    fn test_outcome_serialization_uses_snake_case() {
        let won = serde_json::to_string(&GameOutcome::Won).unwrap();
        assert_eq!(won, "\"won\"");

        let lost = serde_json::to_string(&GameOutcome::Lost {
            detonated: Cell::new(1, 2),
        })
        .unwrap();
        assert!(lost.contains("lost"));
        assert!(lost.contains("detonated"));
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(GameOutcome::Won.to_string(), "won");
        assert_eq!(
            GameOutcome::Lost {
                detonated: Cell::new(1, 2)
            }
            .to_string(),
            "lost at (1, 2)"
        );
        assert_eq!(GameOutcome::Stalled.to_string(), "stalled");
    }

    #[test]
    fn test_move_counts() {
        let report = sample_report();

        assert_eq!(report.safe_moves(), 2);
        assert_eq!(report.random_moves(), 1);
        assert!(report.is_won());
    }

    #[test]
    fn test_json_round_trip() {
        let report = sample_report();

        let json = report.to_json().unwrap();
        let restored = GameReport::from_json(&json).unwrap();

        assert_eq!(restored, report);
    }

    #[test]
    fn test_save_and_load_report() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("reports").join("game.json");

        let report = sample_report();
        report.save_to_file(&path).unwrap();

        let loaded = GameReport::load_from_file(&path).unwrap();
        assert_eq!(loaded, report);
    }

    #[test]
    fn test_batch_summary_aggregates() {
        let won = sample_report();
        let mut lost = sample_report();
        lost.outcome = GameOutcome::Lost {
            detonated: Cell::new(1, 1),
        };
        lost.moves.truncate(1);
        lost.flagged_mines.clear();

        let summary = BatchSummary::from_reports(&[won, lost]);

        assert_eq!(summary.games, 2);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.losses, 1);
        assert_eq!(summary.stalls, 0);
        assert_eq!(summary.total_moves, 4);
        assert_eq!(summary.safe_moves, 2);
        assert_eq!(summary.random_moves, 2);
        assert!((summary.win_rate() - 50.0).abs() < f64::EPSILON);
        assert!((summary.average_moves() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_batch_summary() {
        let summary = BatchSummary::from_reports(&[]);

        assert_eq!(summary.games, 0);
        assert_eq!(summary.win_rate(), 0.0);
        assert_eq!(summary.average_moves(), 0.0);
    }

    #[test]
    fn test_batch_summary_display() {
        let summary = BatchSummary::from_reports(&[sample_report()]);
        let text = summary.to_string();

        assert!(text.contains("Batch Summary:"));
        assert!(text.contains("Games played: 1"));
        assert!(text.contains("Win rate: 100.0%"));
        assert!(text.contains("Average moves per game: 3.0"));
    }
}
