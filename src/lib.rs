//! Minesweeper Knowledge-Based Agent
//!
//! This library provides a Minesweeper board model and an agent that plays it
//! by propositional inference over sentences about groups of cells.

pub mod agent;
pub mod board;
pub mod config;
pub mod game;
pub mod utils;

pub use agent::{Agent, KnowledgeBase, Sentence};
pub use board::{Cell, ConfigurationError, InvalidCellError, Minefield};
pub use config::Settings;
pub use game::{BatchSummary, GameOutcome, GameReport, GameSession};

use anyhow::Result;

/// Main entry point for playing a single game
pub fn play_game(settings: Settings) -> Result<GameReport> {
    let mut session = GameSession::new(settings)?;
    session.play()
}
