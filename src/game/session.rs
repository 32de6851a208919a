//! One game of Minesweeper, played to completion by the agent

use super::{GameOutcome, GameReport, MoveKind, MoveRecord};
use crate::agent::Agent;
use crate::board::Minefield;
use crate::config::Settings;
use crate::utils::BoardFormatter;
use anyhow::{Context, Result};
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A minefield paired with an agent that plays it.
///
/// The session is the only place where ground truth and belief meet: it
/// relays the agent's moves to the minefield and the minefield's hints
/// back to the agent, and records the exchange as a [`GameReport`].
pub struct GameSession {
    settings: Settings,
    minefield: Minefield,
    agent: Agent,
    rng: StdRng,
}

impl GameSession {
    /// Create a session with a randomly mined board described by the settings.
    pub fn new(settings: Settings) -> Result<Self> {
        let mut rng = Self::rng_from_seed(settings.board.seed);

        let minefield = Minefield::with_rng(
            settings.board.height,
            settings.board.width,
            settings.board.mine_count,
            &mut rng,
        )
        .context("Failed to set up the minefield")?;

        Ok(Self::assemble(settings, minefield, rng))
    }

    /// Create a session over an existing minefield, for replays and tests.
    pub fn with_minefield(settings: Settings, minefield: Minefield) -> Self {
        let rng = Self::rng_from_seed(settings.board.seed);
        Self::assemble(settings, minefield, rng)
    }

    fn assemble(settings: Settings, minefield: Minefield, rng: StdRng) -> Self {
        let agent = Agent::new(minefield.height(), minefield.width());
        Self {
            settings,
            minefield,
            agent,
            rng,
        }
    }

    fn rng_from_seed(seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn minefield(&self) -> &Minefield {
        &self.minefield
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Play the game until it is won, lost, or no move remains.
    ///
    /// Each turn prefers a proven safe move and falls back to a random
    /// one. Uncovering a mine ends the game at once; the final move is
    /// still recorded, with no hint attached.
    pub fn play(&mut self) -> Result<GameReport> {
        let mut moves = Vec::new();

        let outcome = loop {
            if self.minefield.won(self.agent.knowledge().mines()) {
                break GameOutcome::Won;
            }

            let (cell, kind) = match self.agent.make_safe_move() {
                Some(cell) => (cell, MoveKind::Safe),
                None => match self.agent.make_random_move_with(&mut self.rng) {
                    Some(cell) => (cell, MoveKind::Random),
                    None => break GameOutcome::Stalled,
                },
            };

            if self.minefield.is_mine(cell)? {
                moves.push(MoveRecord {
                    cell,
                    kind,
                    nearby: None,
                });
                if self.settings.play.show_moves {
                    println!("Move {}: {} move {} hit a mine", moves.len(), kind, cell);
                }
                break GameOutcome::Lost { detonated: cell };
            }

            let nearby = self.minefield.nearby_mine_count(cell)?;
            self.agent.add_knowledge(cell, nearby);
            moves.push(MoveRecord {
                cell,
                kind,
                nearby: Some(nearby),
            });

            if self.settings.play.show_moves {
                println!(
                    "Move {}: {} move {} revealed {}",
                    moves.len(),
                    kind,
                    cell,
                    nearby
                );
            }
            if self.settings.play.show_board {
                println!(
                    "{}",
                    BoardFormatter::format_agent_view(
                        self.agent.height(),
                        self.agent.width(),
                        &moves,
                        self.agent.knowledge().mines(),
                    )
                );
            }
        };

        let flagged_mines = self
            .agent
            .knowledge()
            .mines()
            .iter()
            .copied()
            .sorted()
            .collect();

        Ok(GameReport {
            height: self.minefield.height(),
            width: self.minefield.width(),
            mine_count: self.minefield.mine_count(),
            outcome,
            moves,
            flagged_mines,
        })
    }
}
