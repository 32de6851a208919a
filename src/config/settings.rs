//! Configuration settings for the Minesweeper agent

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub board: BoardConfig,
    pub play: PlayConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub height: usize,
    pub width: usize,
    pub mine_count: usize,
    /// Seed for mine placement and random moves; omit for a fresh game.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayConfig {
    pub games: usize,
    pub show_moves: bool,
    pub show_board: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub report_directory: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board: BoardConfig {
                height: 8,
                width: 8,
                mine_count: 8,
                seed: None,
            },
            play: PlayConfig {
                games: 1,
                show_moves: false,
                show_board: false,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                report_directory: None,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.board.height == 0 || self.board.width == 0 {
            anyhow::bail!("Board dimensions must be positive");
        }

        if self.board.mine_count == 0 {
            anyhow::bail!("Mine count must be positive");
        }

        if self.board.mine_count >= self.board.height * self.board.width {
            anyhow::bail!(
                "Mine count {} must be below the {} cells of a {}x{} board",
                self.board.mine_count,
                self.board.height * self.board.width,
                self.board.height,
                self.board.width
            );
        }

        if self.play.games == 0 {
            anyhow::bail!("Number of games must be positive");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(height) = cli_overrides.height {
            self.board.height = height;
        }
        if let Some(width) = cli_overrides.width {
            self.board.width = width;
        }
        if let Some(mine_count) = cli_overrides.mine_count {
            self.board.mine_count = mine_count;
        }
        if let Some(seed) = cli_overrides.seed {
            self.board.seed = Some(seed);
        }
        if let Some(games) = cli_overrides.games {
            self.play.games = games;
        }
        if let Some(ref report_directory) = cli_overrides.report_directory {
            self.output.report_directory = Some(report_directory.clone());
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub height: Option<usize>,
    pub width: Option<usize>,
    pub mine_count: Option<usize>,
    pub seed: Option<u64>,
    pub games: Option<usize>,
    pub report_directory: Option<PathBuf>,
}
