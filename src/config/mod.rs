//! Configuration management for the Minesweeper agent

pub mod settings;

pub use settings::{BoardConfig, CliOverrides, OutputConfig, OutputFormat, PlayConfig, Settings};
