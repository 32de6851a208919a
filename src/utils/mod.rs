//! Utility modules for display and output

pub mod display;

pub use display::{BoardFormatter, Color, ColorOutput, ProgressIndicator};
