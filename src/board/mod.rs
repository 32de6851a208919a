//! Board primitives: cells and the ground-truth minefield

pub mod cell;
pub mod minefield;

pub use cell::Cell;
pub use minefield::{ConfigurationError, InvalidCellError, Minefield};
