//! Game orchestration: sessions, reports, and batch statistics

pub mod report;
pub mod session;

pub use report::{BatchSummary, GameOutcome, GameReport, MoveKind, MoveRecord};
pub use session::GameSession;
