//! Knowledge representation and inference for the automated player

pub mod knowledge;
pub mod player;
pub mod sentence;

pub use knowledge::{KnowledgeBase, KnowledgeStatistics};
pub use player::Agent;
pub use sentence::Sentence;
