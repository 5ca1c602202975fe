//! Shared vocabulary types used across the domain and by host adapters.

pub mod board;
pub mod session;

pub use board::{CourseGroup, ImprovementLevel, TileType};
pub use session::{Difficulty, GameStatus, TradeStatus, TurnPhase};
