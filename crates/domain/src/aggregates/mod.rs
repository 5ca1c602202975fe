//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Has a unique identity
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Records events from mutations for the host to drain
//!
//! A game has a single aggregate root. Board, seats and trade offers are
//! only ever mutated through it.

pub mod game_session;

pub use game_session::{GameSession, GameSnapshot, PlayerSnapshot, PropertySnapshot};
