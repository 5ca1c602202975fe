//! In-memory state storage modules.
//!
//! Stores manage runtime state that doesn't belong in the database:
//! - `GameLockStore` - one in-flight command per game

pub mod game_locks;

pub use game_locks::{GameLockGuard, GameLockStore};
