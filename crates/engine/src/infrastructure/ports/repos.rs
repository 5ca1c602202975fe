//! Repository port traits for game storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fore_domain::{GameEvent, GameId, GameSession, GameStatus, PlayerId};

use super::error::RepoError;
use super::types::StoredEvent;

// =============================================================================
// Game Sessions
// =============================================================================

/// Whole-aggregate storage. Saving overwrites the previous state of the game.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameRepo: Send + Sync {
    // CRUD
    async fn get(&self, id: GameId) -> Result<Option<GameSession>, RepoError>;
    async fn save(&self, game: &GameSession) -> Result<(), RepoError>;
    async fn delete(&self, id: GameId) -> Result<(), RepoError>;
    async fn exists(&self, id: GameId) -> Result<bool, RepoError>;

    // Queries
    async fn list_by_status(&self, status: GameStatus) -> Result<Vec<GameSession>, RepoError>;
    /// Waiting and in-progress games the player is seated in.
    async fn list_active_for_player(
        &self,
        player_id: PlayerId,
    ) -> Result<Vec<GameSession>, RepoError>;
    async fn count_by_status(&self, status: GameStatus) -> Result<u64, RepoError>;
}

// =============================================================================
// Event Log
// =============================================================================

/// Append-only log of drained game events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameEventRepo: Send + Sync {
    /// Append in order, returning the stored records with their sequence numbers.
    async fn append(
        &self,
        game_id: GameId,
        occurred_at: DateTime<Utc>,
        events: Vec<GameEvent>,
    ) -> Result<Vec<StoredEvent>, RepoError>;
    async fn list_for_game(&self, game_id: GameId) -> Result<Vec<StoredEvent>, RepoError>;
    /// Events with a sequence strictly greater than `sequence`.
    async fn list_after_sequence(
        &self,
        game_id: GameId,
        sequence: u64,
    ) -> Result<Vec<StoredEvent>, RepoError>;
    /// The sequence number the next appended event will receive.
    async fn next_sequence(&self, game_id: GameId) -> Result<u64, RepoError>;
}
