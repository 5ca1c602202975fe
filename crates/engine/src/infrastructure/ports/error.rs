//! Storage failures reported by the repository ports.

use fore_domain::{DomainError, GameId};

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Game {0} is not stored")]
    GameMissing(GameId),

    /// The backing store itself failed.
    #[error("Storage failed during {operation}: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },

    /// A snapshot could not be encoded or decoded.
    #[error("Snapshot encoding failed: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// A decoded snapshot no longer describes a valid session.
    #[error("Stored game is inconsistent: {0}")]
    Inconsistent(#[from] DomainError),
}

impl RepoError {
    pub fn backend(operation: &'static str, message: impl ToString) -> Self {
        Self::Backend {
            operation,
            message: message.to_string(),
        }
    }

    pub fn is_game_missing(&self) -> bool {
        matches!(self, Self::GameMissing(_))
    }
}
