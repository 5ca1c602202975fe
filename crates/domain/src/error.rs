//! Unified error types for the domain layer
//!
//! Every command on the game session either succeeds or fails with a
//! `DomainError`. Failures raised while validating preconditions leave the
//! aggregate untouched.

use thiserror::Error;

use crate::types::{GameStatus, TurnPhase};
use crate::value_objects::Money;
use crate::PlayerId;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Game, player or property id unknown to the session
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Command issued while the session is in the wrong lifecycle state
    #[error("Invalid game status. Expected {expected} but was {actual}")]
    InvalidGameStatus {
        expected: GameStatus,
        actual: GameStatus,
    },

    /// Command issued in the wrong phase of the current turn
    #[error("Invalid turn phase. Expected {expected} but was {actual}")]
    InvalidTurnPhase {
        expected: TurnPhase,
        actual: TurnPhase,
    },

    /// Command issued by a player other than the current player
    #[error("It is not your turn: current={current}, attempted={attempted}")]
    NotYourTurn {
        current: PlayerId,
        attempted: PlayerId,
    },

    /// Action-specific precondition violated
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Affordability check failed
    #[error("Insufficient funds: needed {needed}, available {available}")]
    InsufficientFunds { needed: Money, available: Money },

    /// Value object constructed from out-of-range input
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for vocabulary enums)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Internal invariant broken; the aggregate must be discarded and reloaded
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create an invalid action error
    pub fn invalid_action(msg: impl Into<String>) -> Self {
        Self::InvalidAction(msg.into())
    }

    /// Create an insufficient funds error
    pub fn insufficient_funds(needed: Money, available: Money) -> Self {
        Self::InsufficientFunds { needed, available }
    }

    /// Creates a validation error for value objects built from bad input.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// # Example
    /// ```ignore
    /// impl FromStr for TurnPhase {
    ///     type Err = DomainError;
    ///     fn from_str(s: &str) -> Result<Self, Self::Err> {
    ///         match s {
    ///             "ROLL" => Ok(Self::Roll),
    ///             _ => Err(DomainError::parse(format!("Unknown turn phase: {}", s))),
    ///         }
    ///     }
    /// }
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invariant violation error
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// Whether a caller may refresh state and retry with corrected input.
    ///
    /// Unknown ids and broken invariants are terminal for the command.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::NotFound { .. } | Self::InvariantViolation(_)
        )
    }
}
