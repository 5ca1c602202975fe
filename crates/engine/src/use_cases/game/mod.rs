//! Game use cases.
//!
//! Every mutating use case follows the same flow while holding the game's
//! lock: load, run one domain command, stamp the time, drain the recorded
//! events, save the session, then append the events to the log.

use std::sync::Arc;

use fore_domain::{DiceRoll, DomainError, GameId, GameSession};

use crate::infrastructure::ports::{
    ClockPort, GameEventRepo, GameRepo, RepoError, StoredEvent,
};

mod create_game;
mod execute_action;
mod get_game;
mod join_game;

pub use create_game::CreateGame;
pub use execute_action::{ExecuteAction, PlayerAction};
pub use get_game::GetGame;
pub use join_game::JoinGame;

/// Container for game use cases.
pub struct GameUseCases {
    pub create: Arc<CreateGame>,
    pub join: Arc<JoinGame>,
    pub execute: Arc<ExecuteAction>,
    pub get: Arc<GetGame>,
}

impl GameUseCases {
    pub fn new(
        create: Arc<CreateGame>,
        join: Arc<JoinGame>,
        execute: Arc<ExecuteAction>,
        get: Arc<GetGame>,
    ) -> Self {
        Self {
            create,
            join,
            execute,
            get,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GameUseCaseError {
    #[error("Game not found: {0}")]
    GameNotFound(GameId),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl GameUseCaseError {
    /// Whether the caller can fix the request and retry.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::GameNotFound(_) => false,
            Self::Domain(e) => e.is_recoverable(),
            Self::Repo(_) => false,
        }
    }
}

/// The state after a command plus what it changed.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub game: GameSession,
    /// Events recorded by the command, as appended to the log
    pub events: Vec<StoredEvent>,
    /// Set when the command rolled the dice
    pub dice: Option<DiceRoll>,
}

/// Storage shared by the mutating use cases.
#[derive(Clone)]
pub(crate) struct GameStorage {
    pub(crate) games: Arc<dyn GameRepo>,
    pub(crate) events: Arc<dyn GameEventRepo>,
    pub(crate) clock: Arc<dyn ClockPort>,
}

impl GameStorage {
    pub(crate) fn new(
        games: Arc<dyn GameRepo>,
        events: Arc<dyn GameEventRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            games,
            events,
            clock,
        }
    }

    pub(crate) async fn load(&self, game_id: GameId) -> Result<GameSession, GameUseCaseError> {
        self.games
            .get(game_id)
            .await?
            .ok_or(GameUseCaseError::GameNotFound(game_id))
    }

    /// Persist a commanded session and its drained events.
    pub(crate) async fn commit(
        &self,
        mut game: GameSession,
        dice: Option<DiceRoll>,
    ) -> Result<ActionOutcome, GameUseCaseError> {
        let now = self.clock.now();
        game.touch(now);
        let drained = game.drain_events();

        self.games.save(&game).await?;
        let events = self.events.append(game.id(), now, drained).await?;

        Ok(ActionOutcome { game, events, dice })
    }
}
