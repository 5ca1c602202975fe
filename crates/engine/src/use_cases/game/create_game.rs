//! Create game use case.

use std::sync::Arc;

use fore_domain::{Difficulty, GameSession, PlayerId};

use super::{ActionOutcome, GameStorage, GameUseCaseError};
use crate::stores::GameLockStore;

/// Opens a new game. Against the NPC the game starts immediately.
pub struct CreateGame {
    storage: GameStorage,
    locks: Arc<GameLockStore>,
    default_npc_difficulty: Difficulty,
}

impl CreateGame {
    pub(crate) fn new(
        storage: GameStorage,
        locks: Arc<GameLockStore>,
        default_npc_difficulty: Difficulty,
    ) -> Self {
        Self {
            storage,
            locks,
            default_npc_difficulty,
        }
    }

    /// `difficulty` is only read for NPC games; when absent the configured
    /// default is used.
    pub async fn execute(
        &self,
        creator_id: PlayerId,
        creator_name: &str,
        vs_npc: bool,
        difficulty: Option<Difficulty>,
    ) -> Result<ActionOutcome, GameUseCaseError> {
        tracing::info!(player_id = %creator_id, vs_npc, "Creating game");

        let difficulty = vs_npc.then(|| difficulty.unwrap_or(self.default_npc_difficulty));
        let game = GameSession::create(
            creator_id,
            creator_name,
            vs_npc,
            difficulty,
            self.storage.clock.now(),
        );

        let _guard = self.locks.acquire(game.id()).await;
        let outcome = self.storage.commit(game, None).await?;

        tracing::info!(
            game_id = %outcome.game.id(),
            status = %outcome.game.status(),
            "Created game"
        );
        Ok(outcome)
    }
}
