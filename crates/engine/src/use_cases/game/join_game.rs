//! Join game use case.

use std::sync::Arc;

use fore_domain::{GameId, PlayerId};

use super::{ActionOutcome, GameStorage, GameUseCaseError};
use crate::stores::GameLockStore;

/// Seats a second human in a waiting game, which starts it.
pub struct JoinGame {
    storage: GameStorage,
    locks: Arc<GameLockStore>,
}

impl JoinGame {
    pub(crate) fn new(storage: GameStorage, locks: Arc<GameLockStore>) -> Self {
        Self { storage, locks }
    }

    pub async fn execute(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        player_name: &str,
    ) -> Result<ActionOutcome, GameUseCaseError> {
        tracing::info!(game_id = %game_id, player_id = %player_id, "Player joining game");

        let _guard = self.locks.acquire(game_id).await;
        let mut game = self.storage.load(game_id).await?;
        game.join(player_id, player_name)?;
        let outcome = self.storage.commit(game, None).await?;

        tracing::info!(
            game_id = %game_id,
            player_id = %player_id,
            status = %outcome.game.status(),
            "Player joined game"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{GameEventRepo, GameRepo};
    use crate::use_cases::game::test_support::memory_storage;
    use chrono::{TimeZone, Utc};
    use fore_domain::{DomainError, GameSession, GameStatus};
    use std::time::Duration;

    fn join_game(storage: GameStorage) -> JoinGame {
        JoinGame::new(storage, Arc::new(GameLockStore::new(Duration::from_secs(60))))
    }

    async fn saved_waiting_game(games: &dyn GameRepo) -> (GameSession, PlayerId) {
        let alice = PlayerId::new();
        let created = Utc.with_ymd_and_hms(2025, 6, 1, 11, 0, 0).unwrap();
        let mut game = GameSession::create(alice, "Alice", false, None, created);
        game.drain_events();
        games.save(&game).await.unwrap();
        (game, alice)
    }

    #[tokio::test]
    async fn joining_starts_the_game_with_the_creator_to_roll() {
        let (storage, games, events) = memory_storage();
        let (game, alice) = saved_waiting_game(games.as_ref()).await;
        let bob = PlayerId::new();

        let outcome = join_game(storage)
            .execute(game.id(), bob, "Bob")
            .await
            .unwrap();

        assert_eq!(outcome.game.status(), GameStatus::InProgress);
        assert_eq!(outcome.game.current_player_id(), Some(alice));
        let types: Vec<_> = outcome.events.iter().map(|e| e.event_type()).collect();
        assert_eq!(types, vec!["PLAYER_JOINED", "GAME_STARTED"]);

        let stored = games.get(game.id()).await.unwrap().unwrap();
        assert!(stored.has_player(bob));
        assert_eq!(events.next_sequence(game.id()).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn unknown_game_is_not_found() {
        let (storage, _games, _events) = memory_storage();
        let missing = GameId::new();

        let err = join_game(storage)
            .execute(missing, PlayerId::new(), "Bob")
            .await
            .unwrap_err();

        assert!(matches!(err, GameUseCaseError::GameNotFound(id) if id == missing));
    }

    #[tokio::test]
    async fn full_game_rejects_join_and_stores_nothing() {
        let (storage, games, events) = memory_storage();
        let (game, _alice) = saved_waiting_game(games.as_ref()).await;
        let use_case = join_game(storage);
        use_case
            .execute(game.id(), PlayerId::new(), "Bob")
            .await
            .unwrap();
        let logged = events.list_for_game(game.id()).await.unwrap().len();

        let err = use_case
            .execute(game.id(), PlayerId::new(), "Carol")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            GameUseCaseError::Domain(DomainError::InvalidGameStatus { .. })
        ));
        assert_eq!(events.list_for_game(game.id()).await.unwrap().len(), logged);
        assert_eq!(games.get(game.id()).await.unwrap().unwrap().players().len(), 2);
    }
}
