//! Read-only game queries.

use std::sync::Arc;

use fore_domain::{GameId, GameSession, GameStatus, PlayerId};

use super::GameUseCaseError;
use crate::infrastructure::ports::{GameEventRepo, GameRepo, StoredEvent};

pub struct GetGame {
    games: Arc<dyn GameRepo>,
    events: Arc<dyn GameEventRepo>,
}

impl GetGame {
    pub fn new(games: Arc<dyn GameRepo>, events: Arc<dyn GameEventRepo>) -> Self {
        Self { games, events }
    }

    pub async fn by_id(&self, game_id: GameId) -> Result<GameSession, GameUseCaseError> {
        tracing::debug!(game_id = %game_id, "Fetching game");
        self.games
            .get(game_id)
            .await?
            .ok_or(GameUseCaseError::GameNotFound(game_id))
    }

    /// Games still waiting for a second player.
    pub async fn available(&self) -> Result<Vec<GameSession>, GameUseCaseError> {
        tracing::debug!("Fetching available games");
        Ok(self.games.list_by_status(GameStatus::Waiting).await?)
    }

    /// Waiting and in-progress games the player is seated in.
    pub async fn active_for_player(
        &self,
        player_id: PlayerId,
    ) -> Result<Vec<GameSession>, GameUseCaseError> {
        tracing::debug!(player_id = %player_id, "Fetching games for player");
        Ok(self.games.list_active_for_player(player_id).await?)
    }

    /// Logged events after `sequence`, for clients catching up.
    pub async fn events_since(
        &self,
        game_id: GameId,
        sequence: u64,
    ) -> Result<Vec<StoredEvent>, GameUseCaseError> {
        if !self.games.exists(game_id).await? {
            return Err(GameUseCaseError::GameNotFound(game_id));
        }
        Ok(self.events.list_after_sequence(game_id, sequence).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockGameEventRepo, MockGameRepo};
    use chrono::{TimeZone, Utc};
    use mockall::predicate::*;

    fn waiting_game() -> GameSession {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 11, 0, 0).unwrap();
        GameSession::create(PlayerId::new(), "Alice", false, None, now)
    }

    #[tokio::test]
    async fn by_id_returns_stored_game() {
        let game = waiting_game();
        let game_id = game.id();
        let mut games = MockGameRepo::new();
        games
            .expect_get()
            .with(eq(game_id))
            .returning(move |_| Ok(Some(game.clone())));

        let use_case = GetGame::new(Arc::new(games), Arc::new(MockGameEventRepo::new()));
        let found = use_case.by_id(game_id).await.unwrap();

        assert_eq!(found.id(), game_id);
    }

    #[tokio::test]
    async fn by_id_missing_game_is_not_found() {
        let mut games = MockGameRepo::new();
        games.expect_get().returning(|_| Ok(None));

        let use_case = GetGame::new(Arc::new(games), Arc::new(MockGameEventRepo::new()));
        let err = use_case.by_id(GameId::new()).await.unwrap_err();

        assert!(matches!(err, GameUseCaseError::GameNotFound(_)));
    }

    #[tokio::test]
    async fn available_lists_waiting_games() {
        let mut games = MockGameRepo::new();
        games
            .expect_list_by_status()
            .with(eq(GameStatus::Waiting))
            .times(1)
            .returning(|_| Ok(vec![waiting_game(), waiting_game()]));

        let use_case = GetGame::new(Arc::new(games), Arc::new(MockGameEventRepo::new()));

        assert_eq!(use_case.available().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn active_for_player_delegates_to_repo() {
        let player_id = PlayerId::new();
        let mut games = MockGameRepo::new();
        games
            .expect_list_active_for_player()
            .with(eq(player_id))
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let use_case = GetGame::new(Arc::new(games), Arc::new(MockGameEventRepo::new()));

        assert!(use_case.active_for_player(player_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn events_since_requires_a_known_game() {
        let mut games = MockGameRepo::new();
        games.expect_exists().returning(|_| Ok(false));
        let mut events = MockGameEventRepo::new();
        events.expect_list_after_sequence().never();

        let use_case = GetGame::new(Arc::new(games), Arc::new(events));
        let err = use_case.events_since(GameId::new(), 0).await.unwrap_err();

        assert!(matches!(err, GameUseCaseError::GameNotFound(_)));
    }

    #[tokio::test]
    async fn events_since_passes_the_cursor_through() {
        let game_id = GameId::new();
        let mut games = MockGameRepo::new();
        games.expect_exists().returning(|_| Ok(true));
        let mut events = MockGameEventRepo::new();
        events
            .expect_list_after_sequence()
            .with(eq(game_id), eq(7u64))
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let use_case = GetGame::new(Arc::new(games), Arc::new(events));

        assert!(use_case.events_since(game_id, 7).await.unwrap().is_empty());
    }
}
