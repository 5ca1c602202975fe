//! In-memory game storage.
//!
//! Sessions are kept in their persisted form (a JSON-encoded snapshot) so
//! every load goes through the same reconstitution checks a database-backed
//! adapter would run.

use std::collections::HashMap;

use async_trait::async_trait;
use fore_domain::{GameId, GameSession, GameSnapshot, GameStatus, PlayerId};
use tokio::sync::RwLock;

use crate::infrastructure::ports::{GameRepo, RepoError};

/// Indexed columns kept beside the encoded snapshot.
struct StoredGame {
    status: GameStatus,
    player_ids: Vec<PlayerId>,
    snapshot_json: String,
}

impl StoredGame {
    fn encode(game: &GameSession) -> Result<Self, RepoError> {
        let snapshot_json = serde_json::to_string(&game.to_snapshot())?;
        Ok(Self {
            status: game.status(),
            player_ids: game.players().iter().map(|p| p.player_id()).collect(),
            snapshot_json,
        })
    }

    fn decode(&self) -> Result<GameSession, RepoError> {
        let snapshot: GameSnapshot = serde_json::from_str(&self.snapshot_json)?;
        Ok(GameSession::reconstitute(snapshot)?)
    }

    fn is_active(&self) -> bool {
        matches!(self.status, GameStatus::Waiting | GameStatus::InProgress)
    }
}

pub struct InMemoryGameRepo {
    games: RwLock<HashMap<GameId, StoredGame>>,
}

impl InMemoryGameRepo {
    pub fn new() -> Self {
        Self {
            games: RwLock::new(HashMap::new()),
        }
    }

    async fn decode_where(
        &self,
        filter: impl Fn(&StoredGame) -> bool,
    ) -> Result<Vec<GameSession>, RepoError> {
        let games = self.games.read().await;
        let mut decoded = games
            .values()
            .filter(|stored| filter(stored))
            .map(StoredGame::decode)
            .collect::<Result<Vec<_>, _>>()?;
        decoded.sort_by_key(|game| (game.created_at(), game.id()));
        Ok(decoded)
    }
}

impl Default for InMemoryGameRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameRepo for InMemoryGameRepo {
    async fn get(&self, id: GameId) -> Result<Option<GameSession>, RepoError> {
        let games = self.games.read().await;
        games.get(&id).map(StoredGame::decode).transpose()
    }

    async fn save(&self, game: &GameSession) -> Result<(), RepoError> {
        let stored = StoredGame::encode(game)?;
        self.games.write().await.insert(game.id(), stored);
        tracing::debug!(game_id = %game.id(), status = %game.status(), "Saved game");
        Ok(())
    }

    async fn delete(&self, id: GameId) -> Result<(), RepoError> {
        self.games
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::GameMissing(id))
    }

    async fn exists(&self, id: GameId) -> Result<bool, RepoError> {
        Ok(self.games.read().await.contains_key(&id))
    }

    async fn list_by_status(&self, status: GameStatus) -> Result<Vec<GameSession>, RepoError> {
        self.decode_where(|stored| stored.status == status).await
    }

    async fn list_active_for_player(
        &self,
        player_id: PlayerId,
    ) -> Result<Vec<GameSession>, RepoError> {
        self.decode_where(|stored| stored.is_active() && stored.player_ids.contains(&player_id))
            .await
    }

    async fn count_by_status(&self, status: GameStatus) -> Result<u64, RepoError> {
        let games = self.games.read().await;
        let count = games.values().filter(|stored| stored.status == status).count();
        Ok(count as u64)
    }
}
