//! In-memory event log.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fore_domain::{EventId, GameEvent, GameId};
use tokio::sync::RwLock;

use crate::infrastructure::ports::{GameEventRepo, RepoError, StoredEvent};

/// Per-game event streams, each numbered from 1.
pub struct InMemoryGameEventRepo {
    streams: RwLock<HashMap<GameId, Vec<StoredEvent>>>,
}

impl InMemoryGameEventRepo {
    pub fn new() -> Self {
        Self {
            streams: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryGameEventRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameEventRepo for InMemoryGameEventRepo {
    async fn append(
        &self,
        game_id: GameId,
        occurred_at: DateTime<Utc>,
        events: Vec<GameEvent>,
    ) -> Result<Vec<StoredEvent>, RepoError> {
        let mut streams = self.streams.write().await;
        let stream = streams.entry(game_id).or_default();

        let first = stream.len() as u64 + 1;
        let stored: Vec<StoredEvent> = events
            .into_iter()
            .zip(first..)
            .map(|(event, sequence)| StoredEvent {
                sequence,
                event_id: EventId::new(),
                game_id,
                occurred_at,
                event,
            })
            .collect();
        stream.extend(stored.iter().cloned());

        tracing::debug!(
            game_id = %game_id,
            appended = stored.len(),
            total = stream.len(),
            "Appended game events"
        );
        Ok(stored)
    }

    async fn list_for_game(&self, game_id: GameId) -> Result<Vec<StoredEvent>, RepoError> {
        let streams = self.streams.read().await;
        Ok(streams.get(&game_id).cloned().unwrap_or_default())
    }

    async fn list_after_sequence(
        &self,
        game_id: GameId,
        sequence: u64,
    ) -> Result<Vec<StoredEvent>, RepoError> {
        let streams = self.streams.read().await;
        Ok(streams
            .get(&game_id)
            .map(|stream| {
                stream
                    .iter()
                    .filter(|stored| stored.sequence > sequence)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn next_sequence(&self, game_id: GameId) -> Result<u64, RepoError> {
        let streams = self.streams.read().await;
        Ok(streams.get(&game_id).map_or(0, |stream| stream.len() as u64) + 1)
    }
}
