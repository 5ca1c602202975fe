//! Data shapes exchanged across the repository ports.

use chrono::{DateTime, Utc};
use fore_domain::{EventId, GameEvent, GameId};
use serde::{Deserialize, Serialize};

/// A game event as written to the event log.
///
/// `sequence` starts at 1 for each game and increases by one per event, in
/// the order the session recorded them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEvent {
    pub sequence: u64,
    pub event_id: EventId,
    pub game_id: GameId,
    pub occurred_at: DateTime<Utc>,
    pub event: GameEvent,
}

impl StoredEvent {
    #[inline]
    pub fn event_type(&self) -> &'static str {
        self.event.event_type()
    }
}
