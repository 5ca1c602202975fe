//! Per-game command serialization.
//!
//! A game accepts one command at a time. Use cases hold the game's lock from
//! load to save so two commands can never interleave on the same session.
//! Commands for different games run in parallel.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use fore_domain::GameId;
use tokio::sync::{Mutex, OwnedMutexGuard};

struct LockEntry {
    lock: Arc<Mutex<()>>,
    last_used: Instant,
}

impl LockEntry {
    fn new() -> Self {
        Self {
            lock: Arc::new(Mutex::new(())),
            last_used: Instant::now(),
        }
    }
}

/// Guard for a game's lock. The game is released when this is dropped.
pub type GameLockGuard = OwnedMutexGuard<()>;

pub struct GameLockStore {
    locks: DashMap<GameId, LockEntry>,
    idle_ttl: Duration,
}

impl GameLockStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            locks: DashMap::new(),
            idle_ttl,
        }
    }

    /// Wait for exclusive access to `game_id`.
    pub async fn acquire(&self, game_id: GameId) -> GameLockGuard {
        let lock = {
            let mut entry = self.locks.entry(game_id).or_insert_with(LockEntry::new);
            entry.last_used = Instant::now();
            Arc::clone(&entry.lock)
        };
        lock.lock_owned().await
    }

    /// Drop locks nobody has used within the idle TTL.
    ///
    /// Locks that are held or awaited are kept regardless of age. Returns the
    /// number of evicted entries.
    pub fn evict_idle(&self) -> usize {
        let before = self.locks.len();
        let idle_ttl = self.idle_ttl;
        self.locks.retain(|_, entry| {
            Arc::strong_count(&entry.lock) > 1 || entry.last_used.elapsed() < idle_ttl
        });
        let evicted = before.saturating_sub(self.locks.len());
        if evicted > 0 {
            tracing::debug!(evicted, remaining = self.locks.len(), "Evicted idle game locks");
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
