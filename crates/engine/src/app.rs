//! Application state and composition.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    memory::{InMemoryGameEventRepo, InMemoryGameRepo},
    ports::{ClockPort, GameEventRepo, GameRepo, RandomPort},
    settings::EngineSettings,
};
use crate::stores::GameLockStore;
use crate::use_cases::game::{
    CreateGame, ExecuteAction, GameStorage, GameUseCases, GetGame, JoinGame,
};

/// Main application state.
///
/// Holds the repositories, the per-game locks and all use cases.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
    pub locks: Arc<GameLockStore>,
    pub settings: EngineSettings,
}

/// Container for all repository ports.
pub struct Repositories {
    pub game: Arc<dyn GameRepo>,
    pub game_events: Arc<dyn GameEventRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub game: GameUseCases,
}

impl App {
    /// Create a new App with all dependencies wired.
    pub fn new(
        settings: EngineSettings,
        repositories: Repositories,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let locks = Arc::new(GameLockStore::new(settings.idle_lock_ttl));
        let storage = GameStorage::new(
            repositories.game.clone(),
            repositories.game_events.clone(),
            clock,
        );

        let game = GameUseCases::new(
            Arc::new(CreateGame::new(
                storage.clone(),
                locks.clone(),
                settings.default_npc_difficulty,
            )),
            Arc::new(JoinGame::new(storage.clone(), locks.clone())),
            Arc::new(ExecuteAction::new(storage, locks.clone(), random)),
            Arc::new(GetGame::new(
                repositories.game.clone(),
                repositories.game_events.clone(),
            )),
        );

        Self {
            repositories,
            use_cases: UseCases { game },
            locks,
            settings,
        }
    }

    /// In-memory storage with the system clock and random source.
    pub fn in_memory(settings: EngineSettings) -> Self {
        let repositories = Repositories {
            game: Arc::new(InMemoryGameRepo::new()),
            game_events: Arc::new(InMemoryGameEventRepo::new()),
        };
        Self::new(
            settings,
            repositories,
            Arc::new(SystemClock),
            Arc::new(SystemRandom),
        )
    }

    /// Evict idle game locks once per idle TTL until the task is aborted.
    pub fn spawn_lock_eviction(&self) -> JoinHandle<()> {
        let locks = self.locks.clone();
        let period = self.settings.idle_lock_ttl;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // the first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                locks.evict_idle();
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::PlayerAction;
    use fore_domain::{Difficulty, GameStatus, PlayerId};

    #[tokio::test]
    async fn in_memory_app_runs_a_game_end_to_end() {
        let app = App::in_memory(EngineSettings::default());
        let alice = PlayerId::new();
        let bob = PlayerId::new();

        let created = app
            .use_cases
            .game
            .create
            .execute(alice, "Alice", false, None)
            .await
            .unwrap();
        let game_id = created.game.id();

        let available = app.use_cases.game.get.available().await.unwrap();
        assert_eq!(available.len(), 1);

        app.use_cases
            .game
            .join
            .execute(game_id, bob, "Bob")
            .await
            .unwrap();
        let rolled = app
            .use_cases
            .game
            .execute
            .execute(game_id, alice, PlayerAction::RollDice)
            .await
            .unwrap();
        assert!(rolled.dice.is_some());

        let game = app.use_cases.game.get.by_id(game_id).await.unwrap();
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(app.use_cases.game.get.available().await.unwrap().is_empty());
        assert_eq!(
            app.use_cases
                .game
                .get
                .active_for_player(bob)
                .await
                .unwrap()
                .len(),
            1
        );

        let log = app
            .repositories
            .game_events
            .list_for_game(game_id)
            .await
            .unwrap();
        assert_eq!(log[0].event_type(), "GAME_CREATED");
        assert_eq!(log[1].event_type(), "PLAYER_JOINED");
        assert_eq!(log[2].event_type(), "GAME_STARTED");
        assert_eq!(log[3].event_type(), "DICE_ROLLED");
        assert!(!app.locks.is_empty());
    }

    #[tokio::test]
    async fn configured_npc_difficulty_reaches_create_game() {
        let settings = EngineSettings {
            default_npc_difficulty: Difficulty::Ruthless,
            ..EngineSettings::default()
        };
        let app = App::in_memory(settings);

        let created = app
            .use_cases
            .game
            .create
            .execute(PlayerId::new(), "Alice", true, None)
            .await
            .unwrap();

        assert_eq!(
            created.game.npc_player().unwrap().difficulty(),
            Some(Difficulty::Ruthless)
        );
    }

    #[tokio::test]
    async fn lock_eviction_task_can_be_aborted() {
        let app = App::in_memory(EngineSettings::default());
        let handle = app.spawn_lock_eviction();
        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());
    }
}
