//! Execute action use case - runs one player command against a game.

use std::sync::Arc;

use fore_domain::value_objects::{DIE_MAX, DIE_MIN};
use fore_domain::{DiceRoll, GameId, GameSession, PlayerId, PropertyId, TradeOffer, TradeTerms};
use serde::{Deserialize, Serialize};

use super::{ActionOutcome, GameStorage, GameUseCaseError};
use crate::infrastructure::ports::RandomPort;
use crate::stores::GameLockStore;

/// A command a seated player can issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "actionType",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum PlayerAction {
    RollDice,
    PurchaseProperty {
        property_id: PropertyId,
    },
    ImproveProperty {
        property_id: PropertyId,
    },
    ProposeTrade {
        receiving_player_id: PlayerId,
        terms: TradeTerms,
    },
    AcceptTrade,
    RejectTrade,
    EndTurn,
}

impl PlayerAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::RollDice => "ROLL_DICE",
            Self::PurchaseProperty { .. } => "PURCHASE_PROPERTY",
            Self::ImproveProperty { .. } => "IMPROVE_PROPERTY",
            Self::ProposeTrade { .. } => "PROPOSE_TRADE",
            Self::AcceptTrade => "ACCEPT_TRADE",
            Self::RejectTrade => "REJECT_TRADE",
            Self::EndTurn => "END_TURN",
        }
    }
}

pub struct ExecuteAction {
    storage: GameStorage,
    locks: Arc<GameLockStore>,
    random: Arc<dyn RandomPort>,
}

impl ExecuteAction {
    pub(crate) fn new(
        storage: GameStorage,
        locks: Arc<GameLockStore>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            storage,
            locks,
            random,
        }
    }

    /// Apply `action` for `player_id`.
    ///
    /// A rejected command stores nothing: the session is only saved after
    /// the domain accepts the command.
    pub async fn execute(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        action: PlayerAction,
    ) -> Result<ActionOutcome, GameUseCaseError> {
        let action_name = action.name();
        tracing::info!(
            game_id = %game_id,
            player_id = %player_id,
            action = action_name,
            "Executing action"
        );

        let _guard = self.locks.acquire(game_id).await;
        let mut game = self.storage.load(game_id).await?;

        let dice = match self.apply(&mut game, player_id, action) {
            Ok(dice) => dice,
            Err(e) => {
                tracing::info!(
                    game_id = %game_id,
                    player_id = %player_id,
                    action = action_name,
                    error = %e,
                    "Action rejected"
                );
                return Err(e);
            }
        };
        let outcome = self.storage.commit(game, dice).await?;

        tracing::info!(
            game_id = %game_id,
            action = action_name,
            events = outcome.events.len(),
            status = %outcome.game.status(),
            phase = %outcome.game.turn_phase(),
            "Action completed"
        );
        Ok(outcome)
    }

    fn apply(
        &self,
        game: &mut GameSession,
        player_id: PlayerId,
        action: PlayerAction,
    ) -> Result<Option<DiceRoll>, GameUseCaseError> {
        match action {
            PlayerAction::RollDice => {
                let random = Arc::clone(&self.random);
                let roll = game.roll_dice(player_id, move || die_face(random.as_ref()))?;
                return Ok(Some(roll));
            }
            PlayerAction::PurchaseProperty { property_id } => {
                game.purchase_property(player_id, property_id)?
            }
            PlayerAction::ImproveProperty { property_id } => {
                game.improve_property(player_id, property_id)?
            }
            PlayerAction::ProposeTrade {
                receiving_player_id,
                terms,
            } => {
                let offer = TradeOffer::new(player_id, receiving_player_id, terms)?;
                game.propose_trade(player_id, offer)?
            }
            PlayerAction::AcceptTrade => game.respond_to_trade(player_id, true)?,
            PlayerAction::RejectTrade => game.respond_to_trade(player_id, false)?,
            PlayerAction::EndTurn => game.end_turn(player_id)?,
        }
        Ok(None)
    }
}

/// One die face. An out-of-range value is passed through for the domain to reject.
fn die_face(random: &dyn RandomPort) -> u8 {
    let face = random.gen_range(i32::from(DIE_MIN), i32::from(DIE_MAX));
    u8::try_from(face).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::{InMemoryGameEventRepo, InMemoryGameRepo};
    use crate::infrastructure::ports::{
        GameEventRepo, GameRepo, MockGameEventRepo, MockGameRepo, MockRandomPort,
    };
    use crate::use_cases::game::test_support::{fixed_now, memory_storage, saved_two_player_game};
    use fore_domain::{DomainError, GameStatus, Money, TurnPhase};
    use std::time::Duration;

    /// Die faces in order, then the last face again.
    fn dice(faces: impl IntoIterator<Item = i32>) -> MockRandomPort {
        let mut faces = faces.into_iter().collect::<Vec<_>>().into_iter();
        let mut last = i32::from(DIE_MIN);
        let mut random = MockRandomPort::new();
        random.expect_gen_range().returning(move |_, _| {
            last = faces.next().unwrap_or(last);
            last
        });
        random
    }

    fn execute_action(storage: GameStorage, faces: impl IntoIterator<Item = i32>) -> ExecuteAction {
        ExecuteAction::new(
            storage,
            Arc::new(GameLockStore::new(Duration::from_secs(60))),
            Arc::new(dice(faces)),
        )
    }

    struct Table {
        use_case: ExecuteAction,
        games: Arc<InMemoryGameRepo>,
        events: Arc<InMemoryGameEventRepo>,
        game_id: GameId,
        alice: PlayerId,
        bob: PlayerId,
    }

    async fn table(faces: impl IntoIterator<Item = i32>) -> Table {
        let (storage, games, events) = memory_storage();
        let (game, alice, bob) = saved_two_player_game(&games).await;
        Table {
            use_case: execute_action(storage, faces),
            games,
            events,
            game_id: game.id(),
            alice,
            bob,
        }
    }

    mod rolling {
        use super::*;

        #[tokio::test]
        async fn roll_uses_random_port_and_reports_dice() {
            let t = table([2, 3]).await;

            let outcome = t
                .use_case
                .execute(t.game_id, t.alice, PlayerAction::RollDice)
                .await
                .unwrap();

            let dice = outcome.dice.unwrap();
            assert_eq!((dice.die1(), dice.die2()), (2, 3));
            assert_eq!(outcome.game.player(t.alice).unwrap().position(), 5);
            assert_eq!(outcome.game.turn_phase(), TurnPhase::Action);
            assert_eq!(outcome.game.updated_at(), fixed_now());

            let types: Vec<_> = outcome.events.iter().map(|e| e.event_type()).collect();
            assert_eq!(types, vec!["DICE_ROLLED", "PLAYER_MOVED"]);
            assert_eq!(outcome.events[0].sequence, 1);
        }

        #[tokio::test]
        async fn die_faces_are_requested_in_range() {
            let (storage, games, _events) = memory_storage();
            let (game, alice, _bob) = saved_two_player_game(&games).await;
            let mut random = MockRandomPort::new();
            random
                .expect_gen_range()
                .with(mockall::predicate::eq(1), mockall::predicate::eq(6))
                .times(2)
                .returning(|_, _| 3);
            let use_case = ExecuteAction::new(
                storage,
                Arc::new(GameLockStore::new(Duration::from_secs(60))),
                Arc::new(random),
            );

            let outcome = use_case
                .execute(game.id(), alice, PlayerAction::RollDice)
                .await
                .unwrap();

            let dice = outcome.dice.unwrap();
            assert!(dice.is_doubles());
            assert_eq!(outcome.game.turn_phase(), TurnPhase::Roll);
        }

        #[tokio::test]
        async fn first_face_drawn_is_the_first_die() {
            let (storage, games, _events) = memory_storage();
            let (game, alice, _bob) = saved_two_player_game(&games).await;
            let mut random = MockRandomPort::new();
            let mut draws = mockall::Sequence::new();
            random
                .expect_gen_range()
                .times(1)
                .in_sequence(&mut draws)
                .returning(|_, _| 6);
            random
                .expect_gen_range()
                .times(1)
                .in_sequence(&mut draws)
                .returning(|_, _| 1);
            let use_case = ExecuteAction::new(
                storage,
                Arc::new(GameLockStore::new(Duration::from_secs(60))),
                Arc::new(random),
            );

            let outcome = use_case
                .execute(game.id(), alice, PlayerAction::RollDice)
                .await
                .unwrap();

            let dice = outcome.dice.unwrap();
            assert_eq!((dice.die1(), dice.die2()), (6, 1));
            assert_eq!(outcome.game.player(alice).unwrap().position(), 7);
        }

        #[tokio::test]
        async fn out_of_turn_roll_is_rejected_and_nothing_is_stored() {
            let t = table([2, 3]).await;
            let before = t.games.get(t.game_id).await.unwrap().unwrap().to_snapshot();

            let err = t
                .use_case
                .execute(t.game_id, t.bob, PlayerAction::RollDice)
                .await
                .unwrap_err();

            assert!(matches!(
                err,
                GameUseCaseError::Domain(DomainError::NotYourTurn { .. })
            ));
            assert!(err.is_recoverable());
            let after = t.games.get(t.game_id).await.unwrap().unwrap().to_snapshot();
            assert_eq!(after, before);
            assert!(t.events.list_for_game(t.game_id).await.unwrap().is_empty());
        }
    }

    mod turns {
        use super::*;

        #[tokio::test]
        async fn buy_then_end_turn_hands_over_to_opponent() {
            // 1 + 2 lands on position 3, a hole
            let t = table([1, 2]).await;
            t.use_case
                .execute(t.game_id, t.alice, PlayerAction::RollDice)
                .await
                .unwrap();

            let bought = t
                .use_case
                .execute(
                    t.game_id,
                    t.alice,
                    PlayerAction::PurchaseProperty {
                        property_id: PropertyId::for_position(3),
                    },
                )
                .await
                .unwrap();
            assert!(bought
                .game
                .player(t.alice)
                .unwrap()
                .owns_property(PropertyId::for_position(3)));

            let ended = t
                .use_case
                .execute(t.game_id, t.alice, PlayerAction::EndTurn)
                .await
                .unwrap();

            assert_eq!(ended.game.current_player_id(), Some(t.bob));
            assert_eq!(ended.game.turn_number(), 2);
            let types: Vec<_> = ended.events.iter().map(|e| e.event_type()).collect();
            assert_eq!(types, vec!["TURN_ENDED", "TURN_STARTED"]);

            let log = t.events.list_for_game(t.game_id).await.unwrap();
            assert_eq!(log.len(), 5);
            assert_eq!(log.last().unwrap().sequence, 5);
        }

        #[tokio::test]
        async fn unknown_game_is_not_found() {
            let t = table([1, 2]).await;

            let err = t
                .use_case
                .execute(GameId::new(), t.alice, PlayerAction::EndTurn)
                .await
                .unwrap_err();

            assert!(matches!(err, GameUseCaseError::GameNotFound(_)));
        }
    }

    mod trading {
        use super::*;

        /// Alice owns position 3 and has ended her roll.
        async fn alice_owns_hole_three() -> Table {
            let t = table([1, 2]).await;
            t.use_case
                .execute(t.game_id, t.alice, PlayerAction::RollDice)
                .await
                .unwrap();
            t.use_case
                .execute(
                    t.game_id,
                    t.alice,
                    PlayerAction::PurchaseProperty {
                        property_id: PropertyId::for_position(3),
                    },
                )
                .await
                .unwrap();
            t
        }

        #[tokio::test]
        async fn accepted_trade_moves_property_and_money() {
            let t = alice_owns_hole_three().await;
            let hole = PropertyId::for_position(3);

            let proposed = t
                .use_case
                .execute(
                    t.game_id,
                    t.alice,
                    PlayerAction::ProposeTrade {
                        receiving_player_id: t.bob,
                        terms: TradeTerms::new()
                            .offer_property(hole)
                            .request_currency(Money::of_dollars(100)),
                    },
                )
                .await
                .unwrap();
            assert_eq!(proposed.game.turn_phase(), TurnPhase::Trade);

            let accepted = t
                .use_case
                .execute(t.game_id, t.bob, PlayerAction::AcceptTrade)
                .await
                .unwrap();

            let game = accepted.game;
            assert!(game.player(t.bob).unwrap().owns_property(hole));
            assert_eq!(game.board().property(hole).unwrap().owner_id(), Some(t.bob));
            assert_eq!(game.player(t.bob).unwrap().balance(), Money::of_dollars(1400));
            assert_eq!(game.turn_phase(), TurnPhase::Action);
            assert_eq!(accepted.events[0].event_type(), "TRADE_ACCEPTED");
        }

        #[tokio::test]
        async fn rejected_trade_changes_no_holdings() {
            let t = alice_owns_hole_three().await;
            let hole = PropertyId::for_position(3);
            t.use_case
                .execute(
                    t.game_id,
                    t.alice,
                    PlayerAction::ProposeTrade {
                        receiving_player_id: t.bob,
                        terms: TradeTerms::new().offer_property(hole),
                    },
                )
                .await
                .unwrap();

            let rejected = t
                .use_case
                .execute(t.game_id, t.bob, PlayerAction::RejectTrade)
                .await
                .unwrap();

            assert!(rejected.game.player(t.alice).unwrap().owns_property(hole));
            assert!(rejected.game.pending_trade().is_none());
            assert_eq!(rejected.events[0].event_type(), "TRADE_REJECTED");
        }

        #[tokio::test]
        async fn negative_currency_is_a_validation_error() {
            let t = alice_owns_hole_three().await;

            let err = t
                .use_case
                .execute(
                    t.game_id,
                    t.alice,
                    PlayerAction::ProposeTrade {
                        receiving_player_id: t.bob,
                        terms: TradeTerms::new().offer_currency(Money::of_dollars(-5)),
                    },
                )
                .await
                .unwrap_err();

            assert!(matches!(
                err,
                GameUseCaseError::Domain(DomainError::Validation(_))
            ));
        }
    }

    mod storage_failures {
        use super::*;

        #[tokio::test]
        async fn repo_error_on_load_is_propagated() {
            let mut games = MockGameRepo::new();
            games
                .expect_get()
                .returning(|_| Err(crate::infrastructure::ports::RepoError::backend("game.get", "down")));
            let mut events = MockGameEventRepo::new();
            events.expect_append().never();
            let storage = GameStorage::new(
                Arc::new(games),
                Arc::new(events),
                Arc::new(crate::infrastructure::clock::FixedClock(fixed_now())),
            );

            let err = execute_action(storage, [1, 2])
                .execute(GameId::new(), PlayerId::new(), PlayerAction::RollDice)
                .await
                .unwrap_err();

            assert!(matches!(err, GameUseCaseError::Repo(_)));
            assert!(!err.is_recoverable());
        }
    }

    #[test]
    fn actions_serialize_with_a_type_tag() {
        let property_id = PropertyId::for_position(1);
        let json = serde_json::to_value(PlayerAction::PurchaseProperty { property_id }).unwrap();

        assert_eq!(json["actionType"], "PURCHASE_PROPERTY");
        assert_eq!(json["propertyId"], property_id.to_string());

        let parsed: PlayerAction =
            serde_json::from_value(serde_json::json!({ "actionType": "END_TURN" })).unwrap();
        assert_eq!(parsed, PlayerAction::EndTurn);
        assert_eq!(parsed.name(), "END_TURN");
    }

    #[tokio::test]
    async fn completed_games_reject_further_actions() {
        let (storage, games, _events) = memory_storage();
        let (game, alice, bob) = saved_two_player_game(&games).await;
        let mut snapshot = game.to_snapshot();
        snapshot.status = GameStatus::Completed;
        snapshot.winner_id = Some(bob);
        games
            .save(&GameSession::reconstitute(snapshot).unwrap())
            .await
            .unwrap();

        let err = execute_action(storage, [1, 2])
            .execute(game.id(), alice, PlayerAction::RollDice)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            GameUseCaseError::Domain(DomainError::InvalidGameStatus { .. })
        ));
    }
}
