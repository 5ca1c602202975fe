//! GameSession aggregate - one two-player match from waiting room to winner
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: every piece of state is reachable only through
//!   accessors; mutation happens exclusively through command methods
//! - **Single store**: the board owns every `Property`. Players and trade
//!   offers refer to properties by id only
//! - **Validate, then apply**: a command checks all of its preconditions
//!   before the first write, so a rejected command leaves the session as it was
//! - **Buffered events**: commands append `GameEvent`s which the host drains
//!   with [`GameSession::drain_events`]
//!
//! Commands are split by concern: `turn` (rolling, movement, tile effects,
//! ending turns), `holdings` (buying and improving) and `trading`.

mod holdings;
mod snapshot;
mod trading;
mod turn;


pub use snapshot::{GameSnapshot, PlayerSnapshot, PropertySnapshot};

use chrono::{DateTime, Utc};

use crate::entities::{Board, PlayerState, TradeOffer};
use crate::error::DomainError;
use crate::events::GameEvent;
use crate::rules::{MAX_PLAYERS, STARTING_CURRENCY};
use crate::types::{Difficulty, GameStatus, TurnPhase};
use crate::{GameId, PlayerId};

/// A single game between two players.
///
/// # Invariants
///
/// - `current_player_id` is set whenever the game is not `Waiting`
/// - `winner_id` is set exactly when the game is `Completed`
/// - at most one trade offer is pending, and only during the `Trade` phase
/// - a player's owned ids match the board's owner fields one to one
#[derive(Debug, Clone)]
pub struct GameSession {
    // Identity
    id: GameId,

    // Turn state
    status: GameStatus,
    current_player_id: Option<PlayerId>,
    turn_phase: TurnPhase,
    turn_number: u32,
    winner_id: Option<PlayerId>,

    // Table
    board: Board,
    /// Seats in join order
    players: Vec<PlayerState>,
    /// The most recent offer. Only meaningful to play while still pending.
    trade: Option<TradeOffer>,

    // Timestamps
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,

    pending_events: Vec<GameEvent>,
}

impl GameSession {
    // =========================================================================
    // Factory
    // =========================================================================

    /// Open a new game with the creator seated first.
    ///
    /// Against an NPC the opponent is seated at once and the game starts with
    /// the creator to roll. Otherwise the game waits for a second player.
    pub fn create(
        creator_id: PlayerId,
        creator_name: impl Into<String>,
        vs_npc: bool,
        difficulty: Option<Difficulty>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut session = Self {
            id: GameId::new(),
            status: GameStatus::Waiting,
            current_player_id: None,
            turn_phase: TurnPhase::Roll,
            turn_number: 0,
            winner_id: None,
            board: Board::standard(),
            players: vec![PlayerState::human(creator_id, creator_name, STARTING_CURRENCY)],
            trade: None,
            created_at: now,
            updated_at: now,
            pending_events: Vec::new(),
        };
        session.record(GameEvent::GameCreated { creator_id, vs_npc });

        if vs_npc {
            let difficulty = difficulty.unwrap_or_default();
            session
                .players
                .push(PlayerState::npc(PlayerId::new(), difficulty, STARTING_CURRENCY));
            session.start();
        }
        session
    }

    /// Seat a second human and start the game.
    pub fn join(
        &mut self,
        player_id: PlayerId,
        display_name: impl Into<String>,
    ) -> Result<(), DomainError> {
        self.ensure_status(GameStatus::Waiting)?;
        if self.players.len() >= MAX_PLAYERS {
            return Err(DomainError::invalid_action("Game is full"));
        }
        if self.has_player(player_id) {
            return Err(DomainError::invalid_action(format!(
                "Player {} has already joined",
                player_id
            )));
        }

        let player = PlayerState::human(player_id, display_name, STARTING_CURRENCY);
        let player_name = player.display_name().to_string();
        self.players.push(player);
        self.record(GameEvent::PlayerJoined {
            player_id,
            player_name,
        });
        self.start();
        Ok(())
    }

    fn start(&mut self) {
        let Some(first_player_id) = self.players.first().map(PlayerState::player_id) else {
            return;
        };
        self.status = GameStatus::InProgress;
        self.current_player_id = Some(first_player_id);
        self.turn_phase = TurnPhase::Roll;
        self.turn_number = 1;
        self.record(GameEvent::GameStarted { first_player_id });
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> GameId {
        self.id
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn current_player_id(&self) -> Option<PlayerId> {
        self.current_player_id
    }

    #[inline]
    pub fn turn_phase(&self) -> TurnPhase {
        self.turn_phase
    }

    #[inline]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[inline]
    pub fn winner_id(&self) -> Option<PlayerId> {
        self.winner_id
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Seats in join order.
    #[inline]
    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn player(&self, player_id: PlayerId) -> Result<&PlayerState, DomainError> {
        self.players
            .iter()
            .find(|player| player.player_id() == player_id)
            .ok_or_else(|| DomainError::not_found("Player", player_id))
    }

    pub fn has_player(&self, player_id: PlayerId) -> bool {
        self.players.iter().any(|player| player.player_id() == player_id)
    }

    pub fn current_player(&self) -> Option<&PlayerState> {
        self.current_player_id
            .and_then(|player_id| self.player(player_id).ok())
    }

    pub fn active_players(&self) -> impl Iterator<Item = &PlayerState> {
        self.players.iter().filter(|player| !player.is_bankrupt())
    }

    pub fn npc_player(&self) -> Option<&PlayerState> {
        self.players.iter().find(|player| player.is_npc())
    }

    pub fn opponent_of(&self, player_id: PlayerId) -> Option<&PlayerState> {
        self.players
            .iter()
            .find(|player| player.player_id() != player_id)
    }

    pub fn is_player_turn(&self, player_id: PlayerId) -> bool {
        self.current_player_id == Some(player_id)
    }

    pub fn is_current_player_npc(&self) -> bool {
        self.current_player().is_some_and(PlayerState::is_npc)
    }

    /// The open trade offer, if one awaits an answer.
    pub fn pending_trade(&self) -> Option<&TradeOffer> {
        self.trade.as_ref().filter(|offer| offer.is_pending())
    }

    /// The most recent trade offer in whatever state it ended.
    pub fn last_trade(&self) -> Option<&TradeOffer> {
        self.trade.as_ref()
    }

    // =========================================================================
    // Events & bookkeeping
    // =========================================================================

    /// Events recorded since the last drain, oldest first.
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.pending_events
    }

    /// Take every buffered event, leaving the buffer empty.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Stamp the last-modified time. Hosts call this after a successful command.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn record(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    // =========================================================================
    // Guards
    // =========================================================================

    fn ensure_status(&self, expected: GameStatus) -> Result<(), DomainError> {
        if self.status != expected {
            return Err(DomainError::InvalidGameStatus {
                expected,
                actual: self.status,
            });
        }
        Ok(())
    }

    fn ensure_phase(&self, expected: TurnPhase) -> Result<(), DomainError> {
        if self.turn_phase != expected {
            return Err(DomainError::InvalidTurnPhase {
                expected,
                actual: self.turn_phase,
            });
        }
        Ok(())
    }

    fn ensure_current_player(&self, player_id: PlayerId) -> Result<(), DomainError> {
        match self.current_player_id {
            Some(current) if current == player_id => Ok(()),
            Some(current) => Err(DomainError::NotYourTurn {
                current,
                attempted: player_id,
            }),
            None => Err(DomainError::invariant("Game in progress without a current player")),
        }
    }

    /// Status, then turn ownership, then phase.
    fn ensure_turn(&self, player_id: PlayerId, phase: TurnPhase) -> Result<(), DomainError> {
        self.ensure_status(GameStatus::InProgress)?;
        self.ensure_current_player(player_id)?;
        self.ensure_phase(phase)
    }

    /// A bankrupt player may only end the turn.
    fn ensure_solvent(&self, player_id: PlayerId) -> Result<&PlayerState, DomainError> {
        let player = self.player(player_id)?;
        if player.is_bankrupt() {
            return Err(DomainError::invalid_action(format!(
                "{} is bankrupt",
                player.display_name()
            )));
        }
        Ok(player)
    }

    fn player_mut(&mut self, player_id: PlayerId) -> Result<&mut PlayerState, DomainError> {
        self.players
            .iter_mut()
            .find(|player| player.player_id() == player_id)
            .ok_or_else(|| DomainError::not_found("Player", player_id))
    }
}
