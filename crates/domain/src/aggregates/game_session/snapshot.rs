//! Persisted form of a game session.
//!
//! The board layout is fixed, so only per-property mutable state is stored.
//! Rebuilding assigns fields in bulk instead of replaying commands, then
//! checks that the pieces still agree with each other.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Board, PlayerState, TradeOffer};
use crate::error::DomainError;
use crate::rules::{MAX_PLAYERS, MAX_TURNS_IN_SAND_TRAP, TOTAL_TILES};
use crate::types::{Difficulty, GameStatus, ImprovementLevel, TurnPhase};
use crate::value_objects::Money;
use crate::{GameId, PlayerId, PropertyId};

use super::GameSession;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub game_id: GameId,
    pub status: GameStatus,
    pub current_player_id: Option<PlayerId>,
    pub turn_phase: TurnPhase,
    pub turn_number: u32,
    pub winner_id: Option<PlayerId>,
    /// Seats in join order
    pub players: Vec<PlayerSnapshot>,
    /// Owned properties only; anything absent is unowned and unimproved
    pub properties: Vec<PropertySnapshot>,
    #[serde(default)]
    pub trade: Option<TradeOffer>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub player_id: PlayerId,
    pub display_name: String,
    pub npc: bool,
    pub difficulty: Option<Difficulty>,
    pub position: u8,
    pub balance: Money,
    pub owned_property_ids: BTreeSet<PropertyId>,
    pub bankrupt: bool,
    pub turns_in_sand_trap: u8,
    pub consecutive_doubles: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySnapshot {
    pub property_id: PropertyId,
    pub owner_id: Option<PlayerId>,
    pub improvement_level: ImprovementLevel,
    pub mortgaged: bool,
}

impl From<&PlayerState> for PlayerSnapshot {
    fn from(player: &PlayerState) -> Self {
        Self {
            player_id: player.player_id(),
            display_name: player.display_name().to_string(),
            npc: player.is_npc(),
            difficulty: player.difficulty(),
            position: player.position(),
            balance: player.balance(),
            owned_property_ids: player.owned_property_ids().clone(),
            bankrupt: player.is_bankrupt(),
            turns_in_sand_trap: player.turns_in_sand_trap(),
            consecutive_doubles: player.consecutive_doubles(),
        }
    }
}

impl PlayerSnapshot {
    fn into_state(self) -> Result<PlayerState, DomainError> {
        if self.position >= TOTAL_TILES {
            return Err(DomainError::validation(format!(
                "Player {} is off the board at position {}",
                self.player_id, self.position
            )));
        }
        if self.balance.is_negative() {
            return Err(DomainError::validation(format!(
                "Player {} has a negative balance",
                self.player_id
            )));
        }
        if self.turns_in_sand_trap > MAX_TURNS_IN_SAND_TRAP {
            return Err(DomainError::validation(format!(
                "Player {} has {} sand trap turns",
                self.player_id, self.turns_in_sand_trap
            )));
        }
        Ok(PlayerState::restore(
            self.player_id,
            self.display_name,
            self.npc,
            self.difficulty,
            self.position,
            self.balance,
            self.owned_property_ids,
            self.bankrupt,
            self.turns_in_sand_trap,
            self.consecutive_doubles,
        ))
    }
}

impl GameSession {
    pub fn to_snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            game_id: self.id,
            status: self.status,
            current_player_id: self.current_player_id,
            turn_phase: self.turn_phase,
            turn_number: self.turn_number,
            winner_id: self.winner_id,
            players: self.players.iter().map(PlayerSnapshot::from).collect(),
            properties: self
                .board
                .properties()
                .filter(|property| property.is_owned())
                .map(|property| PropertySnapshot {
                    property_id: property.id(),
                    owner_id: property.owner_id(),
                    improvement_level: property.improvement_level(),
                    mortgaged: property.is_mortgaged(),
                })
                .collect(),
            trade: self.trade.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Rebuild a session from persisted state without emitting events.
    pub fn reconstitute(snapshot: GameSnapshot) -> Result<Self, DomainError> {
        if snapshot.players.is_empty() || snapshot.players.len() > MAX_PLAYERS {
            return Err(DomainError::validation(format!(
                "Game {} has {} players",
                snapshot.game_id,
                snapshot.players.len()
            )));
        }

        let players = snapshot
            .players
            .into_iter()
            .map(PlayerSnapshot::into_state)
            .collect::<Result<Vec<_>, _>>()?;
        let seated: HashSet<PlayerId> = players.iter().map(PlayerState::player_id).collect();
        if seated.len() != players.len() {
            return Err(DomainError::validation("Duplicate player in snapshot"));
        }
        let ensure_seated = |player_id: PlayerId, role: &str| {
            if seated.contains(&player_id) {
                Ok(())
            } else {
                Err(DomainError::validation(format!(
                    "{} {} is not seated in the game",
                    role, player_id
                )))
            }
        };

        let mut board = Board::standard();
        for state in &snapshot.properties {
            if let Some(owner_id) = state.owner_id {
                ensure_seated(owner_id, "Property owner")?;
            }
            board.property_mut(state.property_id)?.restore(
                state.owner_id,
                state.improvement_level,
                state.mortgaged,
            )?;
        }
        for player in &players {
            let on_board: BTreeSet<PropertyId> = board
                .properties_owned_by(player.player_id())
                .into_iter()
                .map(|property| property.id())
                .collect();
            if &on_board != player.owned_property_ids() {
                return Err(DomainError::validation(format!(
                    "Holdings of player {} disagree with the board",
                    player.player_id()
                )));
            }
        }

        match (snapshot.status, snapshot.current_player_id) {
            (GameStatus::Waiting, _) => {}
            (_, Some(current)) => ensure_seated(current, "Current player")?,
            (status, None) => {
                return Err(DomainError::validation(format!(
                    "{} game has no current player",
                    status
                )))
            }
        }
        match (snapshot.status, snapshot.winner_id) {
            (GameStatus::Completed, Some(winner)) => ensure_seated(winner, "Winner")?,
            (GameStatus::Completed, None) => {
                return Err(DomainError::validation("Completed game has no winner"))
            }
            (_, Some(_)) => {
                return Err(DomainError::validation("Only a completed game has a winner"))
            }
            (_, None) => {}
        }
        if let Some(offer) = &snapshot.trade {
            ensure_seated(offer.offering_player_id(), "Trade proposer")?;
            ensure_seated(offer.receiving_player_id(), "Trade recipient")?;
            if offer.is_pending() && snapshot.turn_phase != TurnPhase::Trade {
                return Err(DomainError::validation(
                    "Pending trade outside the trade phase",
                ));
            }
        }
        let trade_pending = snapshot.trade.as_ref().is_some_and(TradeOffer::is_pending);
        if snapshot.turn_phase == TurnPhase::Trade && !trade_pending {
            return Err(DomainError::validation(
                "Trade phase without a pending trade",
            ));
        }

        Ok(Self {
            id: snapshot.game_id,
            status: snapshot.status,
            current_player_id: snapshot.current_player_id,
            turn_phase: snapshot.turn_phase,
            turn_number: snapshot.turn_number,
            winner_id: snapshot.winner_id,
            board,
            players,
            trade: snapshot.trade,
            created_at: snapshot.created_at,
            updated_at: snapshot.updated_at,
            pending_events: Vec::new(),
        })
    }
}
