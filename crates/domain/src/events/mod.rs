//! Game Events
//!
//! The closed vocabulary of facts a game session records while executing a
//! command. The session buffers them in order; the host drains the buffer
//! after each command and persists or broadcasts them.

use serde::{Deserialize, Serialize};

use crate::entities::TradeOffer;
use crate::types::ImprovementLevel;
use crate::value_objects::{DiceRoll, Money};
use crate::{PlayerId, PropertyId};

/// Something that happened inside a game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum GameEvent {
    // Lifecycle
    GameCreated {
        creator_id: PlayerId,
        vs_npc: bool,
    },
    GameStarted {
        first_player_id: PlayerId,
    },
    PlayerJoined {
        player_id: PlayerId,
        player_name: String,
    },
    GameEnded {
        winner_id: PlayerId,
        reason: String,
    },

    // Movement
    DiceRolled {
        player_id: PlayerId,
        roll: DiceRoll,
    },
    PlayerMoved {
        player_id: PlayerId,
        from_position: u8,
        to_position: u8,
        passed_start: bool,
    },
    SalaryCollected {
        player_id: PlayerId,
        amount: Money,
    },
    PlayerSentToSandTrap {
        player_id: PlayerId,
    },

    // Holdings
    PropertyPurchased {
        player_id: PlayerId,
        property_id: PropertyId,
        property_name: String,
        price: Money,
    },
    PropertyImproved {
        player_id: PlayerId,
        property_id: PropertyId,
        property_name: String,
        previous_level: ImprovementLevel,
        new_level: ImprovementLevel,
        cost: Money,
    },

    // Payments
    RentPaid {
        payer_id: PlayerId,
        receiver_id: PlayerId,
        property_id: PropertyId,
        amount: Money,
    },
    PenaltyPaid {
        player_id: PlayerId,
        amount: Money,
        reason: String,
    },
    PlayerBankrupt {
        player_id: PlayerId,
        creditor_id: PlayerId,
    },

    // Trading
    TradeProposed {
        offer: TradeOffer,
    },
    TradeAccepted {
        offer: TradeOffer,
    },
    TradeRejected {
        offer: TradeOffer,
    },

    // Turns
    TurnEnded {
        player_id: PlayerId,
        turn_number: u32,
    },
    TurnStarted {
        player_id: PlayerId,
        turn_number: u32,
    },
}

impl GameEvent {
    /// Wire name of the event, matching the serialized `type` tag.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::GameCreated { .. } => "GAME_CREATED",
            Self::GameStarted { .. } => "GAME_STARTED",
            Self::PlayerJoined { .. } => "PLAYER_JOINED",
            Self::GameEnded { .. } => "GAME_ENDED",
            Self::DiceRolled { .. } => "DICE_ROLLED",
            Self::PlayerMoved { .. } => "PLAYER_MOVED",
            Self::SalaryCollected { .. } => "SALARY_COLLECTED",
            Self::PlayerSentToSandTrap { .. } => "PLAYER_SENT_TO_SAND_TRAP",
            Self::PropertyPurchased { .. } => "PROPERTY_PURCHASED",
            Self::PropertyImproved { .. } => "PROPERTY_IMPROVED",
            Self::RentPaid { .. } => "RENT_PAID",
            Self::PenaltyPaid { .. } => "PENALTY_PAID",
            Self::PlayerBankrupt { .. } => "PLAYER_BANKRUPT",
            Self::TradeProposed { .. } => "TRADE_PROPOSED",
            Self::TradeAccepted { .. } => "TRADE_ACCEPTED",
            Self::TradeRejected { .. } => "TRADE_REJECTED",
            Self::TurnEnded { .. } => "TURN_ENDED",
            Self::TurnStarted { .. } => "TURN_STARTED",
        }
    }

    /// The player the event is primarily about, if any.
    pub fn player_id(&self) -> Option<PlayerId> {
        match self {
            Self::GameCreated { creator_id, .. } => Some(*creator_id),
            Self::GameStarted { first_player_id } => Some(*first_player_id),
            Self::GameEnded { winner_id, .. } => Some(*winner_id),
            Self::RentPaid { payer_id, .. } => Some(*payer_id),
            Self::TradeProposed { offer }
            | Self::TradeAccepted { offer }
            | Self::TradeRejected { offer } => Some(offer.offering_player_id()),
            Self::PlayerJoined { player_id, .. }
            | Self::DiceRolled { player_id, .. }
            | Self::PlayerMoved { player_id, .. }
            | Self::SalaryCollected { player_id, .. }
            | Self::PlayerSentToSandTrap { player_id }
            | Self::PropertyPurchased { player_id, .. }
            | Self::PropertyImproved { player_id, .. }
            | Self::PenaltyPaid { player_id, .. }
            | Self::PlayerBankrupt { player_id, .. }
            | Self::TurnEnded { player_id, .. }
            | Self::TurnStarted { player_id, .. } => Some(*player_id),
        }
    }
}
