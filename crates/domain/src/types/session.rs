//! Session vocabulary: lifecycle status, turn phases, trade status and NPC difficulty.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Lifecycle of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    /// Waiting for the second player to join
    Waiting,
    InProgress,
    /// A winner has been declared
    Completed,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "WAITING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(Self::Waiting),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(DomainError::parse(format!("Unknown game status: {}", s))),
        }
    }
}

/// Sub-state of the current player's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnPhase {
    /// Player must roll
    Roll,
    /// Player may buy, improve, propose a trade or end the turn
    Action,
    /// A trade proposal awaits the receiving player's answer
    Trade,
}

impl TurnPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Roll => "ROLL",
            Self::Action => "ACTION",
            Self::Trade => "TRADE",
        }
    }
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TurnPhase {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROLL" => Ok(Self::Roll),
            "ACTION" => Ok(Self::Action),
            "TRADE" => Ok(Self::Trade),
            _ => Err(DomainError::parse(format!("Unknown turn phase: {}", s))),
        }
    }
}

/// Status of a trade offer. Only `Pending` can transition, and only forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeStatus {
    Pending,
    Accepted,
    Rejected,
    Cancelled,
    Expired,
}

impl TradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
            Self::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "ACCEPTED" => Ok(Self::Accepted),
            "REJECTED" => Ok(Self::Rejected),
            "CANCELLED" => Ok(Self::Cancelled),
            "EXPIRED" => Ok(Self::Expired),
            _ => Err(DomainError::parse(format!("Unknown trade status: {}", s))),
        }
    }
}

/// NPC strength. The rules engine only stores it; decision engines read the
/// tuning values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Ruthless,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
            Self::Ruthless => "RUTHLESS",
        }
    }

    /// Name shown for an NPC opponent of this difficulty.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Easy => "Casual Caddie",
            Self::Medium => "Club Pro",
            Self::Hard => "Tour Veteran",
            Self::Ruthless => "Championship Mind",
        }
    }

    /// How aggressively to acquire and improve, in percent.
    pub fn aggression_pct(&self) -> u8 {
        match self {
            Self::Easy => 20,
            Self::Medium => 50,
            Self::Hard => 70,
            Self::Ruthless => 95,
        }
    }

    /// Likelihood of accepting a trade, in percent.
    pub fn trade_willingness_pct(&self) -> u8 {
        match self {
            Self::Easy => 80,
            Self::Medium => 50,
            Self::Hard => 30,
            Self::Ruthless => 10,
        }
    }

    /// Chance of a deliberately suboptimal move, in percent.
    pub fn mistake_rate_pct(&self) -> u8 {
        match self {
            Self::Easy => 30,
            Self::Medium => 10,
            Self::Hard | Self::Ruthless => 0,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EASY" => Ok(Self::Easy),
            "MEDIUM" => Ok(Self::Medium),
            "HARD" => Ok(Self::Hard),
            "RUTHLESS" => Ok(Self::Ruthless),
            _ => Err(DomainError::parse(format!("Unknown difficulty: {}", s))),
        }
    }
}
