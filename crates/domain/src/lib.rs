//! Fore domain - the rules engine for a two-player, golf-themed property trading game
//!
//! Everything here is pure: no I/O, no clock, no random source. Hosts pass in
//! the current time and a die source, then drain the events each command
//! records.
//!
//! # Layout
//!
//! - [`aggregates`] - the `GameSession` aggregate root and its snapshot form
//! - [`entities`] - board, tiles, properties, player seats and trade offers
//! - [`events`] - the closed `GameEvent` vocabulary
//! - [`types`] - vocabulary enums shared with host adapters
//! - [`value_objects`] - `Money` and `DiceRoll`
//! - [`rules`] - tunable game constants

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod rules;
pub mod types;
pub mod value_objects;

pub use aggregates::{GameSession, GameSnapshot, PlayerSnapshot, PropertySnapshot};
pub use entities::{Board, PlayerState, PriceSchedule, Property, Tile, TradeOffer, TradeTerms};
pub use error::DomainError;
pub use events::GameEvent;
pub use ids::{EventId, GameId, PlayerId, PropertyId, TileId, TradeOfferId};
pub use types::{
    CourseGroup, Difficulty, GameStatus, ImprovementLevel, TileType, TradeStatus, TurnPhase,
};
pub use value_objects::{DiceRoll, Money};
