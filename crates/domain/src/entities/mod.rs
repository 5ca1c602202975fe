//! Entities owned by the game session aggregate.

mod board;
mod course_layout;
mod player_state;
mod property;
mod tile;
mod trade_offer;

pub use board::Board;
pub use player_state::PlayerState;
pub use property::{PriceSchedule, Property};
pub use tile::Tile;
pub use trade_offer::{TradeOffer, TradeTerms};
