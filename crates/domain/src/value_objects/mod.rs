//! Value objects - immutable, compared by value

pub mod dice;
pub mod money;

pub use dice::{DiceRoll, DIE_MAX, DIE_MIN};
pub use money::Money;
