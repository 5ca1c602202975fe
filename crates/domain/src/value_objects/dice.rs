//! Dice roll value object - a pair of six-sided dice.
//!
//! The domain never draws random numbers itself. Callers inject a die source
//! through [`DiceRoll::roll_with`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub const DIE_MIN: u8 = 1;
pub const DIE_MAX: u8 = 6;

/// Immutable result of rolling two six-sided dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDiceRoll")]
pub struct DiceRoll {
    die1: u8,
    die2: u8,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDiceRoll {
    die1: u8,
    die2: u8,
}

impl TryFrom<RawDiceRoll> for DiceRoll {
    type Error = DomainError;

    fn try_from(raw: RawDiceRoll) -> Result<Self, Self::Error> {
        DiceRoll::new(raw.die1, raw.die2)
    }
}

impl DiceRoll {
    /// Create a roll from two face values, each in `1..=6`.
    pub fn new(die1: u8, die2: u8) -> Result<Self, DomainError> {
        let in_range = |die: u8| (DIE_MIN..=DIE_MAX).contains(&die);
        if !in_range(die1) || !in_range(die2) {
            return Err(DomainError::validation(format!(
                "Dice values must be between {} and {}, got ({}, {})",
                DIE_MIN, DIE_MAX, die1, die2
            )));
        }
        Ok(Self { die1, die2 })
    }

    /// Roll both dice using `die` as the face source.
    ///
    /// `die` is called exactly twice; each value must be in `1..=6`.
    pub fn roll_with(mut die: impl FnMut() -> u8) -> Result<Self, DomainError> {
        let die1 = die();
        let die2 = die();
        Self::new(die1, die2)
    }

    #[inline]
    pub fn die1(&self) -> u8 {
        self.die1
    }

    #[inline]
    pub fn die2(&self) -> u8 {
        self.die2
    }

    #[inline]
    pub fn total(&self) -> u8 {
        self.die1 + self.die2
    }

    #[inline]
    pub fn is_doubles(&self) -> bool {
        self.die1 == self.die2
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {} = {}", self.die1, self.die2, self.total())?;
        if self.is_doubles() {
            write!(f, " (doubles)")?;
        }
        Ok(())
    }
}
