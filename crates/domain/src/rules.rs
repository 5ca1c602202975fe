//! Game rule constants.

use std::num::NonZeroU32;

use crate::value_objects::Money;

pub const STARTING_CURRENCY: Money = Money::of_dollars(1500);

/// Credited when a move wraps past the start tile.
pub const PASSING_SALARY: Money = Money::of_dollars(200);

pub const WATER_HAZARD_PENALTY: Money = Money::of_dollars(50);

pub const TOTAL_TILES: u8 = 24;
pub const START_POSITION: u8 = 0;
pub const SAND_TRAP_POSITION: u8 = 8;

pub const MAX_TURNS_IN_SAND_TRAP: u8 = 3;
pub const DOUBLES_FOR_SAND_TRAP: u8 = 3;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 2;

/// Mortgage value is half the purchase price.
pub const MORTGAGE_RATE: (u32, NonZeroU32) = (1, non_zero(2));

/// Lifting a mortgage costs the mortgage value plus 10%.
pub const UNMORTGAGE_RATE: (u32, NonZeroU32) = (11, non_zero(10));

const fn non_zero(value: u32) -> NonZeroU32 {
    match NonZeroU32::new(value) {
        Some(value) => value,
        None => panic!("rate denominator must be non-zero"),
    }
}
