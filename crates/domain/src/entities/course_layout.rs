//! The standard course layout.
//!
//! Corners and mid-sides hold the special tiles; each side between them
//! holds one group of three holes, priced upward around the board.

use crate::types::{CourseGroup, TileType};

use super::property::{PriceSchedule, Property};
use super::tile::Tile;

use CourseGroup::*;
use Slot::{Hole, Landmark};

enum Slot {
    Landmark(TileType, &'static str),
    Hole(&'static str, CourseGroup, PriceSchedule),
}

const fn hole(
    name: &'static str,
    group: CourseGroup,
    price: i64,
    base_rent: i64,
    rent_level1: i64,
    rent_level2: i64,
    improvement_cost: i64,
) -> Slot {
    Hole(
        name,
        group,
        PriceSchedule::of_dollars(price, base_rent, rent_level1, rent_level2, improvement_cost),
    )
}

const LAYOUT: [Slot; 24] = [
    Landmark(TileType::Start, "Fairway Start"),
    hole("Dunes End Hole 1", LinksNine, 60, 2, 10, 30, 50),
    hole("Dunes End Hole 2", LinksNine, 60, 4, 20, 60, 50),
    hole("Dunes End Hole 3", LinksNine, 80, 6, 30, 90, 50),
    Landmark(TileType::Shop, "Pro Shop"),
    hole("Meadow Creek Hole 4", PrairieNine, 100, 8, 40, 120, 50),
    hole("Meadow Creek Hole 5", PrairieNine, 100, 8, 40, 120, 50),
    hole("Meadow Creek Hole 6", PrairieNine, 120, 10, 50, 150, 50),
    Landmark(TileType::SandTrap, "Bunker Beach"),
    hole("Eagle Ridge Hole 7", HighlandNine, 140, 12, 60, 180, 100),
    hole("Eagle Ridge Hole 8", HighlandNine, 140, 12, 60, 180, 100),
    hole("Eagle Ridge Hole 9", HighlandNine, 160, 14, 70, 210, 100),
    Landmark(TileType::SafeLounge, "Members Lounge"),
    hole("Oceanview Hole 10", CoastalNine, 180, 16, 80, 240, 100),
    hole("Oceanview Hole 11", CoastalNine, 180, 16, 80, 240, 100),
    hole("Oceanview Hole 12", CoastalNine, 200, 18, 90, 270, 100),
    Landmark(TileType::WaterHazard, "Lake Penalty"),
    hole("Champion Oaks Hole 13", ChampionshipNine, 220, 20, 100, 300, 150),
    hole("Champion Oaks Hole 14", ChampionshipNine, 220, 20, 100, 300, 150),
    hole("Champion Oaks Hole 15", ChampionshipNine, 240, 22, 110, 330, 150),
    Landmark(TileType::Shop, "Tournament Pro Shop"),
    hole("Grand Pines Hole 16", MastersNine, 260, 24, 120, 360, 200),
    hole("Grand Pines Hole 17", MastersNine, 280, 26, 130, 390, 200),
    hole("Grand Pines Hole 18", MastersNine, 300, 30, 150, 450, 200),
];

/// Fresh, unowned tiles in position order.
pub(crate) fn standard_tiles() -> Vec<Tile> {
    LAYOUT
        .iter()
        .zip(0u8..)
        .map(|(slot, position)| match slot {
            Landmark(tile_type, name) => Tile::landmark(position, *tile_type, name),
            Hole(name, group, prices) => {
                Tile::course(Property::new(position, *name, *group, *prices))
            }
        })
        .collect()
}
