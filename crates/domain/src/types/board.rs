//! Board vocabulary: tile kinds, course groups and improvement levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// What happens when a player lands on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TileType {
    /// Purchasable course tile
    Property,
    /// Clubhouse HQ - salary is paid when a move wraps past it
    Start,
    /// Pro shop - reserved for a card draw, currently no effect
    Shop,
    /// Bunker - traps the player for up to three turns
    SandTrap,
    /// Lake - fixed penalty
    WaterHazard,
    /// Members lounge - no effect
    SafeLounge,
}

impl TileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Property => "PROPERTY",
            Self::Start => "START",
            Self::Shop => "SHOP",
            Self::SandTrap => "SAND_TRAP",
            Self::WaterHazard => "WATER_HAZARD",
            Self::SafeLounge => "SAFE_LOUNGE",
        }
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TileType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PROPERTY" => Ok(Self::Property),
            "START" => Ok(Self::Start),
            "SHOP" => Ok(Self::Shop),
            "SAND_TRAP" => Ok(Self::SandTrap),
            "WATER_HAZARD" => Ok(Self::WaterHazard),
            "SAFE_LOUNGE" => Ok(Self::SafeLounge),
            _ => Err(DomainError::parse(format!("Unknown tile type: {}", s))),
        }
    }
}

/// A set of three properties sharing a price tier, cheapest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseGroup {
    LinksNine,
    PrairieNine,
    HighlandNine,
    CoastalNine,
    ChampionshipNine,
    MastersNine,
}

impl CourseGroup {
    /// Every group, in price order.
    pub const ALL: [CourseGroup; 6] = [
        Self::LinksNine,
        Self::PrairieNine,
        Self::HighlandNine,
        Self::CoastalNine,
        Self::ChampionshipNine,
        Self::MastersNine,
    ];

    pub const PROPERTIES_PER_GROUP: usize = 3;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LinksNine => "LINKS_NINE",
            Self::PrairieNine => "PRAIRIE_NINE",
            Self::HighlandNine => "HIGHLAND_NINE",
            Self::CoastalNine => "COASTAL_NINE",
            Self::ChampionshipNine => "CHAMPIONSHIP_NINE",
            Self::MastersNine => "MASTERS_NINE",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::LinksNine => "Links Nine",
            Self::PrairieNine => "Prairie Nine",
            Self::HighlandNine => "Highland Nine",
            Self::CoastalNine => "Coastal Nine",
            Self::ChampionshipNine => "Championship Nine",
            Self::MastersNine => "Masters Nine",
        }
    }

    /// Board colour used by clients.
    pub fn hex_color(&self) -> &'static str {
        match self {
            Self::LinksNine => "#8B4513",
            Self::PrairieNine => "#87CEEB",
            Self::HighlandNine => "#DDA0DD",
            Self::CoastalNine => "#FFA500",
            Self::ChampionshipNine => "#DC143C",
            Self::MastersNine => "#0000CD",
        }
    }
}

impl fmt::Display for CourseGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseGroup {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|group| group.as_str() == s)
            .ok_or_else(|| DomainError::parse(format!("Unknown course group: {}", s)))
    }
}

/// Upgrade tier of a property. Only ever moves forward one step at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImprovementLevel {
    #[default]
    None,
    /// Clubhouse
    Level1,
    /// Resort
    Level2,
}

impl ImprovementLevel {
    pub const MAX: ImprovementLevel = ImprovementLevel::Level2;

    /// Numeric level, used to value improvements at cost.
    pub fn level(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Level1 => 1,
            Self::Level2 => 2,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::None => "Unimproved",
            Self::Level1 => "Clubhouse",
            Self::Level2 => "Resort",
        }
    }

    pub fn can_upgrade(&self) -> bool {
        *self != Self::MAX
    }

    /// The next tier, or `None` at the maximum.
    pub fn next(&self) -> Option<ImprovementLevel> {
        match self {
            Self::None => Some(Self::Level1),
            Self::Level1 => Some(Self::Level2),
            Self::Level2 => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Level1 => "LEVEL1",
            Self::Level2 => "LEVEL2",
        }
    }
}

impl fmt::Display for ImprovementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImprovementLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NONE" => Ok(Self::None),
            "LEVEL1" => Ok(Self::Level1),
            "LEVEL2" => Ok(Self::Level2),
            _ => Err(DomainError::parse(format!("Unknown improvement level: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_improvement_level_progression() {
        assert_eq!(ImprovementLevel::None.next(), Some(ImprovementLevel::Level1));
        assert_eq!(ImprovementLevel::Level1.next(), Some(ImprovementLevel::Level2));
        assert_eq!(ImprovementLevel::Level2.next(), None);
        assert!(!ImprovementLevel::Level2.can_upgrade());
        assert_eq!(ImprovementLevel::Level2.level(), 2);
    }

    #[test]
    fn test_course_group_round_trips_through_str() {
        for group in CourseGroup::ALL {
            assert_eq!(group.as_str().parse::<CourseGroup>().unwrap(), group);
        }
        assert!("BACK_NINE".parse::<CourseGroup>().is_err());
    }

    #[test]
    fn test_serde_names_match_display() {
        let json = serde_json::to_string(&TileType::WaterHazard).unwrap();
        assert_eq!(json, format!("\"{}\"", TileType::WaterHazard));
        let json = serde_json::to_string(&ImprovementLevel::Level1).unwrap();
        assert_eq!(json, "\"LEVEL1\"");
    }
}
