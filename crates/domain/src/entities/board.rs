//! The game board: a fixed ring of tiles.

use std::collections::{BTreeSet, HashMap};

use crate::error::DomainError;
use crate::rules::TOTAL_TILES;
use crate::types::CourseGroup;
use crate::{PlayerId, PropertyId};

use super::course_layout;
use super::property::Property;
use super::tile::Tile;

/// Tiles indexed by position, with a secondary index from property id to position.
///
/// The set of tiles never changes after construction. Only the mutable
/// fields of each `Property` do, and only through the owning session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tiles: Vec<Tile>,
    property_positions: HashMap<PropertyId, u8>,
}

impl Board {
    /// Assemble a board from tiles ordered by position.
    pub fn new(tiles: Vec<Tile>) -> Result<Self, DomainError> {
        if tiles.len() != usize::from(TOTAL_TILES) {
            return Err(DomainError::validation(format!(
                "Board needs exactly {} tiles, got {}",
                TOTAL_TILES,
                tiles.len()
            )));
        }
        if let Some((index, tile)) = tiles
            .iter()
            .enumerate()
            .find(|(index, tile)| usize::from(tile.position()) != *index)
        {
            return Err(DomainError::validation(format!(
                "Tile {} at index {} reports position {}",
                tile.name(),
                index,
                tile.position()
            )));
        }
        Ok(Self::indexed(tiles))
    }

    /// The standard 24-tile course.
    pub fn standard() -> Self {
        Self::indexed(course_layout::standard_tiles())
    }

    fn indexed(tiles: Vec<Tile>) -> Self {
        let property_positions = tiles
            .iter()
            .filter_map(|tile| tile.property_id().map(|id| (id, tile.position())))
            .collect();
        Self {
            tiles,
            property_positions,
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile_at(&self, position: u8) -> Result<&Tile, DomainError> {
        self.tiles
            .get(usize::from(position))
            .ok_or_else(|| invalid_position(position))
    }

    /// Property on the tile at `position`, if that tile is a course tile.
    pub fn property_at(&self, position: u8) -> Result<Option<&Property>, DomainError> {
        self.tile_at(position).map(Tile::property)
    }

    pub fn property(&self, property_id: PropertyId) -> Result<&Property, DomainError> {
        self.property_positions
            .get(&property_id)
            .and_then(|position| self.tiles.get(usize::from(*position)))
            .and_then(Tile::property)
            .ok_or_else(|| DomainError::not_found("Property", property_id))
    }

    pub(crate) fn property_mut(
        &mut self,
        property_id: PropertyId,
    ) -> Result<&mut Property, DomainError> {
        let position = self
            .property_positions
            .get(&property_id)
            .copied()
            .ok_or_else(|| DomainError::not_found("Property", property_id))?;
        self.tiles
            .get_mut(usize::from(position))
            .and_then(Tile::property_mut)
            .ok_or_else(|| DomainError::not_found("Property", property_id))
    }

    /// All properties in board order.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.tiles.iter().filter_map(Tile::property)
    }

    pub fn properties_in_group(&self, group: CourseGroup) -> Vec<&Property> {
        self.properties()
            .filter(|property| property.course_group() == group)
            .collect()
    }

    pub fn properties_owned_by(&self, player_id: PlayerId) -> Vec<&Property> {
        self.properties()
            .filter(|property| property.is_owned_by(player_id))
            .collect()
    }

    pub fn count_owned_in_group(&self, player_id: PlayerId, group: CourseGroup) -> usize {
        self.properties()
            .filter(|property| property.course_group() == group && property.is_owned_by(player_id))
            .count()
    }

    pub fn owns_complete_group(&self, player_id: PlayerId, group: CourseGroup) -> bool {
        let mut members = self
            .properties()
            .filter(|property| property.course_group() == group)
            .peekable();
        members.peek().is_some() && members.all(|property| property.is_owned_by(player_id))
    }

    pub fn complete_groups_owned_by(&self, player_id: PlayerId) -> BTreeSet<CourseGroup> {
        CourseGroup::ALL
            .into_iter()
            .filter(|group| self.owns_complete_group(player_id, *group))
            .collect()
    }

    /// Position after moving `steps` tiles forward, wrapping around the ring.
    pub fn calculate_new_position(&self, current: u8, steps: u8) -> u8 {
        let next = (u16::from(current) + u16::from(steps)) % u16::from(TOTAL_TILES);
        // always < TOTAL_TILES
        next as u8
    }

    /// Whether a move from `old` to `new` wrapped past the start tile.
    ///
    /// A zero-distance move that stays on the start tile also counts; dice
    /// never produce one.
    pub fn passed_start(&self, old: u8, new: u8) -> bool {
        new < old || (old == 0 && new == 0)
    }
}

fn invalid_position(position: u8) -> DomainError {
    DomainError::invalid_action(format!(
        "Invalid board position {}: must be in [0, {})",
        position, TOTAL_TILES
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileType;

    #[test]
    fn standard_board_has_fixed_layout() {
        let board = Board::standard();
        assert_eq!(board.tiles().len(), 24);
        assert_eq!(board.tile_at(0).unwrap().tile_type(), TileType::Start);
        assert_eq!(board.tile_at(4).unwrap().tile_type(), TileType::Shop);
        assert_eq!(board.tile_at(8).unwrap().tile_type(), TileType::SandTrap);
        assert_eq!(board.tile_at(12).unwrap().tile_type(), TileType::SafeLounge);
        assert_eq!(board.tile_at(16).unwrap().tile_type(), TileType::WaterHazard);
        assert_eq!(board.tile_at(20).unwrap().tile_type(), TileType::Shop);
        assert_eq!(board.properties().count(), 18);
    }

    #[test]
    fn tile_lookup_outside_board_fails() {
        let board = Board::standard();
        assert!(board.tile_at(23).is_ok());
        assert!(matches!(
            board.tile_at(24),
            Err(DomainError::InvalidAction(_))
        ));
    }

    #[test]
    fn property_lookup_by_id() {
        let board = Board::standard();
        let property = board.property(PropertyId::for_position(9)).unwrap();
        assert_eq!(property.position(), 9);
        assert_eq!(property.course_group(), CourseGroup::HighlandNine);

        let err = board.property(PropertyId::for_position(8)).unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[test]
    fn every_group_has_three_properties() {
        let board = Board::standard();
        for group in CourseGroup::ALL {
            assert_eq!(
                board.properties_in_group(group).len(),
                CourseGroup::PROPERTIES_PER_GROUP
            );
        }
    }

    #[test]
    fn complete_group_detection() {
        let mut board = Board::standard();
        let player = PlayerId::new();
        for position in [1, 2] {
            board
                .property_mut(PropertyId::for_position(position))
                .unwrap()
                .purchase(player)
                .unwrap();
        }
        assert!(!board.owns_complete_group(player, CourseGroup::LinksNine));
        assert_eq!(board.count_owned_in_group(player, CourseGroup::LinksNine), 2);

        board
            .property_mut(PropertyId::for_position(3))
            .unwrap()
            .purchase(player)
            .unwrap();
        assert!(board.owns_complete_group(player, CourseGroup::LinksNine));
        assert_eq!(
            board.complete_groups_owned_by(player),
            BTreeSet::from([CourseGroup::LinksNine])
        );
        assert_eq!(board.properties_owned_by(player).len(), 3);
    }

    #[test]
    fn movement_wraps_and_detects_start() {
        let board = Board::standard();
        assert_eq!(board.calculate_new_position(20, 7), 3);
        assert!(board.passed_start(20, 3));
        assert_eq!(board.calculate_new_position(3, 5), 8);
        assert!(!board.passed_start(3, 8));
        assert!(board.passed_start(0, 0));
    }

    #[test]
    fn new_rejects_misordered_tiles() {
        let mut tiles = Board::standard().tiles().to_vec();
        tiles.swap(0, 1);
        assert!(Board::new(tiles).is_err());

        let short = Board::standard().tiles()[..23].to_vec();
        assert!(Board::new(short).is_err());
    }
}
