//! Board tile entity.

use crate::error::DomainError;
use crate::types::TileType;
use crate::{PropertyId, TileId};

use super::property::Property;

/// One square of the board.
///
/// A tile carries a property exactly when its type is `TileType::Property`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    id: TileId,
    position: u8,
    tile_type: TileType,
    name: String,
    property: Option<Property>,
}

impl Tile {
    /// Build a tile, checking that a property is attached iff the type is
    /// `Property` and that it sits at the same position.
    pub fn new(
        position: u8,
        tile_type: TileType,
        name: impl Into<String>,
        property: Option<Property>,
    ) -> Result<Self, DomainError> {
        match (tile_type, &property) {
            (TileType::Property, None) => {
                return Err(DomainError::validation(format!(
                    "Property tile at position {} needs a property",
                    position
                )))
            }
            (TileType::Property, Some(property)) if property.position() != position => {
                return Err(DomainError::validation(format!(
                    "Property {} belongs at position {}, not {}",
                    property.name(),
                    property.position(),
                    position
                )))
            }
            (TileType::Property, Some(_)) => {}
            (other, Some(_)) => {
                return Err(DomainError::validation(format!(
                    "{} tile at position {} cannot carry a property",
                    other, position
                )))
            }
            (_, None) => {}
        }

        Ok(Self {
            id: TileId::for_position(position),
            position,
            tile_type,
            name: name.into(),
            property,
        })
    }

    /// Course tile wrapping `property`. The tile takes the property's name and position.
    pub fn course(property: Property) -> Self {
        Self {
            id: TileId::for_position(property.position()),
            position: property.position(),
            tile_type: TileType::Property,
            name: property.name().to_string(),
            property: Some(property),
        }
    }

    /// Non-property tile from the built-in layout.
    pub(crate) fn landmark(position: u8, tile_type: TileType, name: &str) -> Self {
        debug_assert_ne!(tile_type, TileType::Property);
        Self {
            id: TileId::for_position(position),
            position,
            tile_type,
            name: name.to_string(),
            property: None,
        }
    }

    #[inline]
    pub fn id(&self) -> TileId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> u8 {
        self.position
    }

    #[inline]
    pub fn tile_type(&self) -> TileType {
        self.tile_type
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn property(&self) -> Option<&Property> {
        self.property.as_ref()
    }

    pub(crate) fn property_mut(&mut self) -> Option<&mut Property> {
        self.property.as_mut()
    }

    pub fn property_id(&self) -> Option<PropertyId> {
        self.property.as_ref().map(Property::id)
    }

    pub fn is_property(&self) -> bool {
        self.tile_type == TileType::Property
    }

    pub fn is_start_tile(&self) -> bool {
        self.tile_type == TileType::Start
    }

    /// Tiles with no effect on landing.
    pub fn is_safe_tile(&self) -> bool {
        matches!(
            self.tile_type,
            TileType::Start | TileType::SafeLounge | TileType::Shop
        )
    }

    /// Tiles that may charge the visitor (rent or penalty).
    pub fn requires_payment(&self) -> bool {
        matches!(self.tile_type, TileType::Property | TileType::WaterHazard)
    }

    pub fn causes_turn_loss(&self) -> bool {
        self.tile_type == TileType::SandTrap
    }
}
