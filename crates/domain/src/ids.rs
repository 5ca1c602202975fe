use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn to_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

// Session and participant IDs
define_id!(GameId);
define_id!(PlayerId);

// Board IDs
define_id!(TileId);
define_id!(PropertyId);

// Trade IDs
define_id!(TradeOfferId);

// Event IDs
define_id!(EventId);

// Board ids are derived from the tile position so the static layout
// rebuilt on load carries the same ids a snapshot references.
const TILE_ID_NAMESPACE: u128 = 0x6f72_6500_0000_4000_8000_7469_6c65_0000;
const PROPERTY_ID_NAMESPACE: u128 = 0x6f72_6500_0000_4000_8000_7072_6f70_0000;

impl TileId {
    /// Deterministic id for the tile at `position`.
    pub fn for_position(position: u8) -> Self {
        Self(Uuid::from_u128(TILE_ID_NAMESPACE | u128::from(position)))
    }
}

impl PropertyId {
    /// Deterministic id for the property printed on the tile at `position`.
    pub fn for_position(position: u8) -> Self {
        Self(Uuid::from_u128(PROPERTY_ID_NAMESPACE | u128::from(position)))
    }
}
