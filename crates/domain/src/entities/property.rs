//! Property entity - a purchasable course tile's economic state.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::rules::{MORTGAGE_RATE, UNMORTGAGE_RATE};
use crate::types::{CourseGroup, ImprovementLevel};
use crate::value_objects::Money;
use crate::{PlayerId, PropertyId};

/// Fixed monetary tiers of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSchedule {
    pub purchase_price: Money,
    pub base_rent: Money,
    /// Rent with a clubhouse (level 1)
    pub rent_level1: Money,
    /// Rent with a resort (level 2)
    pub rent_level2: Money,
    pub improvement_cost: Money,
}

impl PriceSchedule {
    /// Build a schedule from whole-dollar amounts.
    pub const fn of_dollars(
        purchase_price: i64,
        base_rent: i64,
        rent_level1: i64,
        rent_level2: i64,
        improvement_cost: i64,
    ) -> Self {
        Self {
            purchase_price: Money::of_dollars(purchase_price),
            base_rent: Money::of_dollars(base_rent),
            rent_level1: Money::of_dollars(rent_level1),
            rent_level2: Money::of_dollars(rent_level2),
            improvement_cost: Money::of_dollars(improvement_cost),
        }
    }
}

/// A purchasable property.
///
/// # Invariants
///
/// - A mortgaged property is never improved, and an improved property is
///   never mortgaged.
/// - The improvement level only moves forward, one step per `improve()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    id: PropertyId,
    name: String,
    course_group: CourseGroup,
    position: u8,
    prices: PriceSchedule,

    owner_id: Option<PlayerId>,
    improvement_level: ImprovementLevel,
    mortgaged: bool,
}

impl Property {
    /// Create an unowned, unimproved property. Its id is derived from `position`.
    pub fn new(
        position: u8,
        name: impl Into<String>,
        course_group: CourseGroup,
        prices: PriceSchedule,
    ) -> Self {
        Self {
            id: PropertyId::for_position(position),
            name: name.into(),
            course_group,
            position,
            prices,
            owner_id: None,
            improvement_level: ImprovementLevel::None,
            mortgaged: false,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> PropertyId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn course_group(&self) -> CourseGroup {
        self.course_group
    }

    /// Board position of the tile this property sits on.
    #[inline]
    pub fn position(&self) -> u8 {
        self.position
    }

    #[inline]
    pub fn prices(&self) -> &PriceSchedule {
        &self.prices
    }

    #[inline]
    pub fn purchase_price(&self) -> Money {
        self.prices.purchase_price
    }

    #[inline]
    pub fn improvement_cost(&self) -> Money {
        self.prices.improvement_cost
    }

    #[inline]
    pub fn owner_id(&self) -> Option<PlayerId> {
        self.owner_id
    }

    #[inline]
    pub fn improvement_level(&self) -> ImprovementLevel {
        self.improvement_level
    }

    #[inline]
    pub fn is_mortgaged(&self) -> bool {
        self.mortgaged
    }

    pub fn is_owned(&self) -> bool {
        self.owner_id.is_some()
    }

    pub fn is_owned_by(&self, player_id: PlayerId) -> bool {
        self.owner_id == Some(player_id)
    }

    pub fn can_be_improved(&self) -> bool {
        !self.mortgaged && self.improvement_level.can_upgrade()
    }

    pub fn mortgage_value(&self) -> Money {
        let (numerator, denominator) = MORTGAGE_RATE;
        self.prices.purchase_price.multiply_fraction(numerator, denominator)
    }

    pub fn unmortgage_cost(&self) -> Money {
        let (numerator, denominator) = UNMORTGAGE_RATE;
        self.mortgage_value().multiply_fraction(numerator, denominator)
    }

    /// Rent owed by a visitor.
    ///
    /// Zero while mortgaged. An unimproved property in a complete group
    /// charges double base rent; improvements replace the group bonus.
    pub fn calculate_rent(&self, owner_has_complete_group: bool) -> Money {
        if self.mortgaged {
            return Money::zero();
        }

        let rent = match self.improvement_level {
            ImprovementLevel::None => self.prices.base_rent,
            ImprovementLevel::Level1 => self.prices.rent_level1,
            ImprovementLevel::Level2 => self.prices.rent_level2,
        };

        if owner_has_complete_group && self.improvement_level == ImprovementLevel::None {
            rent * 2
        } else {
            rent
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Take ownership of an unowned property.
    pub fn purchase(&mut self, owner_id: PlayerId) -> Result<(), DomainError> {
        if self.is_owned() {
            return Err(DomainError::invalid_action(format!(
                "Property {} is already owned",
                self.name
            )));
        }
        self.owner_id = Some(owner_id);
        Ok(())
    }

    /// Reassign ownership regardless of the current owner (trades, bankruptcy).
    pub fn transfer_to(&mut self, owner_id: PlayerId) {
        self.owner_id = Some(owner_id);
    }

    pub fn improve(&mut self) -> Result<ImprovementLevel, DomainError> {
        if self.mortgaged {
            return Err(DomainError::invalid_action(format!(
                "Cannot improve mortgaged property {}",
                self.name
            )));
        }
        let next = self.improvement_level.next().ok_or_else(|| {
            DomainError::invalid_action(format!(
                "Property {} is already at maximum improvement",
                self.name
            ))
        })?;
        self.improvement_level = next;
        Ok(next)
    }

    pub fn mortgage(&mut self) -> Result<(), DomainError> {
        if self.mortgaged {
            return Err(DomainError::invalid_action(format!(
                "Property {} is already mortgaged",
                self.name
            )));
        }
        if self.improvement_level != ImprovementLevel::None {
            return Err(DomainError::invalid_action(format!(
                "Must sell improvements before mortgaging {}",
                self.name
            )));
        }
        self.mortgaged = true;
        Ok(())
    }

    pub fn unmortgage(&mut self) -> Result<(), DomainError> {
        if !self.mortgaged {
            return Err(DomainError::invalid_action(format!(
                "Property {} is not mortgaged",
                self.name
            )));
        }
        self.mortgaged = false;
        Ok(())
    }

    /// Bulk-assign mutable state when rebuilding from a snapshot.
    pub(crate) fn restore(
        &mut self,
        owner_id: Option<PlayerId>,
        improvement_level: ImprovementLevel,
        mortgaged: bool,
    ) -> Result<(), DomainError> {
        if mortgaged && improvement_level != ImprovementLevel::None {
            return Err(DomainError::validation(format!(
                "Property {} cannot be both mortgaged and improved",
                self.name
            )));
        }
        if owner_id.is_none() && (mortgaged || improvement_level != ImprovementLevel::None) {
            return Err(DomainError::validation(format!(
                "Unowned property {} cannot carry improvements or a mortgage",
                self.name
            )));
        }
        self.owner_id = owner_id;
        self.improvement_level = improvement_level;
        self.mortgaged = mortgaged;
        Ok(())
    }
}
