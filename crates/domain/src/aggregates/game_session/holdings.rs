//! Buying and improving properties.

use crate::error::DomainError;
use crate::events::GameEvent;
use crate::types::TurnPhase;
use crate::{PlayerId, PropertyId};

use super::GameSession;

impl GameSession {
    /// Buy the unowned property the current player is standing on.
    pub fn purchase_property(
        &mut self,
        player_id: PlayerId,
        property_id: PropertyId,
    ) -> Result<(), DomainError> {
        self.ensure_turn(player_id, TurnPhase::Action)?;
        let player = self.ensure_solvent(player_id)?;
        let property = self.board.property(property_id)?;

        if property.is_owned() {
            return Err(DomainError::invalid_action(format!(
                "{} is already owned",
                property.name()
            )));
        }
        if property.position() != player.position() {
            return Err(DomainError::invalid_action(format!(
                "Must be standing on {} to buy it",
                property.name()
            )));
        }
        let price = property.purchase_price();
        if !player.can_afford(price) {
            return Err(DomainError::insufficient_funds(price, player.balance()));
        }
        let property_name = property.name().to_string();

        self.player_mut(player_id)?.subtract_currency(price)?;
        self.board.property_mut(property_id)?.purchase(player_id)?;
        self.player_mut(player_id)?.add_property(property_id);
        self.record(GameEvent::PropertyPurchased {
            player_id,
            property_id,
            property_name,
            price,
        });
        Ok(())
    }

    /// Raise an owned property one level. The owner must hold its whole group.
    pub fn improve_property(
        &mut self,
        player_id: PlayerId,
        property_id: PropertyId,
    ) -> Result<(), DomainError> {
        self.ensure_turn(player_id, TurnPhase::Action)?;
        let player = self.ensure_solvent(player_id)?;
        let property = self.board.property(property_id)?;

        if !property.is_owned_by(player_id) || !player.owns_property(property_id) {
            return Err(DomainError::invalid_action(format!(
                "{} does not own {}",
                player.display_name(),
                property.name()
            )));
        }
        if !property.can_be_improved() {
            return Err(DomainError::invalid_action(format!(
                "{} cannot be improved further",
                property.name()
            )));
        }
        if !self
            .board
            .owns_complete_group(player_id, property.course_group())
        {
            return Err(DomainError::invalid_action(format!(
                "Must own all of {} to improve {}",
                property.course_group().display_name(),
                property.name()
            )));
        }
        let cost = property.improvement_cost();
        if !player.can_afford(cost) {
            return Err(DomainError::insufficient_funds(cost, player.balance()));
        }
        let property_name = property.name().to_string();
        let previous_level = property.improvement_level();

        self.player_mut(player_id)?.subtract_currency(cost)?;
        let new_level = self.board.property_mut(property_id)?.improve()?;
        self.record(GameEvent::PropertyImproved {
            player_id,
            property_id,
            property_name,
            previous_level,
            new_level,
            cost,
        });
        Ok(())
    }
}
