//! Player-to-player trades.
//!
//! The current player proposes during `Action`, which moves the turn into
//! `Trade` until the receiving player answers.

use crate::entities::TradeOffer;
use crate::error::DomainError;
use crate::events::GameEvent;
use crate::types::{GameStatus, TurnPhase};
use crate::{PlayerId, PropertyId};

use super::GameSession;

impl GameSession {
    pub fn propose_trade(
        &mut self,
        player_id: PlayerId,
        offer: TradeOffer,
    ) -> Result<(), DomainError> {
        self.ensure_status(GameStatus::InProgress)?;
        self.ensure_current_player(player_id)?;
        // reported ahead of the phase check, which a pending trade would also trip
        if self.pending_trade().is_some() {
            return Err(DomainError::invalid_action("A trade is already pending"));
        }
        self.ensure_phase(TurnPhase::Action)?;
        self.ensure_solvent(player_id)?;

        if offer.offering_player_id() != player_id {
            return Err(DomainError::invalid_action(
                "Trades must be proposed by the offering player",
            ));
        }
        if !offer.is_pending() {
            return Err(DomainError::invalid_action(format!(
                "Cannot propose a trade that is already {}",
                offer.status()
            )));
        }
        if offer.receiving_player_id() == player_id {
            return Err(DomainError::invalid_action("Cannot trade with yourself"));
        }
        let receiver = self.player(offer.receiving_player_id())?;
        if receiver.is_bankrupt() {
            return Err(DomainError::invalid_action(format!(
                "{} is bankrupt",
                receiver.display_name()
            )));
        }
        self.ensure_holdings(&offer)?;

        self.trade = Some(offer.clone());
        self.turn_phase = TurnPhase::Trade;
        self.record(GameEvent::TradeProposed { offer });
        Ok(())
    }

    /// Answer the pending offer. Only its receiving player may respond.
    ///
    /// Accepting re-checks both sides' holdings and funds before anything
    /// changes hands; a failed check leaves the offer pending.
    pub fn respond_to_trade(
        &mut self,
        player_id: PlayerId,
        accept: bool,
    ) -> Result<(), DomainError> {
        self.ensure_status(GameStatus::InProgress)?;
        self.ensure_phase(TurnPhase::Trade)?;
        let offer = self
            .pending_trade()
            .cloned()
            .ok_or_else(|| DomainError::invalid_action("No trade is pending"))?;
        if offer.receiving_player_id() != player_id {
            return Err(DomainError::invalid_action(
                "Only the receiving player can respond to a trade",
            ));
        }

        let resolved = if accept {
            self.ensure_holdings(&offer)?;
            self.ensure_trade_funds(&offer)?;
            let accepted = offer.accept()?;
            self.execute_trade(&accepted)?;
            accepted
        } else {
            offer.reject()?
        };

        self.trade = Some(resolved.clone());
        self.turn_phase = TurnPhase::Action;
        self.record(if accept {
            GameEvent::TradeAccepted { offer: resolved }
        } else {
            GameEvent::TradeRejected { offer: resolved }
        });
        Ok(())
    }

    /// Each side must own what it puts on the table.
    fn ensure_holdings(&self, offer: &TradeOffer) -> Result<(), DomainError> {
        self.ensure_owns_all(offer.offering_player_id(), offer.offered_property_ids())?;
        self.ensure_owns_all(offer.receiving_player_id(), offer.requested_property_ids())
    }

    fn ensure_owns_all<'a>(
        &self,
        player_id: PlayerId,
        property_ids: impl IntoIterator<Item = &'a PropertyId>,
    ) -> Result<(), DomainError> {
        let player = self.player(player_id)?;
        for property_id in property_ids {
            let property = self.board.property(*property_id)?;
            if !player.owns_property(*property_id) || !property.is_owned_by(player_id) {
                return Err(DomainError::invalid_action(format!(
                    "{} does not own {}",
                    player.display_name(),
                    property.name()
                )));
            }
        }
        Ok(())
    }

    fn ensure_trade_funds(&self, offer: &TradeOffer) -> Result<(), DomainError> {
        let offering = self.player(offer.offering_player_id())?;
        if !offering.can_afford(offer.offered_currency()) {
            return Err(DomainError::insufficient_funds(
                offer.offered_currency(),
                offering.balance(),
            ));
        }
        let receiving = self.player(offer.receiving_player_id())?;
        if !receiving.can_afford(offer.requested_currency()) {
            return Err(DomainError::insufficient_funds(
                offer.requested_currency(),
                receiving.balance(),
            ));
        }
        Ok(())
    }

    fn execute_trade(&mut self, offer: &TradeOffer) -> Result<(), DomainError> {
        let offering_id = offer.offering_player_id();
        let receiving_id = offer.receiving_player_id();

        for property_id in offer.offered_property_ids() {
            self.move_property(*property_id, offering_id, receiving_id)?;
        }
        for property_id in offer.requested_property_ids() {
            self.move_property(*property_id, receiving_id, offering_id)?;
        }

        let offered = offer.offered_currency();
        if offered.is_positive() {
            self.player_mut(offering_id)?.subtract_currency(offered)?;
            self.player_mut(receiving_id)?.add_currency(offered);
        }
        let requested = offer.requested_currency();
        if requested.is_positive() {
            self.player_mut(receiving_id)?.subtract_currency(requested)?;
            self.player_mut(offering_id)?.add_currency(requested);
        }
        Ok(())
    }

    fn move_property(
        &mut self,
        property_id: PropertyId,
        from: PlayerId,
        to: PlayerId,
    ) -> Result<(), DomainError> {
        self.board.property_mut(property_id)?.transfer_to(to);
        self.player_mut(from)?.remove_property(property_id);
        self.player_mut(to)?.add_property(property_id);
        Ok(())
    }
}
