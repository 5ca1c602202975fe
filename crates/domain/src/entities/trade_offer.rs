//! Trade offer value.
//!
//! An offer is immutable. Resolving it produces a new offer with the final
//! status, so the original pending value can still be compared or logged.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::types::TradeStatus;
use crate::value_objects::Money;
use crate::{PlayerId, PropertyId, TradeOfferId};

/// What each side puts on the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeTerms {
    pub offered_property_ids: BTreeSet<PropertyId>,
    pub offered_currency: Money,
    pub requested_property_ids: BTreeSet<PropertyId>,
    pub requested_currency: Money,
}

impl TradeTerms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offer_property(mut self, property_id: PropertyId) -> Self {
        self.offered_property_ids.insert(property_id);
        self
    }

    pub fn offer_currency(mut self, amount: Money) -> Self {
        self.offered_currency = amount;
        self
    }

    pub fn request_property(mut self, property_id: PropertyId) -> Self {
        self.requested_property_ids.insert(property_id);
        self
    }

    pub fn request_currency(mut self, amount: Money) -> Self {
        self.requested_currency = amount;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.offered_property_ids.is_empty()
            && self.requested_property_ids.is_empty()
            && self.offered_currency.is_zero()
            && self.requested_currency.is_zero()
    }
}

/// A proposal from one player to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeOffer {
    id: TradeOfferId,
    offering_player_id: PlayerId,
    receiving_player_id: PlayerId,
    #[serde(flatten)]
    terms: TradeTerms,
    status: TradeStatus,
}

impl TradeOffer {
    /// New pending offer with a fresh id.
    pub fn new(
        offering_player_id: PlayerId,
        receiving_player_id: PlayerId,
        terms: TradeTerms,
    ) -> Result<Self, DomainError> {
        if offering_player_id == receiving_player_id {
            return Err(DomainError::validation("A player cannot trade with themselves"));
        }
        if terms.offered_currency.is_negative() || terms.requested_currency.is_negative() {
            return Err(DomainError::validation("Trade currency cannot be negative"));
        }
        Ok(Self {
            id: TradeOfferId::new(),
            offering_player_id,
            receiving_player_id,
            terms,
            status: TradeStatus::Pending,
        })
    }

    #[inline]
    pub fn id(&self) -> TradeOfferId {
        self.id
    }

    #[inline]
    pub fn offering_player_id(&self) -> PlayerId {
        self.offering_player_id
    }

    #[inline]
    pub fn receiving_player_id(&self) -> PlayerId {
        self.receiving_player_id
    }

    #[inline]
    pub fn terms(&self) -> &TradeTerms {
        &self.terms
    }

    pub fn offered_property_ids(&self) -> &BTreeSet<PropertyId> {
        &self.terms.offered_property_ids
    }

    pub fn offered_currency(&self) -> Money {
        self.terms.offered_currency
    }

    pub fn requested_property_ids(&self) -> &BTreeSet<PropertyId> {
        &self.terms.requested_property_ids
    }

    pub fn requested_currency(&self) -> Money {
        self.terms.requested_currency
    }

    #[inline]
    pub fn status(&self) -> TradeStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == TradeStatus::Pending
    }

    pub fn accept(&self) -> Result<Self, DomainError> {
        self.resolve(TradeStatus::Accepted)
    }

    pub fn reject(&self) -> Result<Self, DomainError> {
        self.resolve(TradeStatus::Rejected)
    }

    pub fn cancel(&self) -> Result<Self, DomainError> {
        self.resolve(TradeStatus::Cancelled)
    }

    pub fn expire(&self) -> Result<Self, DomainError> {
        self.resolve(TradeStatus::Expired)
    }

    fn resolve(&self, status: TradeStatus) -> Result<Self, DomainError> {
        if !self.is_pending() {
            return Err(DomainError::invalid_action(format!(
                "Trade {} is already {}",
                self.id, self.status
            )));
        }
        Ok(Self {
            status,
            ..self.clone()
        })
    }
}
