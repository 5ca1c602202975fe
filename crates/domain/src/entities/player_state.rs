//! Per-player mutable state within a game session.

use std::collections::BTreeSet;

use crate::error::DomainError;
use crate::rules::{DOUBLES_FOR_SAND_TRAP, MAX_TURNS_IN_SAND_TRAP, START_POSITION};
use crate::types::Difficulty;
use crate::value_objects::Money;
use crate::{PlayerId, PropertyId};

use super::board::Board;

/// A seat at the table, human or NPC.
///
/// Owned properties are held by id. The `Property` values themselves live on
/// the board, which is the single source of truth for ownership state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    player_id: PlayerId,
    display_name: String,
    npc: bool,
    difficulty: Option<Difficulty>,
    position: u8,
    balance: Money,
    owned_property_ids: BTreeSet<PropertyId>,
    bankrupt: bool,
    turns_in_sand_trap: u8,
    consecutive_doubles: u8,
}

impl PlayerState {
    pub fn human(player_id: PlayerId, display_name: impl Into<String>, starting: Money) -> Self {
        Self::seated(player_id, display_name.into(), false, None, starting)
    }

    /// NPC seat named after its difficulty.
    pub fn npc(player_id: PlayerId, difficulty: Difficulty, starting: Money) -> Self {
        Self::seated(
            player_id,
            difficulty.display_name().to_string(),
            true,
            Some(difficulty),
            starting,
        )
    }

    fn seated(
        player_id: PlayerId,
        display_name: String,
        npc: bool,
        difficulty: Option<Difficulty>,
        balance: Money,
    ) -> Self {
        Self {
            player_id,
            display_name,
            npc,
            difficulty,
            position: START_POSITION,
            balance,
            owned_property_ids: BTreeSet::new(),
            bankrupt: false,
            turns_in_sand_trap: 0,
            consecutive_doubles: 0,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    #[inline]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[inline]
    pub fn is_npc(&self) -> bool {
        self.npc
    }

    #[inline]
    pub fn is_human(&self) -> bool {
        !self.npc
    }

    #[inline]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    #[inline]
    pub fn position(&self) -> u8 {
        self.position
    }

    #[inline]
    pub fn balance(&self) -> Money {
        self.balance
    }

    #[inline]
    pub fn owned_property_ids(&self) -> &BTreeSet<PropertyId> {
        &self.owned_property_ids
    }

    #[inline]
    pub fn is_bankrupt(&self) -> bool {
        self.bankrupt
    }

    #[inline]
    pub fn turns_in_sand_trap(&self) -> u8 {
        self.turns_in_sand_trap
    }

    #[inline]
    pub fn consecutive_doubles(&self) -> u8 {
        self.consecutive_doubles
    }

    pub fn property_count(&self) -> usize {
        self.owned_property_ids.len()
    }

    pub fn owns_property(&self, property_id: PropertyId) -> bool {
        self.owned_property_ids.contains(&property_id)
    }

    pub fn can_afford(&self, amount: Money) -> bool {
        self.balance >= amount
    }

    pub fn is_in_sand_trap(&self) -> bool {
        self.turns_in_sand_trap > 0
    }

    pub fn has_rolled_three_doubles(&self) -> bool {
        self.consecutive_doubles >= DOUBLES_FOR_SAND_TRAP
    }

    /// Balance plus the purchase price and improvement spend of every owned property.
    pub fn net_worth(&self, board: &Board) -> Result<Money, DomainError> {
        let mut total = self.balance;
        for property_id in &self.owned_property_ids {
            let property = board.property(*property_id)?;
            let level = i64::from(property.improvement_level().level());
            total += property.purchase_price() + property.improvement_cost() * level;
        }
        Ok(total)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn move_to(&mut self, position: u8) {
        self.position = position;
    }

    pub fn add_currency(&mut self, amount: Money) {
        self.balance += amount;
    }

    /// Deduct `amount`. Callers check affordability first, so a shortfall
    /// here is a broken invariant and the balance is left untouched.
    pub fn subtract_currency(&mut self, amount: Money) -> Result<(), DomainError> {
        if !self.can_afford(amount) {
            return Err(DomainError::invariant(format!(
                "Balance of {} would go negative: {} minus {}",
                self.display_name, self.balance, amount
            )));
        }
        self.balance -= amount;
        Ok(())
    }

    /// Zero the balance and hand back what was there.
    pub fn forfeit_balance(&mut self) -> Money {
        std::mem::take(&mut self.balance)
    }

    pub fn add_property(&mut self, property_id: PropertyId) {
        self.owned_property_ids.insert(property_id);
    }

    pub fn remove_property(&mut self, property_id: PropertyId) {
        self.owned_property_ids.remove(&property_id);
    }

    /// Hand over every owned property id, leaving none.
    pub fn take_properties(&mut self) -> BTreeSet<PropertyId> {
        std::mem::take(&mut self.owned_property_ids)
    }

    pub fn declare_bankrupt(&mut self) {
        self.bankrupt = true;
    }

    pub fn enter_sand_trap(&mut self) {
        self.turns_in_sand_trap = MAX_TURNS_IN_SAND_TRAP;
    }

    pub fn decrement_sand_trap_turns(&mut self) {
        self.turns_in_sand_trap = self.turns_in_sand_trap.saturating_sub(1);
    }

    pub fn escape_sand_trap(&mut self) {
        self.turns_in_sand_trap = 0;
    }

    pub fn increment_consecutive_doubles(&mut self) {
        self.consecutive_doubles = self.consecutive_doubles.saturating_add(1);
    }

    pub fn reset_consecutive_doubles(&mut self) {
        self.consecutive_doubles = 0;
    }

    /// Rebuild a seat from persisted fields.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn restore(
        player_id: PlayerId,
        display_name: String,
        npc: bool,
        difficulty: Option<Difficulty>,
        position: u8,
        balance: Money,
        owned_property_ids: BTreeSet<PropertyId>,
        bankrupt: bool,
        turns_in_sand_trap: u8,
        consecutive_doubles: u8,
    ) -> Self {
        Self {
            player_id,
            display_name,
            npc,
            difficulty,
            position,
            balance,
            owned_property_ids,
            bankrupt,
            turns_in_sand_trap,
            consecutive_doubles,
        }
    }
}
