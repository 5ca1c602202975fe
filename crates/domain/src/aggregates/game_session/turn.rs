//! Rolling, movement, tile effects and turn hand-over.

use crate::entities::TradeOffer;
use crate::error::DomainError;
use crate::events::GameEvent;
use crate::rules::{PASSING_SALARY, SAND_TRAP_POSITION, START_POSITION, WATER_HAZARD_PENALTY};
use crate::types::{GameStatus, TileType, TurnPhase};
use crate::value_objects::DiceRoll;
use crate::PlayerId;

use super::GameSession;

const WATER_HAZARD_REASON: &str = "Water Hazard";
const OPPONENT_BANKRUPT_REASON: &str = "Opponent bankrupt";

impl GameSession {
    /// Roll for the current player and resolve the move.
    ///
    /// `die` supplies one face value per call and is called exactly twice.
    /// A player in the sand trap escapes on doubles; otherwise the trap
    /// counter ticks down and the player moves only once it runs out.
    pub fn roll_dice(
        &mut self,
        player_id: PlayerId,
        die: impl FnMut() -> u8,
    ) -> Result<DiceRoll, DomainError> {
        self.ensure_turn(player_id, TurnPhase::Roll)?;
        let roll = DiceRoll::roll_with(die)?;

        self.record(GameEvent::DiceRolled { player_id, roll });

        let player = self.player_mut(player_id)?;
        let stuck = if !player.is_in_sand_trap() {
            false
        } else if roll.is_doubles() {
            player.escape_sand_trap();
            false
        } else {
            player.decrement_sand_trap_turns();
            player.is_in_sand_trap()
        };

        if stuck {
            self.turn_phase = TurnPhase::Action;
        } else {
            self.process_movement(player_id, roll)?;
        }
        Ok(roll)
    }

    /// Finish the current player's turn and pass play to the next solvent seat.
    ///
    /// The game ends here, not at the moment of bankruptcy.
    pub fn end_turn(&mut self, player_id: PlayerId) -> Result<(), DomainError> {
        self.ensure_turn(player_id, TurnPhase::Action)?;

        if let Some(cancelled) = self.pending_trade().map(TradeOffer::cancel).transpose()? {
            self.trade = Some(cancelled);
        }
        self.player_mut(player_id)?.reset_consecutive_doubles();
        self.record(GameEvent::TurnEnded {
            player_id,
            turn_number: self.turn_number,
        });

        let next_player_id = self.next_active_player_after(player_id).unwrap_or(player_id);
        self.current_player_id = Some(next_player_id);
        self.turn_number += 1;
        self.turn_phase = TurnPhase::Roll;

        if !self.finish_if_decided() {
            self.record(GameEvent::TurnStarted {
                player_id: next_player_id,
                turn_number: self.turn_number,
            });
        }
        Ok(())
    }

    fn process_movement(&mut self, player_id: PlayerId, roll: DiceRoll) -> Result<(), DomainError> {
        let player = self.player_mut(player_id)?;
        if roll.is_doubles() {
            player.increment_consecutive_doubles();
            if player.has_rolled_three_doubles() {
                return self.send_to_sand_trap(player_id);
            }
        } else {
            player.reset_consecutive_doubles();
        }

        let from_position = player.position();
        let to_position = self.board.calculate_new_position(from_position, roll.total());
        let passed_start = self.board.passed_start(from_position, to_position);

        let player = self.player_mut(player_id)?;
        player.move_to(to_position);
        if passed_start && to_position != START_POSITION {
            player.add_currency(PASSING_SALARY);
            self.record(GameEvent::SalaryCollected {
                player_id,
                amount: PASSING_SALARY,
            });
        }
        self.record(GameEvent::PlayerMoved {
            player_id,
            from_position,
            to_position,
            passed_start,
        });

        self.land_on(player_id, to_position)?;

        let player = self.player(player_id)?;
        let extra_roll = roll.is_doubles()
            && !player.is_in_sand_trap()
            && !player.is_bankrupt()
            && self.status == GameStatus::InProgress;
        if extra_roll {
            self.turn_phase = TurnPhase::Roll;
        }
        Ok(())
    }

    /// Apply the landed tile's effect. Always leaves the phase at `Action`.
    fn land_on(&mut self, player_id: PlayerId, position: u8) -> Result<(), DomainError> {
        let tile_type = self.board.tile_at(position)?.tile_type();
        match tile_type {
            TileType::Property => self.settle_rent(player_id, position)?,
            TileType::SandTrap => self.send_to_sand_trap(player_id)?,
            TileType::WaterHazard => self.charge_water_hazard(player_id)?,
            // shop tiles are reserved for a card draw
            TileType::Start | TileType::SafeLounge | TileType::Shop => {}
        }
        self.turn_phase = TurnPhase::Action;
        Ok(())
    }

    fn settle_rent(&mut self, player_id: PlayerId, position: u8) -> Result<(), DomainError> {
        let Some(property) = self.board.property_at(position)? else {
            return Ok(());
        };
        let Some(owner_id) = property.owner_id() else {
            return Ok(());
        };
        if owner_id == player_id || property.is_mortgaged() {
            return Ok(());
        }

        let property_id = property.id();
        let rent = property.calculate_rent(
            self.board
                .owns_complete_group(owner_id, property.course_group()),
        );

        if !self.player(player_id)?.can_afford(rent) {
            return self.declare_bankruptcy(player_id, owner_id);
        }

        self.player_mut(player_id)?.subtract_currency(rent)?;
        self.player_mut(owner_id)?.add_currency(rent);
        self.record(GameEvent::RentPaid {
            payer_id: player_id,
            receiver_id: owner_id,
            property_id,
            amount: rent,
        });
        Ok(())
    }

    /// The penalty is waived, not escalated, when the player cannot pay.
    fn charge_water_hazard(&mut self, player_id: PlayerId) -> Result<(), DomainError> {
        let player = self.player_mut(player_id)?;
        if !player.can_afford(WATER_HAZARD_PENALTY) {
            return Ok(());
        }
        player.subtract_currency(WATER_HAZARD_PENALTY)?;
        self.record(GameEvent::PenaltyPaid {
            player_id,
            amount: WATER_HAZARD_PENALTY,
            reason: WATER_HAZARD_REASON.to_string(),
        });
        Ok(())
    }

    fn send_to_sand_trap(&mut self, player_id: PlayerId) -> Result<(), DomainError> {
        let player = self.player_mut(player_id)?;
        player.move_to(SAND_TRAP_POSITION);
        player.enter_sand_trap();
        player.reset_consecutive_doubles();
        self.record(GameEvent::PlayerSentToSandTrap { player_id });
        self.turn_phase = TurnPhase::Action;
        Ok(())
    }

    /// Hand every asset of `debtor_id` to `creditor_id` and mark the debtor out.
    fn declare_bankruptcy(
        &mut self,
        debtor_id: PlayerId,
        creditor_id: PlayerId,
    ) -> Result<(), DomainError> {
        // both seats must exist before anything moves
        self.player(creditor_id)?;
        let debtor = self.player_mut(debtor_id)?;
        debtor.declare_bankrupt();
        let property_ids = debtor.take_properties();
        let balance = debtor.forfeit_balance();

        for property_id in &property_ids {
            self.board.property_mut(*property_id)?.transfer_to(creditor_id);
        }
        let creditor = self.player_mut(creditor_id)?;
        for property_id in property_ids {
            creditor.add_property(property_id);
        }
        creditor.add_currency(balance);

        self.record(GameEvent::PlayerBankrupt {
            player_id: debtor_id,
            creditor_id,
        });
        Ok(())
    }

    /// First non-bankrupt seat after `player_id` in join order, wrapping.
    fn next_active_player_after(&self, player_id: PlayerId) -> Option<PlayerId> {
        let seats = self.players.len();
        let start = self
            .players
            .iter()
            .position(|player| player.player_id() == player_id)?;
        (1..=seats)
            .map(|offset| &self.players[(start + offset) % seats])
            .find(|player| !player.is_bankrupt())
            .map(|player| player.player_id())
    }

    /// Complete the game when a single solvent player remains.
    fn finish_if_decided(&mut self) -> bool {
        let solvent: Vec<PlayerId> = self
            .active_players()
            .map(|player| player.player_id())
            .collect();
        let [winner_id] = solvent[..] else {
            return false;
        };
        self.status = GameStatus::Completed;
        self.winner_id = Some(winner_id);
        self.record(GameEvent::GameEnded {
            winner_id,
            reason: OPPONENT_BANKRUPT_REASON.to_string(),
        });
        true
    }
}
