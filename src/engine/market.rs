//! Market purchases, relic acquisition, and the end-game triggers tied to
//! market depletion.

use crate::cards::{RelicPower, RELIC_COST};
use crate::core::PlayerId;
use crate::error::ActionError;
use crate::state::{FinalRound, Pending, PendingChoice, Phase, FINAL_ROUND_EMPTY_STACKS};

use super::GameEngine;

/// Total ally cost the recruit-on-acquire relic allows.
pub const RECRUIT_BUDGET: u32 = 7;

impl GameEngine {
    pub(crate) fn handle_buy_card(&mut self, actor: PlayerId, index: usize) -> Result<(), ActionError> {
        if self.state.core.phase != Phase::Acquisition {
            return Err(ActionError::WrongPhase);
        }

        let (cost, remaining_after) = {
            let stack = self
                .state
                .core
                .market
                .stack(index)
                .ok_or(ActionError::InvalidSelection)?;
            if stack.is_empty() {
                return Err(ActionError::EmptyStack);
            }
            (stack.cost, stack.remaining() - 1)
        };

        let have = self.state.core.available_energy;
        if have < cost {
            return Err(ActionError::InsufficientEnergy { need: cost, have });
        }

        let card = self.state.core.market.stacks[index]
            .pop()
            .expect("stack checked non-empty");
        self.state.core.available_energy -= cost;
        self.state.core.player_mut(actor).discard.push(card);

        let name = self.name_of(card);
        self.state.core.log_entry(
            actor,
            "Bought Card",
            format!("{name} (cost {cost}, {remaining_after} remaining)"),
        );

        self.check_market_depletion(actor);
        Ok(())
    }

    pub(crate) fn handle_acquire_relic(&mut self, actor: PlayerId, pile: usize) -> Result<(), ActionError> {
        if self.state.core.phase != Phase::Acquisition {
            return Err(ActionError::WrongPhase);
        }

        let relic = self
            .state
            .core
            .relic_row
            .revealed(pile)
            .ok_or(ActionError::EmptyStack)?;

        let have = self.state.core.available_energy;
        if have < RELIC_COST {
            return Err(ActionError::InsufficientEnergy {
                need: RELIC_COST,
                have,
            });
        }

        let taken = self.state.core.relic_row.take(pile).expect("revealed relic exists");
        debug_assert_eq!(taken, relic);
        self.state.core.available_energy -= RELIC_COST;
        self.state.core.relic_row.refill();
        self.state.core.player_mut(actor).relics.push(relic);

        let name = self.name_of(relic);
        self.state
            .core
            .log_entry(actor, "Acquired Relic", format!("{name} (cost {RELIC_COST})"));

        if self.relic_power_of(relic)? == RelicPower::RecruitOnAcquire
            && self.recruitable_stack_exists(RECRUIT_BUDGET)
        {
            self.state.core.pending = Some(Pending::Choice(PendingChoice::RecruitAllies {
                player: actor,
                source: relic,
                budget: RECRUIT_BUDGET,
            }));
        }

        // Third relic: the final round begins.
        if self.state.core.player(actor).relic_count() == 3 && self.state.core.final_round.is_none()
        {
            self.trigger_final_round(actor, "third relic acquired");
        }
        Ok(())
    }

    pub(crate) fn handle_recruit_ally(&mut self, actor: PlayerId, index: usize) -> Result<(), ActionError> {
        let Some(Pending::Choice(PendingChoice::RecruitAllies { player, source, budget })) =
            self.state.core.pending.clone()
        else {
            return Err(ActionError::NoPendingDecision);
        };

        let (cost, is_ally) = {
            let stack = self
                .state
                .core
                .market
                .stack(index)
                .ok_or(ActionError::InvalidSelection)?;
            if stack.is_empty() {
                return Err(ActionError::EmptyStack);
            }
            let is_ally = self.catalog.get(stack.archetype).ally().is_some();
            (stack.cost, is_ally)
        };
        if !is_ally {
            return Err(ActionError::InvalidSelection);
        }
        if cost > budget {
            return Err(ActionError::InsufficientEnergy {
                need: cost,
                have: budget,
            });
        }

        let card = self.state.core.market.stacks[index]
            .pop()
            .expect("stack checked non-empty");
        self.state.core.player_mut(player).discard.push(card);

        let name = self.name_of(card);
        let left = budget - cost;
        self.state
            .core
            .log_entry(player, "Recruited Ally", format!("{name} (free, {left} budget left)"));

        self.state.core.pending = if self.recruitable_stack_exists(left) {
            Some(Pending::Choice(PendingChoice::RecruitAllies {
                player,
                source,
                budget: left,
            }))
        } else {
            None
        };

        self.check_market_depletion(actor);
        Ok(())
    }

    pub(crate) fn handle_finish_recruiting(&mut self, _actor: PlayerId) -> Result<(), ActionError> {
        self.state.core.pending = None;
        Ok(())
    }

    /// Any non-empty ally stack within `budget`?
    fn recruitable_stack_exists(&self, budget: u32) -> bool {
        self.state.core.market.stacks.iter().any(|stack| {
            !stack.is_empty()
                && stack.cost <= budget
                && self.catalog.get(stack.archetype).ally().is_some()
        })
    }

    /// Five sold-out stacks start the final round.
    fn check_market_depletion(&mut self, actor: PlayerId) {
        if self.state.core.final_round.is_none()
            && self.state.core.market.empty_stack_count() >= FINAL_ROUND_EMPTY_STACKS
        {
            self.trigger_final_round(actor, "five market stacks are empty");
        }
    }

    fn trigger_final_round(&mut self, actor: PlayerId, reason: &str) {
        let turns_remaining = (self.state.core.player_count() - 1) as u8;
        self.state.core.final_round = Some(FinalRound {
            triggered_by: Some(actor),
            turns_remaining,
        });
        self.state.core.log_entry(
            actor,
            "Final Round",
            format!("{reason}; every other player gets one more turn"),
        );
    }
}
