//! Card-play handlers: resources, allies, shield installs, dusting.

use crate::cards::{AllyRank, CardId, CardKind, RelicPower, ResourceKind};
use crate::core::PlayerId;
use crate::error::ActionError;
use crate::state::{Phase, ShieldFace, ShieldSlot};

use super::GameEngine;

impl GameEngine {
    pub(crate) fn handle_play_card(
        &mut self,
        actor: PlayerId,
        card: CardId,
        as_shield: bool,
    ) -> Result<(), ActionError> {
        let kind = self.kind_of(card)?;

        if !self.state.core.player(actor).hand.contains(&card) {
            return Err(ActionError::CardNotInZone);
        }
        if self.state.core.phase == Phase::Relic {
            self.require_relic_dust_done(actor)?;
        }

        match kind {
            CardKind::Resource(resource) => self.play_resource(actor, card, resource),
            CardKind::Ally(spec) => {
                if as_shield {
                    self.play_shield(actor, card, &spec)
                } else {
                    self.play_ally(actor, card, &spec)
                }
            }
            // Relics are acquired, never held in hand.
            CardKind::Relic(_) => Err(ActionError::InvalidSelection),
        }
    }

    fn play_resource(
        &mut self,
        actor: PlayerId,
        card: CardId,
        resource: ResourceKind,
    ) -> Result<(), ActionError> {
        let phase = self.state.core.phase;
        if !phase.allows_card_play() {
            return Err(ActionError::WrongPhase);
        }

        let name = self.name_of(card);
        let state = self.state.core.player_mut(actor);
        state.remove_from_hand(card);
        state.play_area.push(card);

        match resource {
            ResourceKind::EnergyCell => {
                let value = crate::cards::ENERGY_CELL_VALUE;
                self.state.core.available_energy += value;
                let total = self.state.core.available_energy;
                self.state
                    .core
                    .log_entry(actor, "Played Energy Cell", format!("+{value} energy ({total} total)"));
            }
            ResourceKind::FusionFragment => {
                self.state.core.log_entry(actor, "Played Resource", name);
            }
        }

        // Resource plays pull the turn toward the Energy phase.
        match phase {
            Phase::Ally => self.enter_phase(Phase::Energy),
            Phase::Relic => self.enter_phase(Phase::Shield),
            Phase::Shield => self.enter_phase(Phase::Ally),
            _ => {}
        }
        Ok(())
    }

    fn play_shield(
        &mut self,
        actor: PlayerId,
        card: CardId,
        spec: &crate::cards::AllySpec,
    ) -> Result<(), ActionError> {
        let phase = self.state.core.phase;
        if !matches!(phase, Phase::Relic | Phase::Shield | Phase::Ally) {
            return Err(ActionError::WrongPhase);
        }
        if !spec.shield_capable {
            return Err(ActionError::InvalidSelection);
        }

        let efficient = self.is_treated_efficient(actor, spec.rank);
        if !efficient && self.state.core.player(actor).flags.ally_actions == 0 {
            return Err(ActionError::ActionExhausted);
        }

        // Replacing a shield discards the old one; a face-up shield also
        // takes its energy contribution back out of the pool.
        if let Some(old) = self.state.core.player(actor).shield {
            if old.is_active() {
                let refund = self.energy_of(old.card);
                self.state.core.available_energy =
                    self.state.core.available_energy.saturating_sub(refund);
            }
            let name = self.name_of(old.card);
            let state = self.state.core.player_mut(actor);
            state.shield = None;
            state.discard.push(old.card);
            self.state.core.log_entry(actor, "Shield Replaced", name);
        }

        let name = self.name_of(card);
        let state = self.state.core.player_mut(actor);
        state.remove_from_hand(card);
        state.shield = Some(ShieldSlot {
            card,
            face: ShieldFace::Charging,
        });
        self.consume_ally_play(actor, spec.rank, efficient);
        self.state
            .core
            .log_entry(actor, "Played Shield", format!("{name} (charging)"));
        Ok(())
    }

    fn play_ally(
        &mut self,
        actor: PlayerId,
        card: CardId,
        spec: &crate::cards::AllySpec,
    ) -> Result<(), ActionError> {
        let phase = self.state.core.phase;
        if !matches!(phase, Phase::Relic | Phase::Shield | Phase::Ally) {
            return Err(ActionError::WrongPhase);
        }

        let efficient = self.is_treated_efficient(actor, spec.rank);
        if !efficient && self.state.core.player(actor).flags.ally_actions == 0 {
            return Err(ActionError::ActionExhausted);
        }

        let name = self.name_of(card);
        let state = self.state.core.player_mut(actor);
        state.remove_from_hand(card);
        state.play_area.push(card);
        self.consume_ally_play(actor, spec.rank, efficient);

        if spec.energy > 0 {
            self.state.core.available_energy += spec.energy;
        }
        let detail = if spec.energy > 0 {
            format!("{name} (+{} energy)", spec.energy)
        } else {
            name
        };
        self.state.core.log_entry(actor, "Played Ally", detail);

        if let Some(ability) = spec.ability {
            self.resolve_ability(actor, card, ability);
        }

        // Playing an ally during Relic or Shield phase advances the turn.
        match phase {
            Phase::Relic => self.enter_phase(Phase::Shield),
            Phase::Shield => self.enter_phase(Phase::Ally),
            _ => {}
        }
        Ok(())
    }

    /// Whether a play of `rank` skips the ally-action cost right now.
    fn is_treated_efficient(&self, player: PlayerId, rank: AllyRank) -> bool {
        if rank == AllyRank::Efficient {
            return true;
        }
        let flags = &self.state.core.player(player).flags;
        if flags.next_powerful_is_efficient && rank == AllyRank::Powerful {
            return true;
        }
        !flags.first_ally_played && self.owns_relic_power(player, RelicPower::FirstAllyEfficient)
    }

    /// Burn the flags an ally play consumes.
    fn consume_ally_play(&mut self, player: PlayerId, rank: AllyRank, treated_efficient: bool) {
        let flags = &mut self.state.core.player_mut(player).flags;
        if treated_efficient {
            if rank == AllyRank::Powerful && flags.next_powerful_is_efficient {
                flags.next_powerful_is_efficient = false;
            }
        } else {
            flags.ally_actions = flags.ally_actions.saturating_sub(1);
        }
        flags.first_ally_played = true;
    }

    pub(crate) fn handle_play_all_energy_cells(&mut self, actor: PlayerId) -> Result<(), ActionError> {
        let phase = self.state.core.phase;
        if !phase.allows_card_play() {
            return Err(ActionError::WrongPhase);
        }
        if phase == Phase::Relic {
            self.require_relic_dust_done(actor)?;
        }

        let cells: Vec<CardId> = self
            .state
            .core
            .player(actor)
            .hand
            .iter()
            .copied()
            .filter(|&card| {
                matches!(
                    self.kind_of(card),
                    Ok(CardKind::Resource(ResourceKind::EnergyCell))
                )
            })
            .collect();

        if cells.is_empty() {
            return Ok(());
        }

        let gained = cells.len() as u32 * crate::cards::ENERGY_CELL_VALUE;
        {
            let state = self.state.core.player_mut(actor);
            for &cell in &cells {
                state.remove_from_hand(cell);
                state.play_area.push(cell);
            }
        }
        self.state.core.available_energy += gained;
        let total = self.state.core.available_energy;
        self.state.core.log_entry(
            actor,
            "Played All Energy Cells",
            format!("{} cells (+{gained} energy, {total} total)", cells.len()),
        );

        match phase {
            Phase::Ally => self.enter_phase(Phase::Energy),
            Phase::Relic => self.enter_phase(Phase::Shield),
            Phase::Shield => self.enter_phase(Phase::Ally),
            _ => {}
        }
        Ok(())
    }

    pub(crate) fn handle_dust_card(&mut self, actor: PlayerId, card: CardId) -> Result<(), ActionError> {
        let flags = &self.state.core.player(actor).flags;
        if flags.dusted_this_turn && !flags.must_dust_for_relic {
            return Err(ActionError::AlreadyDusted);
        }

        if !self.state.core.player(actor).hand.contains(&card) {
            return Err(ActionError::CardNotInZone);
        }

        let name = self.name_of(card);
        let state = self.state.core.player_mut(actor);
        state.remove_from_hand(card);
        state.flags.dusted_this_turn = true;
        state.flags.must_dust_for_relic = false;
        self.state.core.dust.push(card);
        self.state
            .core
            .log_entry(actor, "Dusted Card", format!("{name} moved to the Dust"));
        Ok(())
    }
}
