//! Ability and relic-power resolution.
//!
//! Every ability is one variant of a closed enum; resolution is an
//! exhaustive match. Abilities either mutate state directly or install the
//! pending record that re-routes authorization to the deciding player.

use smallvec::SmallVec;

use crate::cards::{Ability, CardId, RelicPower};
use crate::core::PlayerId;
use crate::error::ActionError;
use crate::state::{Pending, PendingChoice, Phase, MAX_ACTIVE_RELICS};

use super::GameEngine;

impl GameEngine {
    /// Resolve a non-shield ally ability after the card reaches the play
    /// area.
    pub(crate) fn resolve_ability(&mut self, player: PlayerId, source: CardId, ability: Ability) {
        match ability {
            Ability::DrawToHandSize { target } => {
                self.draw_to(player, target);
                let held = self.state.core.player(player).hand.len();
                let name = self.name_of(source);
                self.state
                    .core
                    .log_entry(player, "Card Ability", format!("{name}: drew up to {held} cards"));
            }
            Ability::RetrieveEnergyCell => {
                let cell = self
                    .state
                    .core
                    .dust
                    .iter()
                    .copied()
                    .find(|&card| self.is_energy_cell(card));
                if let Some(cell) = cell {
                    self.state.core.dust.retain(|&c| c != cell);
                    self.state.core.player_mut(player).hand.push(cell);
                    let name = self.name_of(source);
                    self.state
                        .core
                        .log_entry(player, "Card Ability", format!("{name}: retrieved an Energy Cell"));
                }
            }
            Ability::DiscardFragmentForBonus { bonus } => {
                let has_fragment = self
                    .state
                    .core
                    .player(player)
                    .hand
                    .iter()
                    .any(|&card| self.is_fusion_fragment(card));
                if has_fragment {
                    self.state.core.pending = Some(Pending::Choice(
                        PendingChoice::DiscardFragmentForBonus {
                            player,
                            source,
                            bonus,
                        },
                    ));
                }
            }
            Ability::DrawAndPrimePowerful => {
                self.draw_card(player);
                self.state.core.player_mut(player).flags.next_powerful_is_efficient = true;
                let name = self.name_of(source);
                self.state.core.log_entry(
                    player,
                    "Card Ability",
                    format!("{name}: drew 1; next Powerful ally is Efficient"),
                );
            }
            Ability::RetrieveFromDust { count } => {
                let mut retrieved = 0;
                while retrieved < count {
                    let candidate = self
                        .state
                        .core
                        .dust
                        .iter()
                        .copied()
                        .rev()
                        .find(|&card| !self.is_relic(card));
                    let Some(card) = candidate else { break };
                    self.state.core.dust.retain(|&c| c != card);
                    self.state.core.player_mut(player).hand.push(card);
                    retrieved += 1;
                }
                if retrieved > 0 {
                    let name = self.name_of(source);
                    self.state.core.log_entry(
                        player,
                        "Card Ability",
                        format!("{name}: retrieved {retrieved} card(s) from the Dust"),
                    );
                }
            }
            Ability::Attack(attack) => {
                self.launch_attack(player, source, attack, None);
            }
        }
    }

    pub(crate) fn handle_activate_relic(
        &mut self,
        actor: PlayerId,
        relic: CardId,
    ) -> Result<(), ActionError> {
        if self.state.core.phase != Phase::Relic {
            return Err(ActionError::WrongPhase);
        }
        self.require_relic_dust_done(actor)?;

        let power = self.relic_power_of(relic)?;
        {
            let state = self.state.core.player(actor);
            if !state.relics.contains(&relic) {
                return Err(ActionError::CardNotInZone);
            }
            if state.active_relics.len() >= MAX_ACTIVE_RELICS {
                return Err(ActionError::RelicLimit);
            }
        }

        let state = self.state.core.player_mut(actor);
        state.relics.retain(|&c| c != relic);
        state.active_relics.push(relic);

        let name = self.name_of(relic);
        self.state.core.log_entry(actor, "Activated Relic", name);
        self.trigger_relic_power(actor, relic, power);
        Ok(())
    }

    pub(crate) fn handle_use_relic(
        &mut self,
        actor: PlayerId,
        relic: CardId,
    ) -> Result<(), ActionError> {
        if self.state.core.phase != Phase::Relic {
            return Err(ActionError::WrongPhase);
        }
        self.require_relic_dust_done(actor)?;

        let power = self.relic_power_of(relic)?;
        let state = self.state.core.player(actor);
        if !state.active_relics.contains(&relic) {
            return Err(ActionError::CardNotInZone);
        }
        if state.flags.relics_used.contains(&relic) {
            return Err(ActionError::ActionExhausted);
        }
        if !power.is_triggered() {
            return Err(ActionError::InvalidSelection);
        }

        self.trigger_relic_power(actor, relic, power);
        Ok(())
    }

    /// Fire a relic's triggered power; passives are a logged no-op here.
    pub(crate) fn trigger_relic_power(&mut self, player: PlayerId, relic: CardId, power: RelicPower) {
        self.state.core.player_mut(player).flags.relics_used.push(relic);

        match power {
            RelicPower::EnergyPerRelic => {
                let gained = self.state.core.player(player).relic_count() as u32;
                self.state.core.available_energy += gained;
                let name = self.name_of(relic);
                self.state
                    .core
                    .log_entry(player, "Relic Power", format!("{name}: +{gained} energy"));
            }
            RelicPower::PeekTopCard => {
                let top = self.state.core.player(player).deck.last().copied();
                match top {
                    Some(card) => {
                        self.state.core.pending =
                            Some(Pending::Choice(PendingChoice::PeekTopCard {
                                player,
                                source: relic,
                                card,
                            }));
                    }
                    // Empty deck: just the draw half of the power.
                    None => {
                        self.draw_card(player);
                    }
                }
            }
            RelicPower::RecallFromDiscard => {
                if !self.state.core.player(player).discard.is_empty() {
                    self.state.core.pending =
                        Some(Pending::Choice(PendingChoice::RecallFromDiscard {
                            player,
                            source: relic,
                        }));
                }
            }
            RelicPower::RetrieveFromDust => {
                let candidates = self.retrieve_candidates(player);
                if !candidates.is_empty() {
                    self.state.core.pending =
                        Some(Pending::Choice(PendingChoice::RetrieveFromDust {
                            player,
                            source: relic,
                            candidates,
                        }));
                }
            }
            // Passive powers are consulted where they apply.
            RelicPower::FirstAllyEfficient
            | RelicPower::ExpandedHand
            | RelicPower::SatelliteBlock
            | RelicPower::HandFloor
            | RelicPower::SecondAllyAction
            | RelicPower::RecruitOnAcquire => {
                let name = self.name_of(relic);
                self.state.core.log_entry(player, "Relic Power", format!("{name} is passive"));
            }
        }
    }

    /// Dust cards retrievable by the different-name relic power.
    fn retrieve_candidates(&self, player: PlayerId) -> SmallVec<[CardId; 8]> {
        let hand_names: Vec<String> = self
            .state
            .core
            .player(player)
            .hand
            .iter()
            .map(|&card| self.name_of(card))
            .collect();

        self.state
            .core
            .dust
            .iter()
            .copied()
            .filter(|&card| !self.is_relic(card))
            .filter(|&card| !hand_names.contains(&self.name_of(card)))
            .collect()
    }

    pub(crate) fn relic_power_of(&self, relic: CardId) -> Result<RelicPower, ActionError> {
        self.state
            .core
            .instance(relic)
            .ok_or(ActionError::UnknownCard(relic.raw()))
            .and_then(|instance| {
                self.catalog
                    .get(instance.archetype)
                    .relic()
                    .map(|spec| spec.power)
                    .ok_or(ActionError::InvalidSelection)
            })
    }

    pub(crate) fn is_energy_cell(&self, card: CardId) -> bool {
        self.state
            .core
            .instance(card)
            .map(|instance| self.catalog.get(instance.archetype).is_energy_cell())
            .unwrap_or(false)
    }

    pub(crate) fn is_fusion_fragment(&self, card: CardId) -> bool {
        self.state
            .core
            .instance(card)
            .map(|instance| self.catalog.get(instance.archetype).is_fusion_fragment())
            .unwrap_or(false)
    }
}
