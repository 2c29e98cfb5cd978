//! The attack/shield interrupt protocol.
//!
//! An attack runs as a queue of victims processed in rotation order. For
//! each victim: a block window if they can block (face-up shield, or the
//! once-per-round satellite), otherwise a lose-card choice if they hold
//! cards, otherwise they are skipped. The attacker's secondary draws fire
//! exactly once, after the whole queue drains - including when every victim
//! blocked or had nothing to lose.

use smallvec::smallvec;

use crate::cards::{AttackAbility, AttackEffect, AttackScope, CardId, RelicPower};
use crate::core::PlayerId;
use crate::error::ActionError;
use crate::state::{OpponentQueue, Pending, PendingAttack, PendingChoice};

use super::GameEngine;

impl GameEngine {
    /// Entry point for an attack ability (from a play or a shield
    /// re-trigger). `chosen` carries the already-selected target, if any.
    pub(crate) fn launch_attack(
        &mut self,
        attacker: PlayerId,
        source: CardId,
        attack: AttackAbility,
        chosen: Option<PlayerId>,
    ) {
        if attack.retrieve_option {
            // The attacker first picks attack-or-retrieve; the stored attack
            // has the option cleared so resolution cannot loop.
            self.state.core.pending = Some(Pending::Choice(PendingChoice::AttackOrRetrieve {
                player: attacker,
                source,
                attack: AttackAbility {
                    retrieve_option: false,
                    ..attack
                },
            }));
            return;
        }

        let opponents = self.state.core.opponents_of(attacker);
        let queue: OpponentQueue = match attack.scope {
            AttackScope::AllOpponents => opponents.into_iter().collect(),
            AttackScope::SingleOpponent => match chosen {
                Some(target) => smallvec![target],
                None => match opponents.as_slice() {
                    [] => smallvec![],
                    [only] => smallvec![*only],
                    _ => {
                        self.state.core.pending =
                            Some(Pending::Choice(PendingChoice::SelectOpponent {
                                attacker,
                                source,
                                attack,
                            }));
                        return;
                    }
                },
            },
        };

        self.advance_attack_queue(attacker, source, attack.effect, attack.draws, queue);
    }

    /// Process victims until one owes a decision or the queue drains.
    pub(crate) fn advance_attack_queue(
        &mut self,
        attacker: PlayerId,
        source: CardId,
        effect: AttackEffect,
        draws: u8,
        mut queue: OpponentQueue,
    ) {
        while !queue.is_empty() {
            let victim = queue.remove(0);
            if self.state.core.player(victim).eliminated {
                continue;
            }

            let shield_up = self
                .state
                .core
                .player(victim)
                .shield
                .map(|slot| slot.is_active())
                .unwrap_or(false);
            let satellite = self.owns_relic_power(victim, RelicPower::SatelliteBlock)
                && !self.state.core.player(victim).flags.satellite_block_used;

            if shield_up || satellite {
                self.state.core.pending = Some(Pending::Attack(PendingAttack {
                    attacker,
                    target: victim,
                    source,
                    effect,
                    draws,
                    satellite_eligible: satellite,
                    remaining: queue,
                }));
                return;
            }

            if !self.state.core.player(victim).hand.is_empty() {
                self.state.core.pending = Some(Pending::Choice(PendingChoice::LoseCard {
                    victim,
                    attacker,
                    source,
                    effect,
                    draws,
                    remaining: queue,
                }));
                return;
            }
            // Nothing to lose: the victim is skipped, the attack goes on.
        }

        self.state.core.pending = None;
        if draws > 0 {
            for _ in 0..draws {
                self.draw_card(attacker);
            }
            let name = self.name_of(source);
            self.state
                .core
                .log_entry(attacker, "Attack Complete", format!("{name}: drew {draws}"));
        }
    }

    pub(crate) fn handle_block(&mut self, actor: PlayerId) -> Result<(), ActionError> {
        let Some(Pending::Attack(attack)) = self.state.core.pending.clone() else {
            return Err(ActionError::NoPendingDecision);
        };

        let shield = self
            .state
            .core
            .player(actor)
            .shield
            .filter(|slot| slot.is_active());

        if let Some(slot) = shield {
            // The spent shield goes to its owner's discard; any energy it
            // contributed this turn comes back out of the pool.
            let refund = self.energy_of(slot.card);
            self.state.core.available_energy =
                self.state.core.available_energy.saturating_sub(refund);

            let shield_name = self.name_of(slot.card);
            let source_name = self.name_of(attack.source);
            let state = self.state.core.player_mut(actor);
            state.shield = None;
            state.discard.push(slot.card);
            self.state.core.log_entry(
                actor,
                "Blocked Attack",
                format!("{shield_name} blocked {source_name}"),
            );
        } else if attack.satellite_eligible
            && !self.state.core.player(actor).flags.satellite_block_used
        {
            self.state.core.player_mut(actor).flags.satellite_block_used = true;
            let source_name = self.name_of(attack.source);
            self.state.core.log_entry(
                actor,
                "Blocked Attack",
                format!("satellite blocked {source_name}"),
            );
        } else {
            return Err(ActionError::NoShield);
        }

        self.refill_hand_minimum(actor);
        self.state.core.pending = None;
        self.advance_attack_queue(
            attack.attacker,
            attack.source,
            attack.effect,
            attack.draws,
            attack.remaining,
        );
        Ok(())
    }

    pub(crate) fn handle_take_hit(&mut self, actor: PlayerId) -> Result<(), ActionError> {
        let Some(Pending::Attack(attack)) = self.state.core.pending.clone() else {
            return Err(ActionError::NoPendingDecision);
        };

        self.state.core.pending = None;
        if self.state.core.player(actor).hand.is_empty() {
            // Nothing to lose; the attack continues down the queue.
            self.advance_attack_queue(
                attack.attacker,
                attack.source,
                attack.effect,
                attack.draws,
                attack.remaining,
            );
            return Ok(());
        }

        // The target now picks which card they lose.
        self.state.core.pending = Some(Pending::Choice(PendingChoice::LoseCard {
            victim: attack.target,
            attacker: attack.attacker,
            source: attack.source,
            effect: attack.effect,
            draws: attack.draws,
            remaining: attack.remaining,
        }));
        Ok(())
    }

    pub(crate) fn handle_surrender_card(
        &mut self,
        actor: PlayerId,
        card: CardId,
    ) -> Result<(), ActionError> {
        let Some(Pending::Choice(PendingChoice::LoseCard {
            victim,
            attacker,
            source,
            effect,
            draws,
            remaining,
        })) = self.state.core.pending.clone()
        else {
            return Err(ActionError::NoPendingDecision);
        };
        debug_assert_eq!(actor, victim);

        if !self.state.core.player(victim).hand.contains(&card) {
            return Err(ActionError::CardNotInZone);
        }

        let card_name = self.name_of(card);
        let source_name = self.name_of(source);
        {
            let state = self.state.core.player_mut(victim);
            state.remove_from_hand(card);
        }
        match effect {
            AttackEffect::DiscardOne => {
                self.state.core.player_mut(victim).discard.push(card);
                self.state.core.log_entry(
                    victim,
                    "Attack Resolved",
                    format!("{source_name}: {card_name} discarded"),
                );
            }
            AttackEffect::DustOne => {
                self.state.core.dust.push(card);
                self.state.core.log_entry(
                    victim,
                    "Attack Resolved",
                    format!("{source_name}: {card_name} dusted"),
                );
            }
        }

        self.refill_hand_minimum(victim);
        self.state.core.pending = None;
        self.advance_attack_queue(attacker, source, effect, draws, remaining);
        Ok(())
    }

    /// Off-turn attack victims draw back up to the hand minimum.
    pub(crate) fn refill_hand_minimum(&mut self, victim: PlayerId) {
        if victim == self.state.core.current_player {
            return;
        }
        let minimum = self.hand_minimum(victim);
        self.draw_to(victim, minimum);
    }
}
