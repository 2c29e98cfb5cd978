//! Turn lifecycle: phase transitions, turn begin/end, drawing, elimination.

use log::debug;

use crate::cards::{CardId, RelicPower};
use crate::core::PlayerId;
use crate::error::ActionError;
use crate::state::{
    Phase, ShieldFace, HAND_MINIMUM, HAND_MINIMUM_RAISED, HAND_TARGET, HAND_TARGET_EXPANDED,
};

use super::energy::recompute_energy;
use super::GameEngine;

impl GameEngine {
    /// Reset per-turn bookkeeping and open `player`'s turn at Relic phase
    /// (auto-skipping as needed).
    pub(crate) fn begin_turn(&mut self, player: PlayerId) {
        let second_action = self.owns_relic_power(player, RelicPower::SecondAllyAction);

        let core = &mut self.state.core;
        core.current_player = player;
        core.available_energy = 0;
        core.end_turn_requested = false;

        let state = core.player_mut(player);
        state.flags = Default::default();
        state.flags.ally_actions = if second_action { 2 } else { 1 };
        state.flags.must_dust_for_relic = state.relic_count() > 0 && !state.hand.is_empty();

        debug!("turn {} begins for {player}", core.turn_number);
        self.enter_phase(Phase::Relic);
    }

    /// Enter a phase, applying its entry conditions (auto-skip, shield flip
    /// and re-trigger, energy recompute).
    pub(crate) fn enter_phase(&mut self, phase: Phase) {
        let player = self.state.core.current_player;

        match phase {
            Phase::Relic => {
                if self.state.core.player(player).relic_count() == 0 {
                    return self.enter_phase(Phase::Shield);
                }
                self.state.core.phase = Phase::Relic;
            }
            Phase::Shield => {
                let Some(slot) = self.state.core.player(player).shield else {
                    return self.enter_phase(Phase::Ally);
                };
                self.state.core.phase = Phase::Shield;

                // Fallback flip: the end of the previous turn normally did this.
                if slot.face == ShieldFace::Charging {
                    self.state
                        .core
                        .player_mut(player)
                        .shield
                        .as_mut()
                        .expect("shield checked above")
                        .face = ShieldFace::Active;
                    let name = self.name_of(slot.card);
                    self.state.core.log_entry(player, "Shield Active", name);
                }

                // A face-up shield with an attack ability re-triggers it
                // every turn.
                if self.state.core.pending.is_none() {
                    if let Ok(kind) = self.kind_of(slot.card) {
                        if let crate::cards::CardKind::Ally(spec) = kind {
                            if let Some(crate::cards::Ability::Attack(attack)) = spec.ability {
                                self.launch_attack(player, slot.card, attack, None);
                            }
                        }
                    }
                }
            }
            Phase::Energy => {
                self.state.core.phase = Phase::Energy;
                let energy = recompute_energy(&self.catalog, &self.state.core, player);
                self.state.core.available_energy = energy;
                self.enter_phase(Phase::Acquisition);
            }
            other => {
                self.state.core.phase = other;
            }
        }
    }

    pub(crate) fn handle_skip_phase(&mut self, actor: PlayerId) -> Result<(), ActionError> {
        match self.state.core.phase {
            Phase::Relic => {
                self.require_relic_dust_done(actor)?;
                self.enter_phase(Phase::Shield);
            }
            Phase::Shield => self.enter_phase(Phase::Ally),
            Phase::Ally => self.enter_phase(Phase::Energy),
            Phase::Energy => self.enter_phase(Phase::Acquisition),
            Phase::Acquisition => self.enter_phase(Phase::Discard),
            Phase::Discard => {
                // Manual counterpart of the End Turn sweep.
                self.sweep_to_discard(actor);
                self.enter_phase(Phase::Reset);
            }
            Phase::Reset => {
                self.state.core.available_energy = 0;
                let target = self.hand_target(actor);
                self.draw_to(actor, target);
                self.enter_phase(Phase::Dust);
            }
            Phase::Dust => {
                // Safety net: without an end-turn request the cycle wraps.
                if self.state.core.end_turn_requested {
                    self.advance_turn();
                } else {
                    self.enter_phase(Phase::Relic);
                }
            }
        }
        Ok(())
    }

    pub(crate) fn handle_end_turn(&mut self, actor: PlayerId) -> Result<(), ActionError> {
        if self.state.core.phase == Phase::Relic {
            self.require_relic_dust_done(actor)?;
        }

        self.sweep_to_discard(actor);

        // Every charging shield on the board flips face-up at end of turn.
        for seat in PlayerId::all(self.state.core.player_count()) {
            let flipped = {
                let state = self.state.core.player_mut(seat);
                match state.shield.as_mut() {
                    Some(slot) if slot.face == ShieldFace::Charging => {
                        slot.face = ShieldFace::Active;
                        Some(slot.card)
                    }
                    _ => None,
                }
            };
            if let Some(card) = flipped {
                let name = self.name_of(card);
                self.state.core.log_entry(seat, "Shield Active", name);
            }
        }

        let target = self.hand_target(actor);
        self.draw_to(actor, target);

        self.state.core.available_energy = 0;
        self.state.core.end_turn_requested = true;
        let turn = self.state.core.turn_number;
        self.state.core.log_entry(actor, "Ended Turn", format!("turn {turn} ended"));

        self.advance_turn();
        Ok(())
    }

    /// Pass control to the next seat, handling final-round countdown and
    /// terminal checks.
    pub(crate) fn advance_turn(&mut self) {
        self.state.core.end_turn_requested = false;
        let finished = self.state.core.current_player;

        if self.all_players_decked_out() {
            self.state
                .core
                .log_entry(finished, "Game Over", "all players are unable to draw");
            self.end_game();
            return;
        }

        if let Some(final_round) = self.state.core.final_round.clone() {
            if final_round.triggered_by != Some(finished) {
                let remaining = final_round.turns_remaining.saturating_sub(1);
                self.state.core.final_round.as_mut().expect("checked above").turns_remaining =
                    remaining;
                self.state
                    .core
                    .log_entry(finished, "Final Round", format!("{remaining} turn(s) remaining"));
                if remaining == 0 {
                    self.end_game();
                    return;
                }
            }
        }

        let count = self.state.core.player_count();
        let mut next = finished.next(count);
        let mut hops = 0;
        while self.state.core.player(next).eliminated {
            next = next.next(count);
            hops += 1;
            if hops >= count {
                self.end_game();
                return;
            }
        }

        self.state.core.turn_number += 1;
        self.begin_turn(next);
    }

    /// Reject phase-leaving actions while the relic dust requirement is
    /// unmet.
    pub(crate) fn require_relic_dust_done(&self, actor: PlayerId) -> Result<(), ActionError> {
        if self.state.core.player(actor).flags.must_dust_for_relic {
            Err(ActionError::MustDustFirst)
        } else {
            Ok(())
        }
    }

    /// Move hand and play area to the discard pile.
    pub(crate) fn sweep_to_discard(&mut self, player: PlayerId) {
        let state = self.state.core.player_mut(player);
        let mut swept: Vec<CardId> = state.hand.drain(..).collect();
        swept.extend(state.play_area.drain(..));
        state.discard.extend(swept);
    }

    /// End-of-turn hand refill target.
    pub(crate) fn hand_target(&self, player: PlayerId) -> usize {
        if self.owns_relic_power(player, RelicPower::ExpandedHand) {
            HAND_TARGET_EXPANDED
        } else {
            HAND_TARGET
        }
    }

    /// Hand minimum re-applied after being attacked on another's turn.
    pub(crate) fn hand_minimum(&self, player: PlayerId) -> usize {
        if self.owns_relic_power(player, RelicPower::HandFloor) {
            HAND_MINIMUM_RAISED
        } else {
            HAND_MINIMUM
        }
    }

    /// Draw one card, reshuffling the discard (relics excluded) when the
    /// deck runs dry. Returns whether a card was drawn; a failed draw checks
    /// the drawer for elimination.
    pub(crate) fn draw_card(&mut self, player: PlayerId) -> bool {
        if let Some(card) = self.state.core.player_mut(player).deck.pop() {
            self.state.core.player_mut(player).hand.push(card);
            return true;
        }

        let deckable: Vec<CardId> = {
            let state = self.state.core.player(player);
            state
                .discard
                .iter()
                .copied()
                .filter(|&card| !self.is_relic(card))
                .collect()
        };

        if deckable.is_empty() {
            self.check_elimination(player);
            return false;
        }

        let core = &mut self.state.core;
        core.players[player].discard.retain(|card| !deckable.contains(card));
        let mut deck = deckable;
        core.rng.shuffle(&mut deck);
        core.players[player].deck = deck;

        match self.state.core.player_mut(player).deck.pop() {
            Some(card) => {
                self.state.core.player_mut(player).hand.push(card);
                true
            }
            None => false,
        }
    }

    /// Draw until the hand holds `target` cards or no card can be drawn.
    pub(crate) fn draw_to(&mut self, player: PlayerId, target: usize) {
        while self.state.core.player(player).hand.len() < target {
            if !self.draw_card(player) {
                break;
            }
        }
    }

    pub(crate) fn is_relic(&self, card: CardId) -> bool {
        self.state
            .core
            .instance(card)
            .map(|instance| self.catalog.get(instance.archetype).is_relic())
            .unwrap_or(false)
    }

    fn player_decked_out(&self, player: PlayerId) -> bool {
        let state = self.state.core.player(player);
        state.deck.is_empty()
            && !state.discard.iter().any(|&card| !self.is_relic(card))
            && !state.hand.iter().any(|&card| !self.is_relic(card))
    }

    /// A player who cannot draw and has nothing to reshuffle is eliminated;
    /// their final score comes from relics alone.
    pub(crate) fn check_elimination(&mut self, player: PlayerId) {
        if self.state.core.player(player).eliminated || !self.player_decked_out(player) {
            return;
        }

        let relic_count = self.state.core.player(player).relic_count() as u32;
        let score = relic_count * crate::cards::RELIC_POINTS;
        let state = self.state.core.player_mut(player);
        state.eliminated = true;
        state.victory_points = score;

        self.state.core.log_entry(
            player,
            "Player Eliminated",
            format!("decked out; final score {score} VP from {relic_count} relic(s)"),
        );
    }

    fn all_players_decked_out(&self) -> bool {
        self.state
            .core
            .players
            .player_ids()
            .all(|player| self.player_decked_out(player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Action;

    #[test]
    fn test_skip_through_a_whole_turn() {
        let mut engine = GameEngine::new(2, 42);
        let p0 = PlayerId::new(0);

        // Fresh turn opens in Ally phase (no relics, no shield).
        assert_eq!(engine.core().phase, Phase::Ally);

        engine.apply(p0, Action::SkipPhase).unwrap();
        // Energy is transient: recompute, then straight to Acquisition.
        assert_eq!(engine.core().phase, Phase::Acquisition);

        engine.apply(p0, Action::SkipPhase).unwrap();
        assert_eq!(engine.core().phase, Phase::Discard);

        engine.apply(p0, Action::SkipPhase).unwrap();
        assert_eq!(engine.core().phase, Phase::Reset);

        engine.apply(p0, Action::SkipPhase).unwrap();
        assert_eq!(engine.core().phase, Phase::Dust);

        // No end-turn request: the cycle wraps back for the same player.
        engine.apply(p0, Action::SkipPhase).unwrap();
        assert_eq!(engine.core().phase, Phase::Ally);
        assert_eq!(engine.core().current_player, p0);
    }

    #[test]
    fn test_end_turn_rotates_and_refills() {
        let mut engine = GameEngine::new(3, 42);
        let p0 = PlayerId::new(0);

        engine.apply(p0, Action::EndTurn).unwrap();

        let core = engine.core();
        assert_eq!(core.current_player, PlayerId::new(1));
        assert_eq!(core.turn_number, 2);
        assert_eq!(core.available_energy, 0);
        assert_eq!(core.player(p0).hand.len(), HAND_TARGET);
        assert!(core.player(p0).play_area.is_empty());
    }

    #[test]
    fn test_end_turn_draw_reshuffles_discard() {
        let mut engine = GameEngine::new(2, 42);
        let p0 = PlayerId::new(0);

        // Force the deck empty: everything into the discard pile.
        {
            let state = engine.state.core.player_mut(p0);
            let mut cards: Vec<CardId> = state.deck.drain(..).collect();
            cards.extend(state.hand.drain(..));
            state.discard.extend(cards);
        }

        engine.apply(p0, Action::EndTurn).unwrap();

        let state = engine.core().player(p0);
        assert_eq!(state.hand.len(), HAND_TARGET);
        assert_eq!(state.deck.len() + state.hand.len() + state.discard.len(), 10);
    }

    #[test]
    fn test_rotation_skips_eliminated_players() {
        let mut engine = GameEngine::new(3, 42);
        engine.state.core.players[PlayerId::new(1)].eliminated = true;

        engine.apply(PlayerId::new(0), Action::EndTurn).unwrap();

        assert_eq!(engine.core().current_player, PlayerId::new(2));
    }

    #[test]
    fn test_draw_failure_eliminates() {
        let mut engine = GameEngine::new(2, 42);
        let p0 = PlayerId::new(0);

        {
            let state = engine.state.core.player_mut(p0);
            state.deck.clear();
            state.hand.clear();
            state.discard.clear();
        }

        assert!(!engine.draw_card(p0));
        assert!(engine.core().player(p0).eliminated);
        assert_eq!(engine.core().player(p0).victory_points, 0);
    }

    #[test]
    fn test_final_round_countdown_ends_game() {
        let mut engine = GameEngine::new(2, 42);
        engine.state.core.final_round = Some(crate::state::FinalRound {
            triggered_by: Some(PlayerId::new(0)),
            turns_remaining: 1,
        });

        // The trigger's own turn does not consume the countdown.
        engine.apply(PlayerId::new(0), Action::EndTurn).unwrap();
        assert!(!engine.core().game_over);

        engine.apply(PlayerId::new(1), Action::EndTurn).unwrap();
        assert!(engine.core().game_over);
    }
}
