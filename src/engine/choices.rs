//! Resolution handlers for the remaining pending choices, and the host's
//! default-resolution escape hatch for stuck records.

use smallvec::smallvec;

use crate::cards::CardId;
use crate::core::PlayerId;
use crate::error::ActionError;
use crate::state::{Pending, PendingChoice};

use super::{GameEngine, PeekDecision};

impl GameEngine {
    pub(crate) fn handle_discard_fragment(
        &mut self,
        actor: PlayerId,
        card: CardId,
    ) -> Result<(), ActionError> {
        let Some(Pending::Choice(PendingChoice::DiscardFragmentForBonus { player, source, bonus })) =
            self.state.core.pending.clone()
        else {
            return Err(ActionError::NoPendingDecision);
        };
        debug_assert_eq!(actor, player);

        if !self.state.core.player(player).hand.contains(&card) || !self.is_fusion_fragment(card) {
            return Err(ActionError::InvalidSelection);
        }

        let state = self.state.core.player_mut(player);
        state.remove_from_hand(card);
        state.discard.push(card);
        self.state.core.available_energy += bonus;
        self.state.core.pending = None;

        let name = self.name_of(source);
        let total = self.state.core.available_energy;
        self.state.core.log_entry(
            player,
            "Card Ability",
            format!("{name}: fragment discarded for +{bonus} energy ({total} total)"),
        );
        Ok(())
    }

    pub(crate) fn handle_decline_fragment(&mut self, _actor: PlayerId) -> Result<(), ActionError> {
        self.state.core.pending = None;
        Ok(())
    }

    pub(crate) fn handle_choose_opponent(
        &mut self,
        actor: PlayerId,
        chosen: PlayerId,
    ) -> Result<(), ActionError> {
        let Some(Pending::Choice(PendingChoice::SelectOpponent { attacker, source, attack })) =
            self.state.core.pending.clone()
        else {
            return Err(ActionError::NoPendingDecision);
        };
        debug_assert_eq!(actor, attacker);

        if !self.state.core.opponents_of(attacker).contains(&chosen) {
            return Err(ActionError::InvalidSelection);
        }

        self.state.core.pending = None;
        self.advance_attack_queue(attacker, source, attack.effect, attack.draws, smallvec![chosen]);
        Ok(())
    }

    pub(crate) fn handle_choose_attack(&mut self, actor: PlayerId) -> Result<(), ActionError> {
        let Some(Pending::Choice(PendingChoice::AttackOrRetrieve { player, source, attack })) =
            self.state.core.pending.clone()
        else {
            return Err(ActionError::NoPendingDecision);
        };
        debug_assert_eq!(actor, player);

        self.state.core.pending = None;
        self.launch_attack(player, source, attack, None);
        Ok(())
    }

    pub(crate) fn handle_choose_retrieve(
        &mut self,
        actor: PlayerId,
        card: CardId,
    ) -> Result<(), ActionError> {
        match self.state.core.pending.clone() {
            Some(Pending::Choice(PendingChoice::AttackOrRetrieve { player, source, .. })) => {
                debug_assert_eq!(actor, player);
                if !self.state.core.dust.contains(&card) || self.is_relic(card) {
                    return Err(ActionError::InvalidSelection);
                }
                self.retrieve_to_hand(player, source, card);
                Ok(())
            }
            Some(Pending::Choice(PendingChoice::RetrieveFromDust { player, source, candidates })) => {
                debug_assert_eq!(actor, player);
                if !candidates.contains(&card) {
                    return Err(ActionError::InvalidSelection);
                }
                self.retrieve_to_hand(player, source, card);
                Ok(())
            }
            _ => Err(ActionError::NoPendingDecision),
        }
    }

    fn retrieve_to_hand(&mut self, player: PlayerId, source: CardId, card: CardId) {
        self.state.core.dust.retain(|&c| c != card);
        self.state.core.player_mut(player).hand.push(card);
        self.state.core.pending = None;

        let source_name = self.name_of(source);
        let card_name = self.name_of(card);
        self.state.core.log_entry(
            player,
            "Retrieved Card",
            format!("{source_name}: {card_name} taken from the Dust"),
        );
    }

    pub(crate) fn handle_decide_top_card(
        &mut self,
        actor: PlayerId,
        decision: PeekDecision,
    ) -> Result<(), ActionError> {
        let Some(Pending::Choice(PendingChoice::PeekTopCard { player, source, card })) =
            self.state.core.pending.clone()
        else {
            return Err(ActionError::NoPendingDecision);
        };
        debug_assert_eq!(actor, player);

        let source_name = self.name_of(source);
        let card_name = self.name_of(card);
        match decision {
            PeekDecision::Dust => {
                let top = self.state.core.player_mut(player).deck.pop();
                debug_assert_eq!(top, Some(card));
                self.state.core.dust.push(card);
                self.state.core.log_entry(
                    player,
                    "Relic Power",
                    format!("{source_name}: {card_name} dusted from the deck top"),
                );
            }
            PeekDecision::Discard => {
                let top = self.state.core.player_mut(player).deck.pop();
                debug_assert_eq!(top, Some(card));
                self.state.core.player_mut(player).discard.push(card);
                self.state.core.log_entry(
                    player,
                    "Relic Power",
                    format!("{source_name}: {card_name} discarded from the deck top"),
                );
            }
            PeekDecision::Keep => {
                self.state.core.log_entry(
                    player,
                    "Relic Power",
                    format!("{source_name}: deck top kept"),
                );
            }
        }

        self.state.core.pending = None;
        self.draw_card(player);
        Ok(())
    }

    pub(crate) fn handle_recall_card(
        &mut self,
        actor: PlayerId,
        card: CardId,
    ) -> Result<(), ActionError> {
        let Some(Pending::Choice(PendingChoice::RecallFromDiscard { player, source })) =
            self.state.core.pending.clone()
        else {
            return Err(ActionError::NoPendingDecision);
        };
        debug_assert_eq!(actor, player);

        if !self.state.core.player(player).discard.contains(&card) {
            return Err(ActionError::CardNotInZone);
        }

        let state = self.state.core.player_mut(player);
        state.remove_from_discard(card);
        state.deck.push(card);
        self.state.core.pending = None;

        let source_name = self.name_of(source);
        let card_name = self.name_of(card);
        self.state.core.log_entry(
            player,
            "Relic Power",
            format!("{source_name}: {card_name} recalled to the deck top"),
        );
        Ok(())
    }

    /// Host-invoked escape hatch for a stuck pending record (disconnect,
    /// deadline): resolve one outstanding record with its most conservative
    /// legal outcome. Optional offers decline, selections take the first
    /// candidate, attacks are taken losing the first hand card. Returns
    /// whether a record was resolved; call again if a chained record
    /// follows.
    ///
    /// This is deliberately not an [`Action`](super::Action): players cannot
    /// issue it.
    pub fn resolve_pending_default(&mut self) -> bool {
        let Some(pending) = self.state.core.pending.clone() else {
            return false;
        };
        let snapshot = self.state.core.clone();

        let actor = pending.actor();
        let resolved = match pending {
            Pending::Attack(_) => {
                if self.handle_take_hit(actor).is_err() {
                    false
                } else if let Some(Pending::Choice(PendingChoice::LoseCard { victim, .. })) =
                    self.state.core.pending.clone()
                {
                    // Taking the hit chained into a lose-card choice.
                    let card = self.state.core.player(victim).hand[0];
                    self.handle_surrender_card(victim, card).is_ok()
                } else {
                    true
                }
            }
            Pending::Choice(choice) => match choice {
                PendingChoice::DiscardFragmentForBonus { .. } => {
                    self.handle_decline_fragment(actor).is_ok()
                }
                PendingChoice::PeekTopCard { .. } => {
                    self.handle_decide_top_card(actor, PeekDecision::Keep).is_ok()
                }
                PendingChoice::RecallFromDiscard { player, .. } => {
                    let card = self.state.core.player(player).discard[0];
                    self.handle_recall_card(player, card).is_ok()
                }
                PendingChoice::RetrieveFromDust { candidates, .. } => {
                    self.handle_choose_retrieve(actor, candidates[0]).is_ok()
                }
                PendingChoice::RecruitAllies { .. } => self.handle_finish_recruiting(actor).is_ok(),
                PendingChoice::AttackOrRetrieve { player, source, .. } => {
                    // Retrieving is the harmless half; fall back to it when
                    // the Dust offers anything.
                    let candidate = self
                        .state
                        .core
                        .dust
                        .iter()
                        .copied()
                        .find(|&card| !self.is_relic(card));
                    match candidate {
                        Some(card) => self.handle_choose_retrieve(player, card).is_ok(),
                        None => self.handle_choose_attack(player).is_ok(),
                    }
                }
                PendingChoice::SelectOpponent { attacker, .. } => {
                    let first = self.state.core.opponents_of(attacker)[0];
                    self.handle_choose_opponent(attacker, first).is_ok()
                }
                PendingChoice::LoseCard { victim, .. } => {
                    let card = self.state.core.player(victim).hand[0];
                    self.handle_surrender_card(victim, card).is_ok()
                }
            },
        };

        if resolved {
            self.state.push_snapshot(snapshot);
            self.state
                .core
                .log_entry(actor, "Default Resolution", "pending decision resolved by the host");
        } else {
            self.state.core = snapshot;
        }
        resolved
    }
}
