//! Per-player mutable state.
//!
//! Every zone holds card ids; the cards themselves live in the state's
//! canonical instance table. A card id appears in exactly one zone at a
//! time — zone transfers move the id, never copy it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardId;

/// Active relic cap.
pub const MAX_ACTIVE_RELICS: usize = 2;

/// Default end-of-turn hand refill target.
pub const HAND_TARGET: usize = 5;

/// Hand refill target with the hand-expanding relic.
pub const HAND_TARGET_EXPANDED: usize = 6;

/// Hand minimum enforced after being attacked on another player's turn.
pub const HAND_MINIMUM: usize = 3;

/// Hand minimum with the hand-floor relic.
pub const HAND_MINIMUM_RAISED: usize = 4;

/// Shield slot orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShieldFace {
    /// Played this turn; contributes nothing and cannot block yet.
    Charging,
    /// Face-up: may block one attack and contributes its energy.
    Active,
}

/// The single shield slot: at most one shield-capable ally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldSlot {
    pub card: CardId,
    pub face: ShieldFace,
}

impl ShieldSlot {
    /// Whether the shield is face-up.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.face == ShieldFace::Active
    }
}

/// Per-turn flags, reset when the owner's turn begins.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnFlags {
    /// The once-per-turn dust has been used.
    pub dusted_this_turn: bool,
    /// Relic owners must dust one hand card before leaving Relic phase.
    pub must_dust_for_relic: bool,
    /// Ally actions remaining (1, or 2 with the second-action relic).
    pub ally_actions: u8,
    /// The next Powerful ally played is treated as Efficient.
    pub next_powerful_is_efficient: bool,
    /// An ally has already been played this turn (first-ally relic effects).
    pub first_ally_played: bool,
    /// The once-per-round satellite block has been spent.
    pub satellite_block_used: bool,
    /// Active relics whose triggered power already fired this turn.
    pub relics_used: SmallVec<[CardId; 2]>,
}

/// One player's zones and per-turn state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Draw pile; the top of the deck is the last element.
    pub deck: Vec<CardId>,
    /// Hand. Order carries no rules meaning but stays stable for display.
    pub hand: Vec<CardId>,
    /// Discard pile; refill source for the deck.
    pub discard: Vec<CardId>,
    /// Cards committed this turn; swept to discard at turn end.
    pub play_area: Vec<CardId>,
    /// The single shield slot.
    pub shield: Option<ShieldSlot>,
    /// Acquired, dormant relics.
    pub relics: Vec<CardId>,
    /// Active relics (at most [`MAX_ACTIVE_RELICS`]).
    pub active_relics: Vec<CardId>,
    /// Per-turn flags.
    pub flags: TurnFlags,
    /// Terminal per-player state: unable to draw with nothing to reshuffle.
    pub eliminated: bool,
    /// Final score, set at elimination or game end.
    pub victory_points: u32,
}

impl PlayerState {
    /// Total relics owned (dormant + active).
    #[must_use]
    pub fn relic_count(&self) -> usize {
        self.relics.len() + self.active_relics.len()
    }

    /// Remove a card id from the hand. Returns whether it was present.
    pub fn remove_from_hand(&mut self, card: CardId) -> bool {
        if let Some(pos) = self.hand.iter().position(|&c| c == card) {
            self.hand.remove(pos);
            true
        } else {
            false
        }
    }

    /// Remove a card id from the discard pile. Returns whether it was present.
    pub fn remove_from_discard(&mut self, card: CardId) -> bool {
        if let Some(pos) = self.discard.iter().position(|&c| c == card) {
            self.discard.remove(pos);
            true
        } else {
            false
        }
    }

    /// Iterate every card id this player holds in any zone.
    pub fn all_cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.deck
            .iter()
            .chain(self.hand.iter())
            .chain(self.discard.iter())
            .chain(self.play_area.iter())
            .chain(self.relics.iter())
            .chain(self.active_relics.iter())
            .copied()
            .chain(self.shield.iter().map(|s| s.card))
    }
}
