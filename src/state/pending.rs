//! Pending records: the authorization interrupts.
//!
//! Normally only the current-turn player may act. While a pending record is
//! outstanding, exactly the player it names gains authorization for the
//! record's response moves, and everyone else is rejected. The single
//! `Option<Pending>` field on the state makes "at most one of
//! {PendingChoice, PendingAttack}" structural rather than checked.
//!
//! Each variant carries exactly the fields its resolution needs; there are
//! no optional fields that are "only valid for some tags".

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{AttackAbility, AttackEffect, CardId};
use crate::core::PlayerId;

/// Opponent queue carried by sequential attack effects (at most 3 opponents).
pub type OpponentQueue = SmallVec<[PlayerId; 3]>;

/// A decision owed by a specific player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingChoice {
    /// Optionally discard a Fusion Fragment for bonus energy.
    DiscardFragmentForBonus {
        player: PlayerId,
        source: CardId,
        bonus: u32,
    },

    /// Looking at the top deck card: dust it, discard it, or keep it.
    PeekTopCard {
        player: PlayerId,
        source: CardId,
        card: CardId,
    },

    /// Pick a discard-pile card to put on top of the deck.
    RecallFromDiscard { player: PlayerId, source: CardId },

    /// Pick one of the listed Dust cards to take into hand.
    RetrieveFromDust {
        player: PlayerId,
        source: CardId,
        candidates: SmallVec<[CardId; 8]>,
    },

    /// Recruit market allies while budget remains.
    RecruitAllies {
        player: PlayerId,
        source: CardId,
        budget: u32,
    },

    /// The attacker chooses between the attack and retrieving from the Dust.
    AttackOrRetrieve {
        player: PlayerId,
        source: CardId,
        attack: AttackAbility,
    },

    /// The attacker picks which opponent to target (3-4 player games).
    SelectOpponent {
        attacker: PlayerId,
        source: CardId,
        attack: AttackAbility,
    },

    /// The victim picks which card to lose to an unblockable (or unblocked)
    /// attack. `remaining` chains further victims of all-opponent effects.
    LoseCard {
        victim: PlayerId,
        attacker: PlayerId,
        source: CardId,
        effect: AttackEffect,
        draws: u8,
        remaining: OpponentQueue,
    },
}

impl PendingChoice {
    /// The player authorized to resolve this choice.
    #[must_use]
    pub fn actor(&self) -> PlayerId {
        match self {
            PendingChoice::DiscardFragmentForBonus { player, .. }
            | PendingChoice::PeekTopCard { player, .. }
            | PendingChoice::RecallFromDiscard { player, .. }
            | PendingChoice::RetrieveFromDust { player, .. }
            | PendingChoice::RecruitAllies { player, .. }
            | PendingChoice::AttackOrRetrieve { player, .. } => *player,
            PendingChoice::SelectOpponent { attacker, .. } => *attacker,
            PendingChoice::LoseCard { victim, .. } => *victim,
        }
    }
}

/// An attack awaiting the target's block-or-take decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAttack {
    pub attacker: PlayerId,
    pub target: PlayerId,
    /// The card whose ability launched the attack.
    pub source: CardId,
    pub effect: AttackEffect,
    /// Attacker draws owed once the whole opponent queue is processed.
    pub draws: u8,
    /// The target's once-per-round satellite block is still available.
    pub satellite_eligible: bool,
    /// Further victims of an all-opponents effect.
    pub remaining: OpponentQueue,
}

/// The one outstanding interrupt, if any.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pending {
    Choice(PendingChoice),
    Attack(PendingAttack),
}

impl Pending {
    /// The player temporarily authorized to act.
    #[must_use]
    pub fn actor(&self) -> PlayerId {
        match self {
            Pending::Choice(choice) => choice.actor(),
            Pending::Attack(attack) => attack.target,
        }
    }
}

/// The explicit two-role authorization view of the state machine.
///
/// `primary` is the current-turn player; `interrupt`, when set, is the only
/// player allowed to act, and only with the pending record's response moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    pub primary: PlayerId,
    pub interrupt: Option<PlayerId>,
}

impl Authorization {
    /// The player currently allowed to submit actions.
    #[must_use]
    pub fn acting(&self) -> PlayerId {
        self.interrupt.unwrap_or(self.primary)
    }
}
