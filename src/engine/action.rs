//! The action surface.
//!
//! Every inbound move is one `Action` variant with a typed payload. The
//! engine validates the requesting player against the current authorization
//! (turn player, or the pending record's actor) before dispatching.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::PlayerId;

/// What to do with a peeked top-of-deck card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeekDecision {
    /// Remove it from circulation.
    Dust,
    /// Move it to the discard pile.
    Discard,
    /// Leave it on top of the deck.
    Keep,
}

/// A named move with its payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Action {
    /// Play a card from hand; `as_shield` installs a shield-capable ally in
    /// the shield slot instead of the play area.
    PlayCard { card: CardId, as_shield: bool },
    /// Play every Energy Cell in hand at once.
    PlayAllEnergyCells,
    /// Buy the top card of a market stack.
    BuyCard { stack: usize },
    /// Buy the revealed relic of a relic pile.
    AcquireRelic { pile: usize },
    /// Commit a dormant relic to an active slot (at most two active).
    ActivateRelic { relic: CardId },
    /// Trigger an active relic's power (once per relic per turn).
    UseRelic { relic: CardId },
    /// Dust a card from hand (once per turn; also satisfies the relic
    /// requirement).
    DustCard { card: CardId },
    /// Explicitly advance past the current phase.
    SkipPhase,
    /// End the turn from any phase.
    EndTurn,
    /// Restore the previous snapshot.
    Undo,

    // === Attack responses (PendingAttack) ===
    /// Block with the face-up shield, or the satellite if no shield can.
    BlockWithShield,
    /// Decline to block; pick which card to lose next.
    TakeHit,

    // === Choice responses (PendingChoice) ===
    /// Discard the given Fusion Fragment for the offered bonus.
    DiscardFragment { card: CardId },
    /// Decline the fragment-for-energy offer.
    DeclineFragment,
    /// Pick the opponent a single-target attack hits.
    ChooseOpponent { player: PlayerId },
    /// Give up the chosen card to an attack (discard or dust per effect).
    SurrenderCard { card: CardId },
    /// Attack-or-retrieve: take the attack half.
    ChooseAttack,
    /// Retrieve the chosen card from the Dust.
    ChooseRetrieve { card: CardId },
    /// Resolve the peeked top-of-deck card.
    DecideTopCard { decision: PeekDecision },
    /// Move the chosen discard-pile card to the top of the deck.
    RecallCard { card: CardId },
    /// Recruit the top card of the given ally stack (budgeted).
    RecruitAlly { stack: usize },
    /// Stop recruiting.
    FinishRecruiting,
}

impl Action {
    /// Whether this action only makes sense as a pending-record response.
    #[must_use]
    pub fn is_response(&self) -> bool {
        matches!(
            self,
            Action::BlockWithShield
                | Action::TakeHit
                | Action::DiscardFragment { .. }
                | Action::DeclineFragment
                | Action::ChooseOpponent { .. }
                | Action::SurrenderCard { .. }
                | Action::ChooseAttack
                | Action::ChooseRetrieve { .. }
                | Action::DecideTopCard { .. }
                | Action::RecallCard { .. }
                | Action::RecruitAlly { .. }
                | Action::FinishRecruiting
        )
    }

    /// Short label for the game log.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Action::PlayCard { .. } => "Play Card",
            Action::PlayAllEnergyCells => "Play All Energy Cells",
            Action::BuyCard { .. } => "Buy Card",
            Action::AcquireRelic { .. } => "Acquire Relic",
            Action::ActivateRelic { .. } => "Activate Relic",
            Action::UseRelic { .. } => "Use Relic",
            Action::DustCard { .. } => "Dust Card",
            Action::SkipPhase => "Skip Phase",
            Action::EndTurn => "End Turn",
            Action::Undo => "Undo",
            Action::BlockWithShield => "Block",
            Action::TakeHit => "Take Hit",
            Action::DiscardFragment { .. } => "Discard Fragment",
            Action::DeclineFragment => "Decline Fragment",
            Action::ChooseOpponent { .. } => "Choose Opponent",
            Action::SurrenderCard { .. } => "Surrender Card",
            Action::ChooseAttack => "Choose Attack",
            Action::ChooseRetrieve { .. } => "Choose Retrieve",
            Action::DecideTopCard { .. } => "Decide Top Card",
            Action::RecallCard { .. } => "Recall Card",
            Action::RecruitAlly { .. } => "Recruit Ally",
            Action::FinishRecruiting => "Finish Recruiting",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_classification() {
        assert!(Action::BlockWithShield.is_response());
        assert!(Action::SurrenderCard { card: CardId::new(1) }.is_response());
        assert!(!Action::EndTurn.is_response());
        assert!(!Action::PlayCard {
            card: CardId::new(1),
            as_shield: false
        }
        .is_response());
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::PlayCard {
            card: CardId::new(12),
            as_shield: true,
        };
        let json = serde_json::to_string(&action).unwrap();
        let restored: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, restored);

        // Tagged representation keeps the wire format self-describing.
        assert!(json.contains("\"kind\""));
    }
}
