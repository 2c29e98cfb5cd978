//! Error taxonomy for rejected actions.
//!
//! Every action handler returns `Result<(), ActionError>`. A rejection
//! leaves the authoritative state untouched; elimination and game over are
//! modeled as transitions, not errors.

use crate::core::PlayerId;
use thiserror::Error;

/// A rejected action. All variants are non-fatal: the engine rejects the
/// action and leaves state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The requesting player is not currently authorized to act.
    #[error("player {0:?} is not authorized to act")]
    NotAuthorized(PlayerId),

    /// The action is not legal in the current phase.
    #[error("action not legal in the current phase")]
    WrongPhase,

    /// The referenced card id is not present in the canonical table.
    #[error("unknown card id {0}")]
    UnknownCard(u32),

    /// The referenced card is not in the zone the action requires.
    #[error("card is not in the required zone")]
    CardNotInZone,

    /// The player lacks the energy to pay a cost.
    #[error("insufficient energy: need {need}, have {have}")]
    InsufficientEnergy { need: u32, have: u32 },

    /// The targeted market/relic stack is empty.
    #[error("stack is empty")]
    EmptyStack,

    /// There is no pending decision to respond to.
    #[error("no pending decision")]
    NoPendingDecision,

    /// A pending decision exists, but not of the kind this action answers.
    #[error("wrong pending decision for this action")]
    WrongPendingDecision,

    /// The player has no shield available to block with.
    #[error("no shield available")]
    NoShield,

    /// The action has already been used this turn.
    #[error("action already exhausted this turn")]
    ActionExhausted,

    /// A dust action must be performed before this one.
    #[error("must dust first")]
    MustDustFirst,

    /// The card has already been dusted.
    #[error("already dusted")]
    AlreadyDusted,

    /// The relic acquisition limit has been reached.
    #[error("relic limit reached")]
    RelicLimit,

    /// The selection is not valid for the current decision.
    #[error("invalid selection")]
    InvalidSelection,

    /// There is no history entry to undo to.
    #[error("no history to undo")]
    NoHistory,

    /// The game is over; no further actions are accepted.
    #[error("game is over")]
    GameOver,
}
