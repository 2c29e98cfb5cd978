//! The per-turn phase cycle.

use serde::{Deserialize, Serialize};

/// Phases of one player's turn, in fixed cyclic order.
///
/// Relic and Shield auto-skip when the player owns no relics or has no
/// shield; Energy is transient (recompute, then advance); Dust is the
/// terminal phase of the cycle and either ends the turn or wraps back to
/// Relic for the same player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Relic,
    Shield,
    Ally,
    Energy,
    Acquisition,
    Discard,
    Reset,
    Dust,
}

impl Phase {
    /// The phase that follows this one within the same turn. `Dust` wraps
    /// back to `Relic`.
    #[must_use]
    pub fn next(self) -> Phase {
        match self {
            Phase::Relic => Phase::Shield,
            Phase::Shield => Phase::Ally,
            Phase::Ally => Phase::Energy,
            Phase::Energy => Phase::Acquisition,
            Phase::Acquisition => Phase::Discard,
            Phase::Discard => Phase::Reset,
            Phase::Reset => Phase::Dust,
            Phase::Dust => Phase::Relic,
        }
    }

    /// Phases in which cards may be played at all.
    #[must_use]
    pub fn allows_card_play(self) -> bool {
        matches!(self, Phase::Relic | Phase::Shield | Phase::Ally | Phase::Energy)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Relic => "Relic",
            Phase::Shield => "Shield",
            Phase::Ally => "Ally",
            Phase::Energy => "Energy",
            Phase::Acquisition => "Acquisition",
            Phase::Discard => "Discard",
            Phase::Reset => "Reset",
            Phase::Dust => "Dust",
        };
        f.write_str(name)
    }
}
