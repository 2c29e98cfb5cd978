//! Per-player redacted state projections.
//!
//! Hands and decks are private; everything else (discard piles, play areas,
//! shields, relics, market, Dust, log) is public and passes through
//! verbatim. An observer with no player identity sees the unredacted state.

use crate::core::PlayerId;
use crate::state::CoreState;

use super::GameEngine;

impl GameEngine {
    /// A projection of the state for `viewer`.
    ///
    /// With `Some(player)`, every *other* player's hand and deck are cleared;
    /// with `None` (observer) the full state is returned. The undo history is
    /// never part of a view.
    #[must_use]
    pub fn view_for(&self, viewer: Option<PlayerId>) -> CoreState {
        let mut view = self.state.core.clone();

        if let Some(viewer) = viewer {
            for seat in PlayerId::all(view.player_count()) {
                if seat != viewer {
                    let hidden = view.player_mut(seat);
                    hidden.hand.clear();
                    hidden.deck.clear();
                }
            }
        }

        view
    }
}
