//! Energy accounting.
//!
//! The spendable pool is recomputed from scratch at the Energy phase
//! boundary rather than trusted across phases: Energy Cells and allies in
//! the play area, active relics, and a face-up shield each contribute their
//! fixed amounts. A charging shield contributes nothing. Purchases decrement
//! the live pool directly; recomputation would erase mid-phase spends, so it
//! only happens at the phase transition.

use crate::cards::{CardId, Catalog};
use crate::core::PlayerId;
use crate::state::CoreState;

/// Recompute the turn's spendable energy for `player`.
///
/// Pure with respect to the state: calling it twice without intervening
/// mutation yields the same value.
#[must_use]
pub fn recompute_energy(catalog: &Catalog, state: &CoreState, player: PlayerId) -> u32 {
    let contribution = |card: CardId| -> u32 {
        state
            .instance(card)
            .map(|instance| catalog.get(instance.archetype).energy())
            .unwrap_or(0)
    };

    let player_state = state.player(player);

    let play_area: u32 = player_state.play_area.iter().copied().map(contribution).sum();
    let relics: u32 = player_state.active_relics.iter().copied().map(contribution).sum();
    let shield: u32 = player_state
        .shield
        .as_ref()
        .filter(|slot| slot.is_active())
        .map(|slot| contribution(slot.card))
        .unwrap_or(0);

    play_area + relics + shield
}
