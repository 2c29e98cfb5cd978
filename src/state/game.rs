//! Full game state: the mutable core plus the bounded undo history.
//!
//! ## CoreState
//!
//! Everything a snapshot must capture: players, the canonical card instance
//! table, market and relic row, the Dust, energy, turn/phase position, final
//! round bookkeeping, the pending record, the log, and the RNG position.
//!
//! ## GameState
//!
//! `CoreState` plus the bounded snapshot history. The history is excluded
//! from snapshots (a snapshot is one `CoreState`) but included in the
//! serialized shape, so a persisted match restores with its undo depth
//! intact.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{CardFactory, CardId, CardInstance};
use crate::core::{GameLog, GameRng, PlayerId, PlayerMap};

use super::market::{Market, RelicRow};
use super::pending::{Authorization, Pending};
use super::phase::Phase;
use super::player::PlayerState;

/// Maximum retained undo snapshots.
pub const HISTORY_CAPACITY: usize = 10;

/// Final-round countdown, set by an end-game trigger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalRound {
    /// The player whose action triggered the final round. `None` for the
    /// all-players-decked-out edge case.
    pub triggered_by: Option<PlayerId>,
    /// Turns left before scoring; every player except the trigger gets one.
    pub turns_remaining: u8,
}

/// The mutable portion of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreState {
    pub players: PlayerMap<PlayerState>,
    /// Canonical instance table. Zones hold ids that key into this map.
    pub cards: FxHashMap<CardId, CardInstance>,
    pub market: Market,
    pub relic_row: RelicRow,
    /// Shared Dust pile: removed from circulation, never reshuffled.
    pub dust: Vec<CardId>,
    /// The current turn's spendable energy pool.
    pub available_energy: u32,
    pub phase: Phase,
    pub turn_number: u32,
    pub current_player: PlayerId,
    /// Set by the End Turn action; consumed by the Dust phase safety net.
    pub end_turn_requested: bool,
    pub final_round: Option<FinalRound>,
    pub game_over: bool,
    /// The one outstanding interrupt, if any.
    pub pending: Option<Pending>,
    pub log: GameLog,
    pub rng: GameRng,
    /// Mints instance ids; serialized so restored matches keep ids unique.
    pub factory: CardFactory,
}

impl CoreState {
    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// A player's state.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &PlayerState {
        &self.players[id]
    }

    /// A player's state, mutably.
    pub fn player_mut(&mut self, id: PlayerId) -> &mut PlayerState {
        &mut self.players[id]
    }

    /// A card instance by id.
    #[must_use]
    pub fn instance(&self, id: CardId) -> Option<&CardInstance> {
        self.cards.get(&id)
    }

    /// Non-eliminated opponents of `player`, in rotation order starting
    /// after them.
    #[must_use]
    pub fn opponents_of(&self, player: PlayerId) -> Vec<PlayerId> {
        let count = self.player_count();
        let mut out = Vec::with_capacity(count - 1);
        let mut seat = player.next(count);
        while seat != player {
            if !self.players[seat].eliminated {
                out.push(seat);
            }
            seat = seat.next(count);
        }
        out
    }

    /// The explicit two-role authorization view: the turn player, plus the
    /// pending record's actor when an interrupt re-routes authorization.
    #[must_use]
    pub fn authorization(&self) -> Authorization {
        let interrupt = self
            .pending
            .as_ref()
            .map(Pending::actor)
            .filter(|&actor| actor != self.current_player);
        Authorization {
            primary: self.current_player,
            interrupt,
        }
    }

    /// Append a log entry attributed to `player`.
    pub fn log_entry(&mut self, player: PlayerId, action: &str, detail: impl Into<String>) {
        let turn = self.turn_number;
        self.log.push(turn, player, action, detail);
    }
}

/// `CoreState` plus the undo history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub core: CoreState,
    /// Bounded snapshot stack, oldest first.
    pub history: Vector<CoreState>,
}

impl GameState {
    /// Wrap a fresh core with an empty history.
    #[must_use]
    pub fn new(core: CoreState) -> Self {
        Self {
            core,
            history: Vector::new(),
        }
    }

    /// Push a snapshot, evicting the oldest past capacity.
    pub fn push_snapshot(&mut self, snapshot: CoreState) {
        self.history.push_back(snapshot);
        while self.history.len() > HISTORY_CAPACITY {
            self.history.pop_front();
        }
    }

    /// Pop the most recent snapshot and replace the core wholesale.
    ///
    /// Returns false when no history remains. The popped history stays
    /// available for further undos up to its remaining depth.
    pub fn undo(&mut self) -> bool {
        match self.history.pop_back() {
            Some(snapshot) => {
                self.core = snapshot;
                true
            }
            None => false,
        }
    }

    /// Remaining undo depth.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }
}
