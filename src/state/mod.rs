//! Game state: zones, market, pending interrupts, phases, and the full
//! serializable match state.

pub mod game;
pub mod market;
pub mod pending;
pub mod phase;
pub mod player;

pub use game::{CoreState, FinalRound, GameState, HISTORY_CAPACITY};
pub use market::{
    Market, MarketStack, RelicRow, FINAL_ROUND_EMPTY_STACKS, MARKET_STACKS, RELIC_PILES,
    RELIC_PILE_SIZE,
};
pub use pending::{Authorization, OpponentQueue, Pending, PendingAttack, PendingChoice};
pub use phase::Phase;
pub use player::{
    PlayerState, ShieldFace, ShieldSlot, TurnFlags, HAND_MINIMUM, HAND_MINIMUM_RAISED, HAND_TARGET,
    HAND_TARGET_EXPANDED, MAX_ACTIVE_RELICS,
};
