//! # dust-engine
//!
//! Authoritative rules engine for a turn-based, 2-4 player deck-building
//! card game: players buy from a shared market, build an engine of
//! energy-producing and attacking allies, defend with a single shield slot,
//! and race end-game triggers for victory points.
//!
//! ## Design
//!
//! 1. **Single writer**: all mutations flow through [`GameEngine::apply`],
//!    one action at a time. The only concurrency is *authorization
//!    multiplexing*: a pending record temporarily re-routes the right to act
//!    to the player it names.
//!
//! 2. **Ids, not references**: card instances live in one canonical table;
//!    every zone holds ids. A card is in exactly one zone at any time.
//!
//! 3. **Closed ability enums**: card behavior is an exhaustive match over
//!    typed variants; there is no free-text dispatch and no unhandled
//!    fallthrough.
//!
//! 4. **Reject, don't fault**: illegal actions return [`ActionError`] and
//!    leave state untouched. Elimination and game over are transitions, not
//!    errors.
//!
//! ## Modules
//!
//! - `core`: player ids, deterministic RNG, the bounded game log
//! - `cards`: archetypes, abilities, relic powers, the catalog and factory
//! - `state`: zones, market, pending interrupts, the serializable state
//! - `engine`: the phase machine, resolvers, market, undo, scoring, views
//!
//! ## External contract
//!
//! The engine receives a named [`Action`] plus the requesting [`PlayerId`]
//! and either mutates the authoritative state or rejects. Rendering,
//! transport, and persistence are external; per-player redaction comes from
//! [`GameEngine::view_for`], and the whole [`GameState`] round-trips through
//! serde.

pub mod cards;
pub mod core;
pub mod engine;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use crate::core::{GameLog, GameRng, LogEntry, PlayerId, PlayerMap, MAX_PLAYERS, MIN_PLAYERS};

pub use crate::cards::{
    Ability, AllyRank, AllySpec, Archetype, ArchetypeId, AttackAbility, AttackEffect, AttackScope,
    CardFactory, CardId, CardInstance, CardKind, Catalog, RelicPower, RelicSpec, ResourceKind,
    RELIC_COST, RELIC_POINTS,
};

pub use crate::state::{
    Authorization, CoreState, FinalRound, GameState, Market, MarketStack, Pending, PendingAttack,
    PendingChoice, Phase, PlayerState, RelicRow, ShieldFace, ShieldSlot, TurnFlags,
    HISTORY_CAPACITY,
};

pub use crate::engine::score::GameResult;
pub use crate::engine::{Action, GameBuilder, GameEngine, PeekDecision};

pub use crate::error::ActionError;
