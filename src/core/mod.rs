//! Core building blocks: player identity, deterministic RNG, the game log.

pub mod log;
pub mod player;
pub mod rng;

pub use log::{GameLog, LogEntry, LOG_CAPACITY};
pub use player::{PlayerId, PlayerMap, MAX_PLAYERS, MIN_PLAYERS};
pub use rng::GameRng;
