//! In-state game log.
//!
//! Append-only record of player-visible events, bounded to the most recent
//! 200 entries. The log is part of the serialized state and is shown to all
//! players verbatim; it is separate from the `log` crate diagnostics the
//! engine also emits.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Maximum retained log entries.
pub const LOG_CAPACITY: usize = 200;

/// One logged event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Turn number when the event happened.
    pub turn: u32,
    /// The acting player.
    pub player: PlayerId,
    /// Short action label ("Played Ally", "Bought Card", ...).
    pub action: String,
    /// Free-text detail.
    pub detail: String,
    /// Wall-clock milliseconds at append time. Bookkeeping only; no game
    /// logic reads this.
    pub timestamp_ms: u64,
}

/// Bounded append-only event log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLog {
    entries: Vector<LogEntry>,
}

impl GameLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, evicting the oldest past capacity.
    pub fn push(&mut self, turn: u32, player: PlayerId, action: impl Into<String>, detail: impl Into<String>) {
        let timestamp_ms = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        self.entries.push_back(LogEntry {
            turn,
            player,
            action: action.into(),
            detail: detail.into(),
            timestamp_ms,
        });

        while self.entries.len() > LOG_CAPACITY {
            self.entries.pop_front();
        }
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// The most recent entry.
    #[must_use]
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.last()
    }
}
