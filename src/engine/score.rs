//! Victory scoring and the game-over transition.

use crate::cards::CardId;
use crate::core::PlayerId;

use super::GameEngine;

/// Outcome of a finished match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single highest score.
    Winner(PlayerId),
    /// Tied highest score.
    Tie(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won (or shares the win).
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Tie(ps) => ps.contains(&player),
        }
    }
}

impl GameEngine {
    /// Victory points for `player` right now: relics (5 each) plus every
    /// card they hold in any zone (fragments 2, allies per archetype).
    /// Cards in the Dust belong to nobody and score for nobody.
    #[must_use]
    pub fn victory_points(&self, player: PlayerId) -> u32 {
        let state = self.state.core.player(player);
        if state.eliminated {
            return state.victory_points;
        }

        state.all_cards().map(|card| self.card_points(card)).sum()
    }

    fn card_points(&self, card: CardId) -> u32 {
        self.state
            .core
            .instance(card)
            .map(|instance| self.catalog.get(instance.archetype).victory_points())
            .unwrap_or(0)
    }

    /// Score every player and mark the match over.
    pub(crate) fn end_game(&mut self) {
        for seat in PlayerId::all(self.state.core.player_count()) {
            if self.state.core.player(seat).eliminated {
                continue;
            }
            let points = self.victory_points(seat);
            self.state.core.player_mut(seat).victory_points = points;
            self.state
                .core
                .log_entry(seat, "Final Score", format!("{points} VP"));
        }
        self.state.core.game_over = true;
        self.state.core.pending = None;
    }

    /// The result once the game is over; `None` while it is still running.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        if !self.state.core.game_over {
            return None;
        }

        let best = self
            .state
            .core
            .players
            .iter()
            .map(|(_, p)| p.victory_points)
            .max()?;
        let winners: Vec<PlayerId> = self
            .state
            .core
            .players
            .iter()
            .filter(|(_, p)| p.victory_points == best)
            .map(|(id, _)| id)
            .collect();

        match winners.as_slice() {
            [single] => Some(GameResult::Winner(*single)),
            _ => Some(GameResult::Tie(winners)),
        }
    }
}
