//! Shared market stacks and the relic row.

use serde::{Deserialize, Serialize};

use crate::cards::{ArchetypeId, CardId};

/// Total market stacks: 10 ally stacks + Fusion Fragments + Energy Cells.
pub const MARKET_STACKS: usize = 12;

/// Empty market stacks that trigger the final round.
pub const FINAL_ROUND_EMPTY_STACKS: usize = 5;

/// Relic piles in the row.
pub const RELIC_PILES: usize = 2;

/// Relics per pile at setup.
pub const RELIC_PILE_SIZE: usize = 5;

/// One LIFO market stack of identical card instances.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketStack {
    /// The archetype every card in this stack shares.
    pub archetype: ArchetypeId,
    /// Fixed purchase cost.
    pub cost: u32,
    /// Card instances; the purchasable card is the last element.
    pub cards: Vec<CardId>,
}

impl MarketStack {
    /// Cards remaining.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Whether the stack is sold out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Pop the top card.
    pub fn pop(&mut self) -> Option<CardId> {
        self.cards.pop()
    }
}

/// The shared market: 12 stacks in fixed order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    pub stacks: Vec<MarketStack>,
}

impl Market {
    /// A stack by index.
    #[must_use]
    pub fn stack(&self, index: usize) -> Option<&MarketStack> {
        self.stacks.get(index)
    }

    /// How many stacks are sold out.
    #[must_use]
    pub fn empty_stack_count(&self) -> usize {
        self.stacks.iter().filter(|s| s.is_empty()).count()
    }
}

/// The relic row: two piles, each showing its top card as the purchasable
/// option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelicRow {
    /// Face-down piles; the revealed card is the last element of each.
    pub piles: [Vec<CardId>; RELIC_PILES],
}

impl RelicRow {
    /// The revealed (purchasable) relic of a pile.
    #[must_use]
    pub fn revealed(&self, pile: usize) -> Option<CardId> {
        self.piles.get(pile).and_then(|p| p.last().copied())
    }

    /// Take the revealed relic from a pile.
    pub fn take(&mut self, pile: usize) -> Option<CardId> {
        self.piles.get_mut(pile).and_then(|p| p.pop())
    }

    /// Relics remaining anywhere in the row.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.piles.iter().map(Vec::len).sum()
    }

    /// Keep two visible options: an emptied pile steals the top card of the
    /// other pile while any relic remains.
    pub fn refill(&mut self) {
        for i in 0..RELIC_PILES {
            if self.piles[i].is_empty() {
                let other = (i + 1) % RELIC_PILES;
                if self.piles[other].len() > 1 {
                    if let Some(card) = self.piles[other].pop() {
                        self.piles[i].push(card);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(range: std::ops::Range<u32>) -> Vec<CardId> {
        range.map(CardId::new).collect()
    }

    #[test]
    fn test_stack_pop_is_lifo() {
        let mut stack = MarketStack {
            archetype: ArchetypeId::new(0),
            cost: 3,
            cards: ids(0..3),
        };

        assert_eq!(stack.remaining(), 3);
        assert_eq!(stack.pop(), Some(CardId::new(2)));
        assert_eq!(stack.remaining(), 2);
    }

    #[test]
    fn test_empty_stack_count() {
        let market = Market {
            stacks: vec![
                MarketStack {
                    archetype: ArchetypeId::new(0),
                    cost: 2,
                    cards: vec![],
                },
                MarketStack {
                    archetype: ArchetypeId::new(1),
                    cost: 2,
                    cards: ids(0..1),
                },
            ],
        };

        assert_eq!(market.empty_stack_count(), 1);
    }

    #[test]
    fn test_relic_row_reveals_top() {
        let row = RelicRow {
            piles: [ids(0..5), ids(5..10)],
        };

        assert_eq!(row.revealed(0), Some(CardId::new(4)));
        assert_eq!(row.revealed(1), Some(CardId::new(9)));
        assert_eq!(row.remaining(), 10);
    }

    #[test]
    fn test_refill_moves_from_other_pile() {
        let mut row = RelicRow {
            piles: [vec![], ids(0..3)],
        };

        row.refill();

        assert_eq!(row.revealed(0), Some(CardId::new(2)));
        assert_eq!(row.piles[1].len(), 2);
        assert_eq!(row.remaining(), 3);
    }

    #[test]
    fn test_refill_leaves_last_relic_alone() {
        // With a single relic left there is only one option to show.
        let mut row = RelicRow {
            piles: [vec![], ids(0..1)],
        };

        row.refill();

        assert_eq!(row.revealed(0), None);
        assert_eq!(row.revealed(1), Some(CardId::new(0)));
    }
}
