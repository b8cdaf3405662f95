//! Piles: ordered, mutable card sequences.
//!
//! A pile is one zone's worth of cards: a player's draw pile, hand,
//! in-play area, or discard, or one supply stack. Draw is FIFO from the
//! front; `push_front` models "put on top of your deck". Aggregate queries
//! that need card data (coin totals, victory points) go through the
//! [`Catalog`].

use serde::{Deserialize, Serialize};

use crate::cards::{Catalog, CardKind};
use crate::core::{EngineError, GameRng};

/// An ordered sequence of cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    cards: Vec<CardKind>,
    shuffles: u32,
}

impl Pile {
    /// Create an empty pile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pile containing `count` copies of a kind.
    #[must_use]
    pub fn of(kind: CardKind, count: usize) -> Self {
        Self {
            cards: vec![kind; count],
            shuffles: 0,
        }
    }

    /// Draw the front card.
    pub fn draw(&mut self) -> Result<CardKind, EngineError> {
        if self.cards.is_empty() {
            return Err(EngineError::EmptyPile);
        }
        Ok(self.cards.remove(0))
    }

    /// Look at the front card without removing it.
    pub fn peek(&self) -> Result<CardKind, EngineError> {
        self.cards.first().copied().ok_or(EngineError::EmptyPile)
    }

    /// Put a card on the front (top) of the pile.
    pub fn push_front(&mut self, card: CardKind) {
        self.cards.insert(0, card);
    }

    /// Add a card to the back of the pile.
    pub fn add(&mut self, card: CardKind) {
        self.cards.push(card);
    }

    /// Move every card out of `other` onto the back of this pile,
    /// preserving order. Used to fold a discard pile back into a deck
    /// before reshuffling, and to merge piles for end-of-game scoring.
    pub fn append_all(&mut self, other: &mut Pile) {
        self.cards.append(&mut other.cards);
    }

    /// Uniformly shuffle the pile and bump the shuffle counter.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
        self.shuffles += 1;
    }

    /// How many times this pile has been shuffled.
    #[must_use]
    pub fn shuffle_count(&self) -> u32 {
        self.shuffles
    }

    /// Number of cards in the pile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the pile has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Whether the pile holds at least one card of this kind.
    #[must_use]
    pub fn contains(&self, kind: CardKind) -> bool {
        self.cards.contains(&kind)
    }

    /// Remove one card of this kind (the frontmost match).
    pub fn remove(&mut self, kind: CardKind) -> Result<(), EngineError> {
        match self.cards.iter().position(|&c| c == kind) {
            Some(idx) => {
                self.cards.remove(idx);
                Ok(())
            }
            None => Err(EngineError::CardNotFound(kind)),
        }
    }

    /// Total treasure value of the pile.
    #[must_use]
    pub fn coin_total(&self, catalog: &Catalog) -> u32 {
        self.cards.iter().map(|&c| catalog.get(c).coin_value).sum()
    }

    /// Total victory points of the pile. Each Gardens is worth its
    /// multiplier once per full 10 cards in *this* pile.
    #[must_use]
    pub fn victory_points(&self, catalog: &Catalog) -> i32 {
        let per_gardens = (self.len() / 10) as i32;
        self.cards
            .iter()
            .map(|&c| {
                let vp = catalog.get(c).victory_points;
                if c == CardKind::Gardens {
                    vp * per_gardens
                } else {
                    vp
                }
            })
            .sum()
    }

    /// Count cards of one kind.
    #[must_use]
    pub fn count(&self, kind: CardKind) -> usize {
        self.cards.iter().filter(|&&c| c == kind).count()
    }

    /// Iterate front to back.
    pub fn iter(&self) -> impl Iterator<Item = CardKind> + '_ {
        self.cards.iter().copied()
    }
}

impl FromIterator<CardKind> for Pile {
    fn from_iter<I: IntoIterator<Item = CardKind>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
            shuffles: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn kind_strategy() -> impl Strategy<Value = CardKind> {
        prop::sample::select(CardKind::ALL.to_vec())
    }

    #[test]
    fn test_draw_is_fifo() {
        let mut pile: Pile = [CardKind::Copper, CardKind::Estate, CardKind::Silver]
            .into_iter()
            .collect();

        assert_eq!(pile.draw(), Ok(CardKind::Copper));
        assert_eq!(pile.draw(), Ok(CardKind::Estate));
        assert_eq!(pile.draw(), Ok(CardKind::Silver));
        assert_eq!(pile.draw(), Err(EngineError::EmptyPile));
    }

    #[test]
    fn test_peek_does_not_disturb_order() {
        let mut pile: Pile = [CardKind::Moat, CardKind::Gold].into_iter().collect();

        assert_eq!(pile.peek(), Ok(CardKind::Moat));
        assert_eq!(pile.len(), 2);
        assert_eq!(pile.draw(), Ok(CardKind::Moat));

        let empty = Pile::new();
        assert_eq!(empty.peek(), Err(EngineError::EmptyPile));
    }

    #[test]
    fn test_remove_takes_one_instance() {
        let mut pile: Pile = [CardKind::Copper, CardKind::Copper, CardKind::Estate]
            .into_iter()
            .collect();

        pile.remove(CardKind::Copper).unwrap();
        assert_eq!(pile.count(CardKind::Copper), 1);

        assert_eq!(
            pile.remove(CardKind::Gold),
            Err(EngineError::CardNotFound(CardKind::Gold))
        );
    }

    #[test]
    fn test_append_all_drains_source() {
        let mut deck: Pile = [CardKind::Copper].into_iter().collect();
        let mut discard: Pile = [CardKind::Estate, CardKind::Silver].into_iter().collect();

        deck.append_all(&mut discard);

        assert!(discard.is_empty());
        assert_eq!(
            deck.iter().collect::<Vec<_>>(),
            vec![CardKind::Copper, CardKind::Estate, CardKind::Silver]
        );
    }

    #[test]
    fn test_coin_total() {
        let catalog = Catalog::standard();
        let pile: Pile = [
            CardKind::Gold,
            CardKind::Silver,
            CardKind::Copper,
            CardKind::Estate,
        ]
        .into_iter()
        .collect();

        assert_eq!(pile.coin_total(&catalog), 6);
    }

    #[test]
    fn test_gardens_scores_by_pile_size() {
        let catalog = Catalog::standard();

        // 1 gardens + 22 coppers: 23 cards, floor(23/10) = 2 points.
        let mut pile = Pile::of(CardKind::Copper, 22);
        pile.add(CardKind::Gardens);
        assert_eq!(pile.victory_points(&catalog), 2);

        // 9 cards total: gardens contributes nothing.
        let mut small = Pile::of(CardKind::Copper, 8);
        small.add(CardKind::Gardens);
        assert_eq!(small.victory_points(&catalog), 0);
    }

    #[test]
    fn test_victory_points_mixed() {
        let catalog = Catalog::standard();
        let pile: Pile = [
            CardKind::Province,
            CardKind::Duchy,
            CardKind::Estate,
            CardKind::Curse,
        ]
        .into_iter()
        .collect();

        assert_eq!(pile.victory_points(&catalog), 6 + 3 + 1 - 1);
    }

    #[test]
    fn test_serde_round_trip() {
        let pile: Pile = [CardKind::Witch, CardKind::Curse].into_iter().collect();
        let json = serde_json::to_string(&pile).unwrap();
        let back: Pile = serde_json::from_str(&json).unwrap();
        assert_eq!(pile, back);
    }

    proptest! {
        #[test]
        fn prop_draw_then_push_front_restores_order(cards in prop::collection::vec(kind_strategy(), 1..20)) {
            let mut pile: Pile = cards.iter().copied().collect();
            let before: Vec<_> = pile.iter().collect();

            let drawn = pile.draw().unwrap();
            pile.push_front(drawn);

            prop_assert_eq!(pile.iter().collect::<Vec<_>>(), before);
        }

        #[test]
        fn prop_shuffle_preserves_multiset(cards in prop::collection::vec(kind_strategy(), 0..40), seed in any::<u64>()) {
            let mut pile: Pile = cards.iter().copied().collect();
            let mut rng = GameRng::new(seed);

            let shuffles_before = pile.shuffle_count();
            let mut before: Vec<_> = pile.iter().collect();
            pile.shuffle(&mut rng);
            let mut after: Vec<_> = pile.iter().collect();

            prop_assert_eq!(pile.shuffle_count(), shuffles_before + 1);
            prop_assert_eq!(after.len(), before.len());
            before.sort();
            after.sort();
            prop_assert_eq!(after, before);
        }
    }
}
