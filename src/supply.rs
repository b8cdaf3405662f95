//! The supply: shared piles players purchase from.
//!
//! Basic treasure/victory/curse piles are always present, scaled by player
//! count. Exactly ten kingdom piles are installed at setup; an invalid
//! kingdom set is a fatal [`SetupError`]. Supply piles are homogeneous, so
//! the invariant that a pile's top card matches its key holds by
//! construction.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{Catalog, CardKind};
use crate::core::{EngineError, SetupError};
use crate::pile::Pile;

/// Cards per kingdom pile.
const KINGDOM_PILE_SIZE: usize = 10;
/// Required number of kingdom piles.
pub const KINGDOM_SET_SIZE: usize = 10;

/// The set of named piles available for purchase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Supply {
    piles: FxHashMap<CardKind, Pile>,
}

impl Supply {
    /// Create a supply with the standard basic piles for `player_count`
    /// players: Estate/Duchy/Province at 8 (1-2 players) or 12 (3-4),
    /// Copper 60, Silver 40, Gold 30, Curse 30.
    #[must_use]
    pub fn standard(player_count: usize) -> Self {
        let vp_cards = if player_count <= 2 { 8 } else { 12 };

        let mut piles = FxHashMap::default();
        piles.insert(CardKind::Estate, Pile::of(CardKind::Estate, vp_cards));
        piles.insert(CardKind::Duchy, Pile::of(CardKind::Duchy, vp_cards));
        piles.insert(CardKind::Province, Pile::of(CardKind::Province, vp_cards));
        piles.insert(CardKind::Copper, Pile::of(CardKind::Copper, 60));
        piles.insert(CardKind::Silver, Pile::of(CardKind::Silver, 40));
        piles.insert(CardKind::Gold, Pile::of(CardKind::Gold, 30));
        piles.insert(CardKind::Curse, Pile::of(CardKind::Curse, 30));

        Self { piles }
    }

    /// Install the ten kingdom piles. Fails if the set is the wrong size,
    /// contains a duplicate, or collides with a basic pile.
    pub fn set_kingdom_cards(&mut self, kinds: &[CardKind]) -> Result<(), SetupError> {
        if kinds.len() != KINGDOM_SET_SIZE {
            return Err(SetupError::WrongKingdomCount(kinds.len()));
        }
        for &kind in kinds {
            if self.piles.contains_key(&kind) {
                return Err(SetupError::DuplicateCard(kind));
            }
            self.piles.insert(kind, Pile::of(kind, KINGDOM_PILE_SIZE));
        }
        debug!(?kinds, "kingdom piles installed");
        Ok(())
    }

    /// Whether a kind is sold by this supply and its pile is non-empty.
    #[must_use]
    pub fn is_available(&self, kind: CardKind) -> bool {
        self.piles.get(&kind).is_some_and(|p| !p.is_empty())
    }

    /// Whether a kind is part of this game at all.
    #[must_use]
    pub fn in_game(&self, kind: CardKind) -> bool {
        self.piles.contains_key(&kind)
    }

    /// Cards remaining in a pile. Zero for kinds not in this game.
    #[must_use]
    pub fn count(&self, kind: CardKind) -> usize {
        self.piles.get(&kind).map_or(0, Pile::len)
    }

    /// Deal one card from a pile. `EmptyPile` covers both an exhausted
    /// pile and a kind not sold in this game.
    pub fn deal(&mut self, kind: CardKind) -> Result<CardKind, EngineError> {
        self.piles
            .get_mut(&kind)
            .ok_or(EngineError::EmptyPile)?
            .draw()
    }

    /// Whether the Province pile has run out (first game-over trigger).
    #[must_use]
    pub fn province_empty(&self) -> bool {
        !self.is_available(CardKind::Province)
    }

    /// The kingdom (non-basic) piles that are currently empty (second
    /// game-over trigger at three or more).
    #[must_use]
    pub fn empty_kingdom_piles(&self) -> Vec<CardKind> {
        let mut empty: Vec<CardKind> = self
            .piles
            .iter()
            .filter(|(kind, pile)| !kind.is_basic() && pile.is_empty())
            .map(|(&kind, _)| kind)
            .collect();
        empty.sort();
        empty
    }

    /// Kinds with a non-empty pile whose cost is within `max_cost`,
    /// sorted by cost then name. Curse is never offered for voluntary
    /// purchase, even at cost zero.
    #[must_use]
    pub fn offerable(&self, catalog: &Catalog, max_cost: u32) -> Vec<CardKind> {
        let mut kinds: Vec<CardKind> = self
            .piles
            .iter()
            .filter(|(&kind, pile)| {
                kind != CardKind::Curse && !pile.is_empty() && catalog.get(kind).cost <= max_cost
            })
            .map(|(&kind, _)| kind)
            .collect();
        kinds.sort_by_key(|&k| (catalog.get(k).cost, k.name()));
        kinds
    }

    /// `(kind, remaining)` pairs for every pile, sorted by name. Data for
    /// the caller's pile-count display.
    #[must_use]
    pub fn pile_counts(&self) -> Vec<(CardKind, usize)> {
        let mut counts: Vec<(CardKind, usize)> = self
            .piles
            .iter()
            .map(|(&kind, pile)| (kind, pile.len()))
            .collect();
        counts.sort_by_key(|&(kind, _)| kind.name());
        counts
    }
}
