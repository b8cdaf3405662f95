//! Player identification and per-player game state.
//!
//! A `Player` owns four piles that partition their whole card pool: draw
//! deck, hand, in-play area, and discard. Cards move between those piles
//! and the shared supply; they are never shared across players. The
//! per-turn counters live here too.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{Catalog, CardKind};
use crate::core::rng::GameRng;
use crate::pile::Pile;

/// Player identifier. Player indices are 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One player's piles and turn counters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    /// Display name, supplied by the embedding layer at setup.
    pub name: String,
    /// Face-down draw pile.
    pub deck: Pile,
    /// Current hand.
    pub hand: Pile,
    /// Action cards played this turn; discarded at clean-up.
    pub in_play: Pile,
    /// Face-up discard pile.
    pub discard: Pile,
    /// Actions left this turn.
    pub actions_remaining: u32,
    /// Buys left this turn.
    pub buys_remaining: u32,
    /// Coin granted by card effects this turn, on top of hand treasure.
    pub bonus_coin: u32,
    /// Hands played over the whole game.
    pub hands_played: u32,
}

impl Player {
    /// Create a player with empty piles. The game loop deals the starting
    /// deck (7 Copper, 3 Estate) during setup.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            deck: Pile::new(),
            hand: Pile::new(),
            in_play: Pile::new(),
            discard: Pile::new(),
            actions_remaining: 0,
            buys_remaining: 0,
            bonus_coin: 0,
            hands_played: 0,
        }
    }

    /// Reset the per-turn counters at start of turn.
    pub fn reset_turn_counters(&mut self) {
        self.actions_remaining = 1;
        self.buys_remaining = 1;
        self.bonus_coin = 0;
    }

    /// Draw one card off the deck, folding the discard pile back in and
    /// reshuffling when the deck runs dry. Returns `None` only when the
    /// player has no cards left outside hand and in-play.
    pub fn draw_from_deck(&mut self, rng: &mut GameRng) -> Option<CardKind> {
        if self.deck.is_empty() {
            if self.discard.is_empty() {
                return None;
            }
            self.deck.append_all(&mut self.discard);
            self.deck.shuffle(rng);
            debug!(player = %self.name, deck = self.deck.len(), "reshuffled discard into deck");
        }
        self.deck.draw().ok()
    }

    /// Draw up to `n` cards into hand, reshuffling as needed. Returns how
    /// many were actually drawn; fewer than `n` is not an error, it just
    /// means the player's cards are all in hand or in play already.
    pub fn draw_to_hand(&mut self, n: usize, rng: &mut GameRng) -> usize {
        let mut drawn = 0;
        for _ in 0..n {
            match self.draw_from_deck(rng) {
                Some(card) => {
                    self.hand.add(card);
                    drawn += 1;
                }
                None => break,
            }
        }
        drawn
    }

    /// Whether the hand holds at least one action card.
    #[must_use]
    pub fn has_action_in_hand(&self, catalog: &Catalog) -> bool {
        self.hand.iter().any(|c| catalog.get(c).is_action)
    }

    /// Coin available to spend right now: bonus coin plus hand treasure.
    #[must_use]
    pub fn spendable_coin(&self, catalog: &Catalog) -> u32 {
        self.bonus_coin + self.hand.coin_total(catalog)
    }

    /// Shuffles performed on this player's deck.
    #[must_use]
    pub fn shuffle_count(&self) -> u32 {
        self.deck.shuffle_count()
    }

    /// Total cards across all four piles.
    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.deck.len() + self.hand.len() + self.in_play.len() + self.discard.len()
    }

    /// Victory points over the union of all four piles. Gardens counts
    /// `floor(total_pool / 10)` per copy, so it is scored here against the
    /// whole pool rather than pile by pile.
    #[must_use]
    pub fn total_victory_points(&self, catalog: &Catalog) -> i32 {
        let per_gardens = (self.pool_size() / 10) as i32;
        let piles = [&self.deck, &self.hand, &self.in_play, &self.discard];
        piles
            .iter()
            .flat_map(|p| p.iter())
            .map(|c| {
                let vp = catalog.get(c).victory_points;
                if c == CardKind::Gardens {
                    vp * per_gardens
                } else {
                    vp
                }
            })
            .sum()
    }
}
