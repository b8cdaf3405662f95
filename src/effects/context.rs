//! Resolution context: everything an effect may touch.
//!
//! Card effects need the acting player, every other player (attacks), the
//! supply, turn state, randomness, and the prompter. Passing one explicit
//! context struct by reference keeps the persistent data free of
//! back-references.

use crate::cards::Catalog;
use crate::core::{GameRng, Player, PlayerId};
use crate::prompter::Prompter;
use crate::supply::Supply;
use crate::turn::TurnState;

/// Borrowed view of the game handed to each effect resolution.
pub struct EffectContext<'a> {
    /// Who played the card.
    pub acting: PlayerId,
    /// Every player, in seating order (includes the acting player).
    pub players: &'a mut [Player],
    /// The shared supply.
    pub supply: &'a mut Supply,
    /// Card definitions.
    pub catalog: &'a Catalog,
    /// Attack queue and Throne Room chain state.
    pub turn: &'a mut TurnState,
    /// Shuffle randomness.
    pub rng: &'a mut GameRng,
    /// Decision boundary.
    pub prompter: &'a mut dyn Prompter,
}

impl<'a> EffectContext<'a> {
    /// The acting player.
    #[must_use]
    pub fn acting_player(&mut self) -> &mut Player {
        &mut self.players[self.acting.index()]
    }

    /// Number of players in the game.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Every player other than the acting one, in seating order.
    pub fn opponents(&self) -> impl Iterator<Item = PlayerId> + '_ {
        let acting = self.acting;
        PlayerId::all(self.players.len()).filter(move |&p| p != acting)
    }
}
