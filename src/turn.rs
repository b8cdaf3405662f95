//! Per-game turn state: the pending-attack queue and Throne Room chains.
//!
//! Attacks that defer resolution (Militia, Bureaucrat, Witch, Council
//! Room) are queued when played and applied at the start of each victim's
//! turn. An entry stays queued until it comes full circle back to the
//! player who played it, at which point it is removed. This model
//! preserves the known ordering caveat when several players chain attacks
//! within one round; see DESIGN.md.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::cards::CardKind;
use crate::core::PlayerId;

/// One queued attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAttack {
    /// The attack card that was played.
    pub card: CardKind,
    /// Who played it. The entry expires when this player's turn comes
    /// around again.
    pub origin: PlayerId,
}

/// Mutable turn-scoped state shared by the whole game.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TurnState {
    pending_attacks: VecDeque<PendingAttack>,
    throne_chain_depth: u32,
    is_chaining: bool,
}

impl TurnState {
    /// Create a fresh turn state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an attack played by `origin`.
    pub fn enqueue_attack(&mut self, card: CardKind, origin: PlayerId) {
        self.pending_attacks.push_back(PendingAttack { card, origin });
    }

    /// Attacks to apply against `victim` at the start of their turn, in
    /// play order. Entries originated by the victim have come full circle
    /// and are removed; everything else stays queued for later victims.
    pub fn attacks_against(&mut self, victim: PlayerId) -> Vec<PendingAttack> {
        self.pending_attacks.retain(|a| a.origin != victim);
        self.pending_attacks.iter().copied().collect()
    }

    /// Number of attacks currently queued.
    #[must_use]
    pub fn pending_attack_count(&self) -> usize {
        self.pending_attacks.len()
    }

    /// A Throne Room resolved: one more re-play is owed and the chain is
    /// open (further Throne Rooms may extend it).
    pub fn begin_throne_chain(&mut self) {
        self.throne_chain_depth += 1;
        self.is_chaining = true;
    }

    /// A non-Throne-Room action card is being played: the chain (if any)
    /// is no longer being extended.
    pub fn break_chain(&mut self) {
        self.is_chaining = false;
    }

    /// Whether the card just resolved should be re-played for free.
    #[must_use]
    pub fn owes_replay(&self) -> bool {
        !self.is_chaining && self.throne_chain_depth > 0
    }

    /// Consume one owed re-play.
    pub fn consume_replay(&mut self) {
        debug_assert!(self.throne_chain_depth > 0);
        self.throne_chain_depth = self.throne_chain_depth.saturating_sub(1);
    }

    /// Clear all chaining state at clean-up.
    pub fn clear_chain(&mut self) {
        self.throne_chain_depth = 0;
        self.is_chaining = false;
    }

    /// Current chain depth (re-plays still owed).
    #[must_use]
    pub fn throne_chain_depth(&self) -> u32 {
        self.throne_chain_depth
    }
}
