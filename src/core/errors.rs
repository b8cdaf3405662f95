//! Engine error types.
//!
//! Two families: `EngineError` for recoverable pile-level conditions the
//! engine itself handles (an empty draw pile triggers a reshuffle, an empty
//! supply pile ends a gain), and `SetupError` for fatal misconfiguration at
//! game creation. Effect cancellation is *not* an error; see
//! [`crate::effects::EffectOutcome`].

use thiserror::Error;

use crate::cards::CardKind;

/// Recoverable pile and card errors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Draw or peek on an empty pile.
    #[error("pile is empty")]
    EmptyPile,
    /// Remove of a card that is not in the pile. Indicates a caller logic
    /// error; the engine always checks membership first.
    #[error("card {0} not found in pile")]
    CardNotFound(CardKind),
}

/// Fatal game-setup errors. These abort setup; nothing else should.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("player count must be 1-4, got {0}")]
    InvalidPlayerCount(usize),
    #[error("kingdom set must contain exactly 10 cards, got {0}")]
    WrongKingdomCount(usize),
    #[error("unknown card name in kingdom set: {0:?}")]
    UnknownCard(String),
    #[error("duplicate card in kingdom set: {0}")]
    DuplicateCard(CardKind),
}
