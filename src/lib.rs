//! # dominion-engine
//!
//! A rules engine for a Dominion-style deck-building card game.
//!
//! ## Design Principles
//!
//! 1. **Engine, not interface**: the crate owns rules, state, and card
//!    effects. Rendering, input parsing, and process startup belong to the
//!    embedding layer; every observable is exposed as plain data.
//!
//! 2. **One human boundary**: whenever an effect needs a decision, the
//!    engine calls the [`Prompter`] trait. Tests and bots script it; a CLI
//!    wires it to stdin.
//!
//! 3. **Deterministic randomness**: all shuffling flows through a seeded
//!    [`GameRng`], so a full game is reproducible from its seed and the
//!    prompter replies.
//!
//! ## Modules
//!
//! - `core`: player identity and state, RNG, error types
//! - `cards`: card kinds, descriptors, and the catalog registry
//! - `pile`: ordered card sequences (decks, hands, supply stacks)
//! - `supply`: the shared purchase piles and end-of-game queries
//! - `turn`: pending-attack queue and Throne Room chain state
//! - `prompter`: the decision boundary and a scripted implementation
//! - `purchase`: the shared buy/gain procedure
//! - `effects`: per-card effect resolution and deferred attacks
//! - `game`: setup, the turn state machine, standings

pub mod cards;
pub mod core;
pub mod effects;
pub mod game;
pub mod pile;
pub mod prompter;
pub mod purchase;
pub mod supply;
pub mod turn;

// Re-export commonly used types
pub use crate::cards::{Card, CardKind, Catalog};
pub use crate::core::{EngineError, GameRng, GameRngState, Player, PlayerId, SetupError};
pub use crate::effects::{EffectContext, EffectOutcome, EffectResult};
pub use crate::game::{Game, Phase, PlayError, PlayerSummary, Standing, BUY_CEILING, MAX_PLAYERS};
pub use crate::pile::Pile;
pub use crate::prompter::{Prompter, Reply, ScriptedPrompter};
pub use crate::purchase::{GainDestination, PurchaseError, PurchaseResult};
pub use crate::supply::{Supply, KINGDOM_SET_SIZE};
pub use crate::turn::{PendingAttack, TurnState};
