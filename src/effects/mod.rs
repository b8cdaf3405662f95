//! Effect resolution: executing action-card effects against game state.

mod context;
mod resolver;

pub use context::EffectContext;
pub use resolver::{apply_attack, resolve};

use serde::{Deserialize, Serialize};

/// Why an effect did not resolve. Either way the engine rolls back: the
/// card returns to hand and no action is consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectOutcome {
    /// The player backed out of a required choice before anything
    /// irreversible happened.
    Canceled,
    /// The effect has no legal target at all (Mine with no Copper or
    /// Silver, Moneylender with no Copper).
    Illegal,
}

/// Result of resolving an effect.
pub type EffectResult = Result<(), EffectOutcome>;
