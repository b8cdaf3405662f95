//! Core types: player state, RNG, errors.

mod errors;
mod player;
mod rng;

pub use errors::{EngineError, SetupError};
pub use player::{Player, PlayerId};
pub use rng::{GameRng, GameRngState};
