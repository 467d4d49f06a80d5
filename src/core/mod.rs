//! Core building blocks: seats, RNG, settings, errors.
//!
//! Nothing in here knows about cards or rounds; the card and session
//! modules build on these types.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{
    GameSettings, SettingsUpdate, DEFAULT_TARGET_SCORE, FLIP_SEVEN_BONUS, FLIP_SEVEN_CARDS,
    FLIP_THREE_DRAWS, MAX_PLAYERS, MIN_PLAYERS,
};
pub use error::{EngineError, Result};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
