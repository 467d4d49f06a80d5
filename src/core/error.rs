//! Engine error taxonomy.
//!
//! Every state machine operation returns `Result<_, EngineError>`. An `Err`
//! always means the session was left exactly as it was before the call.

use thiserror::Error;

use super::player::PlayerId;

/// Errors returned by the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Session creation with too few or too many names.
    #[error("a game needs between {min} and {max} players, got {got}")]
    InvalidPlayerCount { got: usize, min: usize, max: usize },

    /// Draw attempted with both the draw pile and the discard pile empty.
    #[error("draw pile and discard pile are both empty")]
    DeckExhausted,

    /// A resolution command arrived with no action card waiting.
    #[error("no action card is waiting to be resolved")]
    NoPendingAction,

    /// A flip three command arrived with no flip three in progress.
    #[error("no flip three is in progress")]
    NoFlipThreeState,

    /// A command that the current phase does not accept.
    #[error("{operation} is not allowed during {phase}")]
    OutOfPhase {
        operation: &'static str,
        phase: &'static str,
    },

    /// The chosen seat does not exist or can no longer be targeted.
    #[error("{0} cannot be targeted")]
    InvalidTarget(PlayerId),

    /// A table command arrived with no session in progress.
    #[error("no game session is in progress")]
    NoSession,

    /// A persisted snapshot could not be encoded or decoded, or decoded
    /// into a session whose seats do not line up.
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        EngineError::Snapshot(err.to_string())
    }
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, EngineError>;
