//! # flip-seven
//!
//! Rules engine for Flip Seven, a push-your-luck card game for 2 to 18
//! players.
//!
//! ## Design Principles
//!
//! 1. **Caller-Driven**: Every operation is one synchronous step. Dealing and
//!    Flip Three draws advance only when the caller asks for the next card,
//!    so pacing and animation stay outside the engine.
//!
//! 2. **All-or-Nothing Transitions**: An operation either succeeds fully or
//!    returns an `EngineError` with the session untouched.
//!
//! 3. **Plain Data**: The whole session is serializable. No handles, timers
//!    or callbacks live in it.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Piles and round history use `im-rs`, so
//!   `GameSession::apply` can return a new session without copying the deck.
//!
//! - **Deterministic Shuffles**: A seeded ChaCha RNG drives every shuffle and
//!   is stored with the session.
//!
//! ## Modules
//!
//! - `core`: Seats, RNG, settings, errors
//! - `cards`: Card values and the deck
//! - `rules`: Per-player hand, scoring and card effects
//! - `session`: Game session, round phases and the turn state machine
//! - `table`: Settings plus the current session
//!
//! ## Example
//!
//! ```
//! use flip_seven::{Command, Table};
//!
//! let mut table = Table::default();
//! table.create_session_with_seed(["Ana", "Ben", "Cy"], 7).unwrap();
//!
//! let card = table.dispatch(Command::DealNextCard).unwrap();
//! assert!(card.is_some());
//! ```

pub mod cards;
pub mod core;
pub mod rules;
pub mod session;
pub mod table;

// Re-export commonly used types
pub use crate::core::{
    EngineError, GameRng, GameRngState, GameSettings, PlayerId, PlayerMap, Result, SettingsUpdate,
};

pub use crate::cards::{ActionKind, Card, CardFace, CardId, CardKind, Modifier, Piles, TargetAction};

pub use crate::rules::{calculate_score, DrawOutcome, PlayerRoundState};

pub use crate::session::{
    Command, FlipThreeState, GameSession, GameStatus, PendingAction, Player, Resume, RoundPhase,
    RoundResult, ScoreEntry, Transition,
};

pub use crate::table::Table;
