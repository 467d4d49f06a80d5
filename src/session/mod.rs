//! Game sessions: seats, rounds and the turn state machine.
//!
//! ## Key Types
//!
//! - `GameSession`: One game from creation to game over
//! - `RoundPhase`: Where the current round stands, with its sub-state
//! - `Command`: Every session operation as a value
//!
//! ## Lifecycle
//!
//! A session is created straight into round 1 dealing. Rounds move through
//! dealing, player turns and round end; `end_round` settles scores and
//! either opens a round summary or ends the game, and `start_round` opens
//! the next round from a summary.

mod command;
mod machine;
mod model;
mod phase;
mod state;

pub use command::{Command, Transition};
pub use model::{GameStatus, Player, RoundResult, ScoreEntry};
pub use phase::{FlipThreeState, PendingAction, Resume, RoundPhase};
pub use state::GameSession;
