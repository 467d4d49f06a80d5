//! Per-player rules: the round hand, scoring, and card effects.
//!
//! Everything here works on a single `PlayerRoundState` and knows nothing
//! about turn order or phases. The session state machine calls into these
//! functions and decides what happens next.

pub mod effects;
pub mod round_state;
pub mod scoring;

pub use effects::{apply_card, settle_second_chance, DrawContext, DrawOutcome};
pub use round_state::PlayerRoundState;
pub use scoring::{calculate_score, has_duplicate_number};
