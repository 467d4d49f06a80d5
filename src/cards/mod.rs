//! Card system: card values and the deck.
//!
//! ## Key Types
//!
//! - `Card`: Immutable card instance (`CardId` + `CardFace`)
//! - `Modifier`, `ActionKind`: Payloads of modifier and action cards
//! - `TargetAction`: The action effects that are aimed at a seat
//! - `Piles`: The shared draw pile and discard pile
//!
//! `build_deck`, `shuffle` and `draw` are free functions over `im::Vector`
//! and never mutate their inputs.

pub mod card;
pub mod deck;

pub use card::{ActionKind, Card, CardFace, CardId, CardKind, Modifier, TargetAction};
pub use deck::{build_deck, draw, shuffle, Drawn, Piles, ACTION_COPIES, DECK_SIZE, MAX_NUMBER_VALUE};
