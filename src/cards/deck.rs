//! The 94-card deck: composition, shuffling and drawing.
//!
//! ## Composition
//!
//! - 79 number cards: value `v` appears `v` times for 1..=12, plus one 0
//! - 6 modifiers: one each of x2, +2, +4, +6, +8, +10
//! - 9 actions: three each of Freeze, Flip Three, Second Chance
//!
//! Piles are `im::Vector`s with the top card at the end. Drawing never
//! mutates its inputs: callers get new piles back and rebind them, which
//! costs O(log n) thanks to structural sharing.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::card::{ActionKind, Card, CardId, Modifier};
use crate::core::{EngineError, GameRng, Result};

/// Cards in a freshly built deck.
pub const DECK_SIZE: usize = 94;

/// Highest printed number value.
pub const MAX_NUMBER_VALUE: u8 = 12;

/// Copies of each action card.
pub const ACTION_COPIES: usize = 3;

/// Build the full deck in catalog order with ids `0..DECK_SIZE`.
///
/// Composition is fixed; order is not meaningful until shuffled.
#[must_use]
pub fn build_deck() -> Vector<Card> {
    let mut next_id = 0u32;
    let mut alloc = || {
        let id = CardId::new(next_id);
        next_id += 1;
        id
    };

    let mut cards = Vector::new();

    for value in (1..=MAX_NUMBER_VALUE).rev() {
        for _ in 0..value {
            cards.push_back(Card::number(alloc(), value));
        }
    }
    cards.push_back(Card::number(alloc(), 0));

    for modifier in Modifier::ALL {
        cards.push_back(Card::modifier(alloc(), modifier));
    }

    for action in ActionKind::ALL {
        for _ in 0..ACTION_COPIES {
            cards.push_back(Card::action(alloc(), action));
        }
    }

    cards
}

/// Return a uniformly shuffled copy of `cards` (Fisher-Yates).
///
/// Walks from the last index down to 1, swapping each position with a
/// uniformly chosen index at or below it. The input is left untouched.
#[must_use]
pub fn shuffle(cards: &Vector<Card>, rng: &mut GameRng) -> Vector<Card> {
    let mut shuffled = cards.clone();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range_usize(0..i + 1);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Result of a draw: the card plus both piles after the draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Drawn {
    pub card: Card,
    pub deck: Vector<Card>,
    pub discard: Vector<Card>,
}

/// Pop the top card of `deck`.
///
/// An empty deck is first refilled by shuffling the discard pile into it
/// (the discard pile comes back empty). Fails with `DeckExhausted` only
/// when both piles are empty.
pub fn draw(deck: &Vector<Card>, discard: &Vector<Card>, rng: &mut GameRng) -> Result<Drawn> {
    let mut deck = deck.clone();
    let mut discard = discard.clone();

    if deck.is_empty() {
        if discard.is_empty() {
            return Err(EngineError::DeckExhausted);
        }
        debug!(cards = discard.len(), "Draw pile empty, reshuffling discard pile");
        deck = shuffle(&discard, rng);
        discard = Vector::new();
    }

    let card = deck.pop_back().ok_or(EngineError::DeckExhausted)?;
    Ok(Drawn { card, deck, discard })
}

/// The shared draw pile and discard pile of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piles {
    deck: Vector<Card>,
    discard: Vector<Card>,
}

impl Piles {
    /// Piles over a given draw pile (top = last) with an empty discard pile.
    #[must_use]
    pub fn new(deck: Vector<Card>) -> Self {
        Self {
            deck,
            discard: Vector::new(),
        }
    }

    /// A freshly built and shuffled deck.
    #[must_use]
    pub fn shuffled(rng: &mut GameRng) -> Self {
        Self::new(shuffle(&build_deck(), rng))
    }

    /// The draw pile, top card last.
    #[must_use]
    pub fn deck(&self) -> &Vector<Card> {
        &self.deck
    }

    #[must_use]
    pub fn discard_pile(&self) -> &Vector<Card> {
        &self.discard
    }

    /// Cards across both piles.
    #[must_use]
    pub fn total(&self) -> usize {
        self.deck.len() + self.discard.len()
    }

    /// Draw the top card, returning it with the piles after the draw.
    pub fn draw(&self, rng: &mut GameRng) -> Result<(Card, Piles)> {
        let Drawn { card, deck, discard } = draw(&self.deck, &self.discard, rng)?;
        Ok((card, Piles { deck, discard }))
    }

    /// Put a card face up on the discard pile.
    pub fn discard(&mut self, card: Card) {
        self.discard.push_back(card);
    }

    /// Put many cards on the discard pile, in order.
    pub fn discard_all(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.discard.extend(cards);
    }

    /// Merge the discard pile into the draw pile and shuffle if fewer than
    /// `min_cards` remain to be drawn. Returns whether a reshuffle happened.
    pub fn reshuffle_if_below(&mut self, min_cards: usize, rng: &mut GameRng) -> bool {
        if self.deck.len() >= min_cards {
            return false;
        }

        let mut merged = std::mem::take(&mut self.deck);
        merged.append(std::mem::take(&mut self.discard));
        debug!(
            cards = merged.len(),
            min_cards, "Draw pile running low, reshuffling discard pile into it"
        );
        self.deck = shuffle(&merged, rng);
        true
    }
}
