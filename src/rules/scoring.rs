//! Round scoring.
//!
//! Both functions are pure: they read a hand and never change it. The
//! session calls `calculate_score` whenever it needs a `round_score`
//! snapshot (stay, freeze, Flip Seven, settlement).

use super::round_state::PlayerRoundState;
use crate::core::FLIP_SEVEN_BONUS;

/// Score a hand.
///
/// 1. A busted hand scores 0.
/// 2. Sum the number cards.
/// 3. A Double modifier doubles that sum (before any bonus is added).
/// 4. Add every flat modifier bonus.
/// 5. Add the Flip Seven bonus if earned.
///
/// ```
/// use flip_seven::cards::{Card, CardId, Modifier};
/// use flip_seven::core::PlayerId;
/// use flip_seven::rules::{calculate_score, PlayerRoundState};
///
/// let mut hand = PlayerRoundState::new(PlayerId::new(0));
/// for (i, v) in [3u8, 5, 9].into_iter().enumerate() {
///     hand.number_cards.push(Card::number(CardId::new(i as u32), v));
/// }
/// hand.modifier_cards.push(Card::modifier(CardId::new(10), Modifier::Double));
/// hand.modifier_cards.push(Card::modifier(CardId::new(11), Modifier::Plus4));
///
/// assert_eq!(calculate_score(&hand), 38);
/// ```
#[must_use]
pub fn calculate_score(state: &PlayerRoundState) -> u32 {
    if state.is_busted {
        return 0;
    }

    let mut score: u32 = state
        .number_cards
        .iter()
        .filter_map(|card| card.number_value())
        .map(u32::from)
        .sum();

    let modifiers = || state.modifier_cards.iter().filter_map(|card| card.as_modifier());

    if modifiers().any(|m| m.is_double()) {
        score *= 2;
    }

    score += modifiers().map(|m| m.bonus()).sum::<u32>();

    if state.has_flip_seven {
        score += FLIP_SEVEN_BONUS;
    }

    score
}

/// Whether `value` is already among the hand's number cards.
#[must_use]
pub fn has_duplicate_number(state: &PlayerRoundState, value: u8) -> bool {
    state.number_cards.iter().any(|card| card.number_value() == Some(value))
}
