//! Type-specific effects of a drawn card on one player's hand.
//!
//! `apply_card` changes only the hand it is given and reports what
//! happened; the session turns that report into phase changes. The same
//! function serves dealing, turns and forced Flip Three draws, the
//! `DrawContext` selecting the few rules that differ.

use serde::{Deserialize, Serialize};

use super::round_state::PlayerRoundState;
use super::scoring::has_duplicate_number;
use crate::cards::{Card, CardFace, TargetAction};
use crate::core::FLIP_SEVEN_CARDS;

/// Where a draw happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawContext {
    /// Dealing or a player's own hit. Duplicates with a banked Second
    /// Chance wait for the player's decision; Freeze and Flip Three need a
    /// target.
    Normal,
    /// One of the cards forced by a Flip Three. Second Chance resolves on
    /// its own and action cards are only banked.
    Forced,
}

/// What a drawn card did to the hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawOutcome {
    /// New number value added.
    NumberAdded,
    /// Seventh distinct number: bonus earned and the player auto-stays.
    FlipSeven,
    /// Duplicate with no Second Chance. The card joins the hand and the
    /// player is out with nothing.
    Busted,
    /// Duplicate with a banked Second Chance; the card is not in the hand
    /// and awaits the player's decision.
    SecondChanceOffered,
    /// Duplicate cancelled by a banked Second Chance; the card is not in the
    /// hand and belongs on the discard pile.
    SecondChanceSpent,
    ModifierAdded,
    SecondChanceBanked,
    /// Freeze or Flip Three waiting for a target.
    NeedsTarget(TargetAction),
    /// Freeze or Flip Three kept in hand with no effect.
    ActionBanked(TargetAction),
}

impl DrawOutcome {
    /// Whether the drawing player stopped acting because of this card.
    #[must_use]
    pub fn ends_participation(self) -> bool {
        matches!(self, DrawOutcome::FlipSeven | DrawOutcome::Busted)
    }
}

/// Apply a drawn card to a hand.
pub fn apply_card(hand: &mut PlayerRoundState, card: Card, context: DrawContext) -> DrawOutcome {
    match card.face() {
        CardFace::Number(value) => apply_number(hand, card, value, context),
        CardFace::Modifier(_) => {
            hand.modifier_cards.push(card);
            DrawOutcome::ModifierAdded
        }
        CardFace::Action(action) => {
            hand.action_cards.push(card);
            match (action.target_action(), context) {
                (None, _) => {
                    hand.has_second_chance = true;
                    DrawOutcome::SecondChanceBanked
                }
                (Some(target), DrawContext::Normal) => DrawOutcome::NeedsTarget(target),
                (Some(target), DrawContext::Forced) => DrawOutcome::ActionBanked(target),
            }
        }
    }
}

fn apply_number(hand: &mut PlayerRoundState, card: Card, value: u8, context: DrawContext) -> DrawOutcome {
    if has_duplicate_number(hand, value) {
        return match (hand.has_second_chance, context) {
            (false, _) => {
                hand.number_cards.push(card);
                hand.bust();
                DrawOutcome::Busted
            }
            (true, DrawContext::Normal) => DrawOutcome::SecondChanceOffered,
            (true, DrawContext::Forced) => {
                hand.has_second_chance = false;
                DrawOutcome::SecondChanceSpent
            }
        };
    }

    hand.number_cards.push(card);
    if hand.distinct_numbers() >= FLIP_SEVEN_CARDS {
        hand.has_flip_seven = true;
        hand.stay();
        return DrawOutcome::FlipSeven;
    }
    DrawOutcome::NumberAdded
}

/// Settle an offered Second Chance.
///
/// Spending it clears the flag and returns the duplicate for the discard
/// pile. Declining adds the duplicate to the hand and busts the player.
pub fn settle_second_chance(hand: &mut PlayerRoundState, duplicate: Card, spend: bool) -> Option<Card> {
    if spend {
        hand.has_second_chance = false;
        Some(duplicate)
    } else {
        hand.number_cards.push(duplicate);
        hand.bust();
        None
    }
}
