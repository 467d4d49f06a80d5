//! Per-player state for a single round.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use super::scoring::calculate_score;
use crate::cards::Card;
use crate::core::PlayerId;

/// One player's hand and status for the current round.
///
/// The session owns these and only hands out shared references, so callers
/// can read every field but change none of them. `round_score` is a
/// snapshot taken when the player stops acting, not a live total.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRoundState {
    pub player_id: PlayerId,

    /// Number cards in draw order.
    pub number_cards: SmallVec<[Card; 8]>,

    pub modifier_cards: SmallVec<[Card; 4]>,

    /// Every action card drawn this round, including spent ones.
    pub action_cards: SmallVec<[Card; 4]>,

    /// A banked Second Chance. A flag, not a counter.
    pub has_second_chance: bool,

    pub is_active: bool,
    pub has_stayed: bool,
    pub is_busted: bool,
    pub is_frozen: bool,
    pub round_score: u32,
    pub has_flip_seven: bool,
}

impl PlayerRoundState {
    /// Fresh state at the start of a round.
    #[must_use]
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            number_cards: SmallVec::new(),
            modifier_cards: SmallVec::new(),
            action_cards: SmallVec::new(),
            has_second_chance: false,
            is_active: true,
            has_stayed: false,
            is_busted: false,
            is_frozen: false,
            round_score: 0,
            has_flip_seven: false,
        }
    }

    /// Whether this player can still draw, stay, or be targeted.
    #[must_use]
    pub fn can_act(&self) -> bool {
        self.is_active && !self.has_stayed && !self.is_busted && !self.is_frozen
    }

    /// Count of distinct number values held.
    #[must_use]
    pub fn distinct_numbers(&self) -> usize {
        self.number_cards
            .iter()
            .filter_map(|card| card.number_value())
            .collect::<FxHashSet<_>>()
            .len()
    }

    /// Every card held, in the order number, modifier, action.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.number_cards
            .iter()
            .chain(self.modifier_cards.iter())
            .chain(self.action_cards.iter())
            .copied()
    }

    /// Recompute `round_score` from the current hand.
    pub fn snapshot_score(&mut self) {
        self.round_score = calculate_score(self);
        trace!(player = %self.player_id, score = self.round_score, "Round score snapshot");
    }

    /// End this player's round voluntarily.
    pub fn stay(&mut self) {
        self.has_stayed = true;
        self.is_active = false;
        self.snapshot_score();
    }

    /// End this player's round with their score locked as it is now.
    pub fn freeze(&mut self) {
        self.is_frozen = true;
        self.is_active = false;
        self.snapshot_score();
    }

    /// End this player's round with nothing.
    pub fn bust(&mut self) {
        self.is_busted = true;
        self.is_active = false;
        self.round_score = 0;
    }
}
