//! Round phases as a tagged enum.
//!
//! Each sub-state carries its own payload, so a pending action or a Flip
//! Three can only exist while the phase says so. Nested sub-states remember
//! where control goes when they finish through `Resume`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, TargetAction};
use crate::core::PlayerId;

/// Where control returns once an action card or a Flip Three is settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resume {
    /// Dealing picks up again at this seat.
    Dealing { seat: PlayerId },
    /// The current player's turn is over and play moves on.
    PlayerTurn,
}

/// A drawn card waiting on an outside decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingAction {
    /// Freeze or Flip Three waiting for a target seat.
    Target {
        card: Card,
        action: TargetAction,
        source: PlayerId,
    },
    /// A duplicate number drawn while holding a Second Chance. The player
    /// either spends the Second Chance or takes the bust.
    SecondChance { card: Card, player: PlayerId },
}

impl PendingAction {
    /// The card that triggered the decision.
    #[must_use]
    pub fn card(&self) -> Card {
        match self {
            PendingAction::Target { card, .. } | PendingAction::SecondChance { card, .. } => *card,
        }
    }

    /// The seat that drew the card.
    #[must_use]
    pub fn source(&self) -> PlayerId {
        match self {
            PendingAction::Target { source, .. } => *source,
            PendingAction::SecondChance { player, .. } => *player,
        }
    }
}

/// Progress of a Flip Three.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipThreeState {
    /// Seat forced to draw.
    pub target: PlayerId,
    /// Seat that played the Flip Three.
    pub source: PlayerId,
    pub cards_remaining: u8,
    /// Freeze and Flip Three cards uncovered by the forced draws. They stay
    /// in the target's hand and are never resolved.
    pub uncovered_actions: SmallVec<[Card; 3]>,
}

/// Phase of the current round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Cards are being dealt; `seat` receives the next one.
    Dealing { seat: PlayerId },
    /// The current player may hit or stay.
    PlayerTurn,
    /// A drawn card waits on an outside decision.
    ResolvingAction { pending: PendingAction, resume: Resume },
    /// A target is being forced to draw.
    FlipThree { flip: FlipThreeState, resume: Resume },
    /// Nobody can act; the round is ready to settle.
    RoundEnd,
}

impl RoundPhase {
    /// Short name for logs and errors.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            RoundPhase::Dealing { .. } => "dealing",
            RoundPhase::PlayerTurn => "player turn",
            RoundPhase::ResolvingAction { .. } => "action resolution",
            RoundPhase::FlipThree { .. } => "flip three",
            RoundPhase::RoundEnd => "round end",
        }
    }

    #[must_use]
    pub fn pending_action(&self) -> Option<&PendingAction> {
        match self {
            RoundPhase::ResolvingAction { pending, .. } => Some(pending),
            _ => None,
        }
    }

    #[must_use]
    pub fn flip_three(&self) -> Option<&FlipThreeState> {
        match self {
            RoundPhase::FlipThree { flip, .. } => Some(flip),
            _ => None,
        }
    }

    /// Whether the round is still in its dealing stage, including action
    /// cards and Flip Threes raised while dealing.
    #[must_use]
    pub fn is_dealing(&self) -> bool {
        match self {
            RoundPhase::Dealing { .. } => true,
            RoundPhase::ResolvingAction { resume, .. } | RoundPhase::FlipThree { resume, .. } => {
                matches!(resume, Resume::Dealing { .. })
            }
            RoundPhase::PlayerTurn | RoundPhase::RoundEnd => false,
        }
    }
}
