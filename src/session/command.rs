//! Commands as data.
//!
//! Every session operation has a `Command` variant, so callers (a UI, a
//! replay log, a test driver) can queue, record and dispatch them
//! uniformly. `legal_commands` lists what the current phase accepts.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::model::GameStatus;
use super::phase::{PendingAction, Resume, RoundPhase};
use super::state::GameSession;
use crate::cards::Card;
use crate::core::{GameSettings, PlayerId, Result};

/// One session operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    StartRound,
    EndRound,
    DealNextCard,
    ResolveDealingAction(PlayerId),
    SkipDealingAction,
    Hit,
    Stay,
    AdvanceToNextPlayer,
    ResolveActionCard(PlayerId),
    ResolveFlipThreeCard,
    SkipFlipThreeAction,
    UseSecondChance { discard: bool },
}

impl Command {
    /// Whether the command draws a card.
    #[must_use]
    pub fn draws_card(self) -> bool {
        matches!(self, Command::DealNextCard | Command::Hit | Command::ResolveFlipThreeCard)
    }
}

/// Result of applying a command to a session snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// The session after the command.
    pub session: GameSession,
    /// The card drawn by the command, if it drew one.
    pub card: Option<Card>,
}

impl GameSession {
    /// Run a command in place. Returns the drawn card for drawing commands.
    pub fn execute(&mut self, command: Command, settings: &GameSettings) -> Result<Option<Card>> {
        match command {
            Command::StartRound => self.start_round().map(|()| None),
            Command::EndRound => self.end_round(settings).map(|_| None),
            Command::DealNextCard => self.deal_next_card().map(Some),
            Command::ResolveDealingAction(target) => self.resolve_dealing_action(target).map(|()| None),
            Command::SkipDealingAction => self.skip_dealing_action().map(|()| None),
            Command::Hit => self.hit_player().map(Some),
            Command::Stay => self.stay_player().map(|()| None),
            Command::AdvanceToNextPlayer => self.advance_to_next_player().map(|()| None),
            Command::ResolveActionCard(target) => self.resolve_action_card(target).map(|()| None),
            Command::ResolveFlipThreeCard => self.resolve_flip_three_card().map(Some),
            Command::SkipFlipThreeAction => self.skip_flip_three_action().map(|()| None),
            Command::UseSecondChance { discard } => self.use_second_chance(discard).map(|()| None),
        }
    }

    /// Apply a command to a copy of the session, leaving `self` untouched.
    ///
    /// Cloning is cheap: the piles and history are persistent vectors.
    pub fn apply(&self, command: Command, settings: &GameSettings) -> Result<Transition> {
        let mut session = self.clone();
        let card = session.execute(command, settings)?;
        Ok(Transition { session, card })
    }

    /// Commands the session accepts right now.
    ///
    /// Drawing commands are listed even if both piles are empty; they then
    /// fail with `DeckExhausted`.
    #[must_use]
    pub fn legal_commands(&self) -> Vec<Command> {
        match self.status {
            GameStatus::RoundSummary => return vec![Command::StartRound],
            GameStatus::GameOver => return Vec::new(),
            GameStatus::Playing => {}
        }

        match &self.phase {
            RoundPhase::Dealing { .. } => vec![Command::DealNextCard],
            RoundPhase::PlayerTurn => {
                if self.round_states[self.current_player].can_act() {
                    vec![Command::Hit, Command::Stay]
                } else {
                    vec![Command::AdvanceToNextPlayer]
                }
            }
            RoundPhase::ResolvingAction {
                pending: PendingAction::SecondChance { .. },
                ..
            } => vec![
                Command::UseSecondChance { discard: true },
                Command::UseSecondChance { discard: false },
            ],
            RoundPhase::ResolvingAction {
                pending: PendingAction::Target { .. },
                resume,
            } => {
                let dealing = matches!(resume, Resume::Dealing { .. });
                let targets: SmallVec<[PlayerId; 8]> = self
                    .round_states
                    .iter()
                    .filter(|(_, state)| state.can_act())
                    .map(|(id, _)| id)
                    .collect();
                let mut commands: Vec<Command> = targets
                    .into_iter()
                    .map(|id| {
                        if dealing {
                            Command::ResolveDealingAction(id)
                        } else {
                            Command::ResolveActionCard(id)
                        }
                    })
                    .collect();
                if dealing {
                    commands.push(Command::SkipDealingAction);
                }
                commands
            }
            RoundPhase::FlipThree { .. } => {
                vec![Command::ResolveFlipThreeCard, Command::SkipFlipThreeAction]
            }
            RoundPhase::RoundEnd => vec![Command::EndRound],
        }
    }
}
