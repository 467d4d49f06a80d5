//! Round and turn state machine.
//!
//! ## Phases
//!
//! ```text
//! Dealing ──► PlayerTurn ──► RoundEnd
//!    │  ▲        │  ▲
//!    ▼  │        ▼  │
//! ResolvingAction ──► FlipThree
//! ```
//!
//! Every operation is one synchronous step. Multi-step sequences (the deal,
//! the three forced draws of a Flip Three) are driven by calling the step
//! operation repeatedly; the engine never loops or waits on its own.
//!
//! Each operation checks everything that could reject it before touching
//! the session, so an `Err` always leaves the session unchanged.

use tracing::debug;

use super::phase::{FlipThreeState, PendingAction, Resume, RoundPhase};
use super::state::GameSession;
use crate::cards::{Card, TargetAction};
use crate::core::{EngineError, PlayerId, Result, FLIP_THREE_DRAWS};
use crate::rules::{apply_card, settle_second_chance, DrawContext, DrawOutcome};

impl GameSession {
    // === Dealing ===

    /// Deal one card to the seat whose turn it is to receive one.
    ///
    /// The card takes effect exactly as a drawn card would. A seat keeps
    /// being dealt to until it holds a number card; once every eligible
    /// seat has one and the rotation is back at the start seat, play moves
    /// to the first player's turn.
    pub fn deal_next_card(&mut self) -> Result<Card> {
        let RoundPhase::Dealing { seat } = self.phase else {
            return Err(self.out_of_phase("deal next card"));
        };

        let card = self.draw()?;
        let outcome = apply_card(&mut self.round_states[seat], card, DrawContext::Normal);
        debug!(seat = %seat, card = %card, ?outcome, "Dealt card");

        self.after_draw(seat, card, outcome, Resume::Dealing { seat });
        Ok(card)
    }

    /// Aim the action card raised during dealing at `target`.
    pub fn resolve_dealing_action(&mut self, target: PlayerId) -> Result<()> {
        let (card, action, resume) = self.pending_target("resolve dealing action")?;
        if !matches!(resume, Resume::Dealing { .. }) {
            return Err(self.out_of_phase("resolve dealing action"));
        }
        self.check_target(target)?;

        self.resolve_target(card, action, target, resume);
        Ok(())
    }

    /// Drop the action card raised during dealing without effect.
    pub fn skip_dealing_action(&mut self) -> Result<()> {
        let (card, _, resume) = self.pending_target("skip dealing action")?;
        if !matches!(resume, Resume::Dealing { .. }) {
            return Err(self.out_of_phase("skip dealing action"));
        }

        debug!(card = %card, "Skipped dealing action");
        self.resume(resume);
        Ok(())
    }

    // === Turns ===

    /// The current player draws a card.
    ///
    /// Unless the card needs a decision (a target, or whether to spend a
    /// Second Chance), the turn then passes to the next eligible player.
    pub fn hit_player(&mut self) -> Result<Card> {
        let seat = self.acting_player("hit")?;

        let card = self.draw()?;
        let outcome = apply_card(&mut self.round_states[seat], card, DrawContext::Normal);
        debug!(seat = %seat, card = %card, ?outcome, "Player hit");

        self.after_draw(seat, card, outcome, Resume::PlayerTurn);
        Ok(card)
    }

    /// The current player banks their hand for the round.
    pub fn stay_player(&mut self) -> Result<()> {
        let seat = self.acting_player("stay")?;

        let state = &mut self.round_states[seat];
        state.stay();
        debug!(seat = %seat, score = state.round_score, "Player stayed");

        self.advance_turn();
        Ok(())
    }

    /// Pass control from a current player who can no longer act to the
    /// next eligible seat, or end the round if there is none.
    ///
    /// Hit, stay and every resolution already advance the turn themselves,
    /// so after public calls this normally returns `OutOfPhase`. It is the
    /// recovery path for a session left on an inactive seat, such as a
    /// decoded one. Rejected while the current player can still act, so it
    /// can never skip a live turn, and once the round has reached
    /// `RoundEnd`.
    pub fn advance_to_next_player(&mut self) -> Result<()> {
        if self.phase != RoundPhase::PlayerTurn || self.round_states[self.current_player].can_act() {
            return Err(self.out_of_phase("advance to next player"));
        }

        self.advance_turn();
        Ok(())
    }

    /// Aim the action card drawn on a turn at `target`.
    pub fn resolve_action_card(&mut self, target: PlayerId) -> Result<()> {
        let (card, action, resume) = self.pending_target("resolve action card")?;
        if resume != Resume::PlayerTurn {
            return Err(self.out_of_phase("resolve action card"));
        }
        self.check_target(target)?;

        self.resolve_target(card, action, target, resume);
        Ok(())
    }

    // === Flip Three ===

    /// Force the next of the Flip Three draws on its target.
    ///
    /// Ends the Flip Three after the third completed draw, or at once if the
    /// target busts or reaches Flip Seven. A duplicate is cancelled by a
    /// banked Second Chance without asking; action cards are only banked.
    pub fn resolve_flip_three_card(&mut self) -> Result<Card> {
        let RoundPhase::FlipThree { flip, resume } = &self.phase else {
            return Err(self.no_flip_three("resolve flip three card"));
        };
        let (mut flip, resume) = (flip.clone(), *resume);

        let card = self.draw()?;
        let outcome = apply_card(&mut self.round_states[flip.target], card, DrawContext::Forced);
        debug!(
            target = %flip.target,
            card = %card,
            ?outcome,
            remaining = flip.cards_remaining,
            "Flip three draw"
        );

        match outcome {
            DrawOutcome::SecondChanceSpent => self.piles.discard(card),
            DrawOutcome::ActionBanked(_) => flip.uncovered_actions.push(card),
            _ => {}
        }

        flip.cards_remaining = flip.cards_remaining.saturating_sub(1);
        if outcome.ends_participation() || flip.cards_remaining == 0 {
            debug!(target = %flip.target, "Flip three finished");
            self.resume(resume);
        } else {
            self.phase = RoundPhase::FlipThree { flip, resume };
        }
        Ok(card)
    }

    /// Abandon any Flip Three draws still outstanding.
    pub fn skip_flip_three_action(&mut self) -> Result<()> {
        let RoundPhase::FlipThree { flip, resume } = &self.phase else {
            return Err(self.no_flip_three("skip flip three action"));
        };

        debug!(target = %flip.target, remaining = flip.cards_remaining, "Flip three abandoned");
        let resume = *resume;
        self.resume(resume);
        Ok(())
    }

    // === Second Chance ===

    /// Settle a duplicate drawn while holding a Second Chance.
    ///
    /// With `discard` the duplicate goes to the discard pile, the Second
    /// Chance is spent and the same player carries on. Without it the
    /// duplicate joins the hand and the player busts.
    pub fn use_second_chance(&mut self, discard: bool) -> Result<()> {
        let RoundPhase::ResolvingAction {
            pending: PendingAction::SecondChance { card, player },
            resume,
        } = self.phase
        else {
            debug!(operation = "use second chance", phase = self.phase.name(), "No pending action");
            return Err(EngineError::NoPendingAction);
        };

        let spent = settle_second_chance(&mut self.round_states[player], card, discard);
        debug!(seat = %player, card = %card, spent = discard, "Second chance settled");

        match spent {
            Some(duplicate) => {
                self.piles.discard(duplicate);
                match resume {
                    Resume::PlayerTurn => self.phase = RoundPhase::PlayerTurn,
                    Resume::Dealing { seat } => self.continue_dealing(seat),
                }
            }
            None => self.resume(resume),
        }
        Ok(())
    }

    // === Internals ===

    fn out_of_phase(&self, operation: &'static str) -> EngineError {
        debug!(operation, phase = self.phase.name(), "Rejected command");
        EngineError::OutOfPhase {
            operation,
            phase: self.phase.name(),
        }
    }

    fn no_flip_three(&self, operation: &'static str) -> EngineError {
        debug!(operation, phase = self.phase.name(), "No flip three in progress");
        EngineError::NoFlipThreeState
    }

    /// The current player, if it is their turn and they can still act.
    fn acting_player(&self, operation: &'static str) -> Result<PlayerId> {
        let seat = self.current_player;
        if self.phase == RoundPhase::PlayerTurn && self.round_states[seat].can_act() {
            Ok(seat)
        } else {
            Err(self.out_of_phase(operation))
        }
    }

    fn pending_target(&self, operation: &'static str) -> Result<(Card, TargetAction, Resume)> {
        match &self.phase {
            RoundPhase::ResolvingAction {
                pending: PendingAction::Target { card, action, .. },
                resume,
            } => Ok((*card, *action, *resume)),
            RoundPhase::ResolvingAction { .. } => Err(self.out_of_phase(operation)),
            _ => {
                debug!(operation, phase = self.phase.name(), "No pending action");
                Err(EngineError::NoPendingAction)
            }
        }
    }

    fn check_target(&self, target: PlayerId) -> Result<()> {
        match self.round_states.try_get(target) {
            Some(state) if state.can_act() => Ok(()),
            _ => {
                debug!(target = %target, "Rejected target");
                Err(EngineError::InvalidTarget(target))
            }
        }
    }

    /// Take the top card, committing the new piles.
    fn draw(&mut self) -> Result<Card> {
        let (card, piles) = self.piles.draw(&mut self.rng)?;
        self.piles = piles;
        Ok(card)
    }

    /// Route a normal (dealt or hit) draw to the next phase.
    fn after_draw(&mut self, seat: PlayerId, card: Card, outcome: DrawOutcome, resume: Resume) {
        match outcome {
            DrawOutcome::NeedsTarget(action) => {
                if self.round_states.values().any(|s| s.can_act()) {
                    self.phase = RoundPhase::ResolvingAction {
                        pending: PendingAction::Target {
                            card,
                            action,
                            source: seat,
                        },
                        resume,
                    };
                } else {
                    debug!(card = %card, "No eligible target, action skipped");
                    self.resume(resume);
                }
            }
            DrawOutcome::SecondChanceOffered => {
                self.phase = RoundPhase::ResolvingAction {
                    pending: PendingAction::SecondChance { card, player: seat },
                    resume,
                };
            }
            _ => self.resume(resume),
        }
    }

    fn resolve_target(&mut self, card: Card, action: TargetAction, target: PlayerId, resume: Resume) {
        match action {
            TargetAction::Freeze => {
                let state = &mut self.round_states[target];
                state.freeze();
                debug!(card = %card, target = %target, score = state.round_score, "Player frozen");
                self.resume(resume);
            }
            TargetAction::FlipThree => {
                let source = match resume {
                    Resume::Dealing { seat } => seat,
                    Resume::PlayerTurn => self.current_player,
                };
                debug!(card = %card, source = %source, target = %target, "Flip three started");
                self.phase = RoundPhase::FlipThree {
                    flip: FlipThreeState {
                        target,
                        source,
                        cards_remaining: FLIP_THREE_DRAWS,
                        uncovered_actions: Default::default(),
                    },
                    resume,
                };
            }
        }
    }

    fn resume(&mut self, resume: Resume) {
        match resume {
            Resume::Dealing { seat } => self.continue_dealing(seat),
            Resume::PlayerTurn => self.advance_turn(),
        }
    }

    fn needs_deal(&self, seat: PlayerId) -> bool {
        let state = &self.round_states[seat];
        state.can_act() && state.number_cards.is_empty()
    }

    /// Keep dealing to `seat` until it holds a number card, then move on
    /// around the table. Dealing ends when the rotation is back at the
    /// start seat.
    fn continue_dealing(&mut self, seat: PlayerId) {
        if self.needs_deal(seat) {
            self.phase = RoundPhase::Dealing { seat };
            return;
        }

        let start = self.current_player;
        let next = seat
            .rotation_after(self.player_count())
            .take_while(|&s| s != start)
            .find(|&s| self.needs_deal(s));

        match next {
            Some(next) => self.phase = RoundPhase::Dealing { seat: next },
            None => self.finish_dealing(start),
        }
    }

    fn finish_dealing(&mut self, start: PlayerId) {
        if self.round_states[start].can_act() {
            debug!(first = %start, "Dealing complete");
            self.current_player = start;
            self.phase = RoundPhase::PlayerTurn;
        } else {
            self.current_player = start;
            self.advance_turn();
        }
    }

    /// Move the turn to the next seat after the current one that can
    /// still act, wrapping around; the round ends if there is none.
    fn advance_turn(&mut self) {
        let next = self
            .current_player
            .rotation_after(self.player_count())
            .find(|&s| self.round_states[s].can_act());

        match next {
            Some(seat) => {
                self.current_player = seat;
                self.phase = RoundPhase::PlayerTurn;
                debug!(seat = %seat, "Turn passed");
            }
            None => {
                self.phase = RoundPhase::RoundEnd;
                debug!(round = self.current_round, "Nobody left to act, round over");
            }
        }
    }
}
