//! The session aggregate and its lifecycle.
//!
//! `GameSession` owns everything about one game: seats, piles, the current
//! round and its phase, and the settled history. Fields are private; the
//! state machine in `machine.rs` and the lifecycle operations below are
//! the only writers.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::model::{GameStatus, Player, RoundResult, ScoreEntry};
use super::phase::{FlipThreeState, PendingAction, Resume, RoundPhase};
use crate::cards::{Card, Piles};
use crate::core::{
    EngineError, GameRng, GameSettings, PlayerId, PlayerMap, Result, MAX_PLAYERS, MIN_PLAYERS,
};
use crate::rules::PlayerRoundState;

/// A game in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub(super) players: PlayerMap<Player>,
    pub(super) piles: Piles,
    pub(super) dealer: PlayerId,
    pub(super) current_round: u32,
    pub(super) round_states: PlayerMap<PlayerRoundState>,
    /// Whose turn it is. During dealing, the seat dealing started from.
    pub(super) current_player: PlayerId,
    pub(super) phase: RoundPhase,
    pub(super) status: GameStatus,
    pub(super) round_history: Vector<RoundResult>,
    pub(super) rng: GameRng,
}

impl GameSession {
    /// Create a session with a freshly shuffled deck and deal into round 1.
    ///
    /// Fails with `InvalidPlayerCount` unless there are 2 to 18 names.
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>, seed: u64) -> Result<Self> {
        let mut rng = GameRng::new(seed);
        let piles = Piles::shuffled(&mut rng);
        Self::from_parts(names, piles, rng)
    }

    /// Create a session seeded from OS entropy.
    pub fn from_entropy<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Result<Self> {
        let mut rng = GameRng::from_entropy();
        let piles = Piles::shuffled(&mut rng);
        Self::from_parts(names, piles, rng)
    }

    /// Create a session over a predetermined draw pile (top card last).
    ///
    /// Draws come off the end of `deck` in order until it runs out; the
    /// seed only matters once the discard pile has to be reshuffled.
    pub fn with_deck<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
        deck: Vector<Card>,
        seed: u64,
    ) -> Result<Self> {
        Self::from_parts(names, Piles::new(deck), GameRng::new(seed))
    }

    fn from_parts<S: Into<String>>(names: impl IntoIterator<Item = S>, piles: Piles, rng: GameRng) -> Result<Self> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&names.len()) {
            return Err(EngineError::InvalidPlayerCount {
                got: names.len(),
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
            });
        }

        let count = names.len();
        let players = PlayerMap::new(count, |id| Player::new(id, names[id.index()].clone()));
        let dealer = PlayerId::new(0);

        let mut session = Self {
            round_states: PlayerMap::new(count, PlayerRoundState::new),
            players,
            piles,
            dealer,
            current_round: 1,
            current_player: dealer.next(count),
            phase: RoundPhase::RoundEnd,
            status: GameStatus::Playing,
            round_history: Vector::new(),
            rng,
        };
        session.begin_round();

        info!(players = count, seed = session.rng.seed(), "Session created");
        Ok(session)
    }

    // === Read-only view ===

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.try_get(id)
    }

    #[must_use]
    pub fn round_states(&self) -> &PlayerMap<PlayerRoundState> {
        &self.round_states
    }

    #[must_use]
    pub fn round_state(&self, id: PlayerId) -> Option<&PlayerRoundState> {
        self.round_states.try_get(id)
    }

    /// The draw pile, top card last.
    #[must_use]
    pub fn deck(&self) -> &Vector<Card> {
        self.piles.deck()
    }

    #[must_use]
    pub fn discard_pile(&self) -> &Vector<Card> {
        self.piles.discard_pile()
    }

    #[must_use]
    pub fn dealer(&self) -> PlayerId {
        self.dealer
    }

    /// 1-based number of the round being played (or about to be).
    #[must_use]
    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    #[must_use]
    pub fn phase(&self) -> &RoundPhase {
        &self.phase
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn pending_action(&self) -> Option<&PendingAction> {
        self.phase.pending_action()
    }

    #[must_use]
    pub fn flip_three_state(&self) -> Option<&FlipThreeState> {
        self.phase.flip_three()
    }

    /// Seat receiving the next dealt card, while dealing.
    #[must_use]
    pub fn dealing_seat(&self) -> Option<PlayerId> {
        match self.phase {
            RoundPhase::Dealing { seat } => Some(seat),
            _ => None,
        }
    }

    #[must_use]
    pub fn round_history(&self) -> &Vector<RoundResult> {
        &self.round_history
    }

    /// Players ordered by total score, highest first. Ties keep seat order.
    #[must_use]
    pub fn standings(&self) -> Vec<&Player> {
        let mut ranked: Vec<&Player> = self.players.values().collect();
        ranked.sort_by(|a, b| b.total_score.cmp(&a.total_score));
        ranked
    }

    /// The players sharing the top total once the game is over.
    #[must_use]
    pub fn winners(&self) -> Vec<&Player> {
        if self.status != GameStatus::GameOver {
            return Vec::new();
        }
        let best = self.players.values().map(|p| p.total_score).max().unwrap_or(0);
        self.players.values().filter(|p| p.total_score == best).collect()
    }

    /// Cards currently in players' hands.
    #[must_use]
    pub fn cards_in_hands(&self) -> usize {
        self.round_states.values().map(|state| state.cards().count()).sum()
    }

    /// Check that every seat the session refers to exists.
    ///
    /// Sessions built through the constructors always pass. Decoded ones
    /// may not, and the state machine indexes seats without bounds checks.
    pub fn validate(&self) -> Result<()> {
        let count = self.players.player_count();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(corrupt(format!("{} players", count)));
        }
        if self.round_states.player_count() != count {
            return Err(corrupt(format!(
                "{} round states for {} players",
                self.round_states.player_count(),
                count
            )));
        }
        for (seat, player) in self.players.iter() {
            if player.id != seat || self.round_states[seat].player_id != seat {
                return Err(corrupt(format!("{} holds another seat's data", seat)));
            }
        }

        let mut seats = vec![("dealer", self.dealer), ("current player", self.current_player)];
        match &self.phase {
            RoundPhase::Dealing { seat } => seats.push(("dealing seat", *seat)),
            RoundPhase::ResolvingAction { pending, resume } => {
                seats.push(("pending source", pending.source()));
                if let Resume::Dealing { seat } = resume {
                    seats.push(("resume seat", *seat));
                }
            }
            RoundPhase::FlipThree { flip, resume } => {
                seats.push(("flip three target", flip.target));
                seats.push(("flip three source", flip.source));
                if let Resume::Dealing { seat } = resume {
                    seats.push(("resume seat", *seat));
                }
            }
            RoundPhase::PlayerTurn | RoundPhase::RoundEnd => {}
        }
        match seats.into_iter().find(|(_, seat)| seat.index() >= count) {
            Some((role, seat)) => Err(corrupt(format!("{} {} out of range", role, seat))),
            None => Ok(()),
        }
    }

    // === Lifecycle ===

    /// Start the next round after a round summary.
    ///
    /// Last round's hands go to the discard pile. If fewer than two cards
    /// per player remain to be drawn, the discard pile is shuffled back in.
    /// Every player gets a fresh round state and dealing starts from the
    /// seat after the dealer.
    pub fn start_round(&mut self) -> Result<()> {
        if self.status != GameStatus::RoundSummary {
            debug!(status = self.status.name(), "Rejected start round");
            return Err(EngineError::OutOfPhase {
                operation: "start round",
                phase: self.status.name(),
            });
        }

        for state in self.round_states.values() {
            self.piles.discard_all(state.cards());
        }
        let min_cards = 2 * self.player_count();
        self.piles.reshuffle_if_below(min_cards, &mut self.rng);

        self.begin_round();
        self.status = GameStatus::Playing;
        info!(
            round = self.current_round,
            dealer = %self.dealer,
            deck = self.piles.deck().len(),
            "Round started"
        );
        Ok(())
    }

    /// Settle a finished round.
    ///
    /// Recomputes every round score, adds it to the player's total, records
    /// the result, rotates the dealer, and decides between another round and
    /// game over against `settings.target_score`.
    pub fn end_round(&mut self, settings: &GameSettings) -> Result<RoundResult> {
        if self.status != GameStatus::Playing || self.phase != RoundPhase::RoundEnd {
            debug!(phase = self.phase.name(), status = self.status.name(), "Rejected end round");
            return Err(EngineError::OutOfPhase {
                operation: "end round",
                phase: self.phase.name(),
            });
        }

        let mut scores = Vec::with_capacity(self.player_count());
        for (id, state) in self.round_states.iter_mut() {
            state.snapshot_score();
            self.players[id].total_score += state.round_score;
            scores.push(ScoreEntry {
                player_id: id,
                score: state.round_score,
            });
        }

        let result = RoundResult {
            round: self.current_round,
            scores,
        };
        self.round_history.push_back(result.clone());
        self.dealer = self.dealer.next(self.player_count());
        self.current_round += 1;

        let reached = self
            .players
            .values()
            .any(|p| p.total_score >= settings.target_score);
        self.status = if reached {
            GameStatus::GameOver
        } else {
            GameStatus::RoundSummary
        };

        info!(
            round = result.round,
            status = self.status.name(),
            target = settings.target_score,
            "Round settled"
        );
        Ok(result)
    }

    /// Reset round states and open dealing from the seat after the dealer.
    fn begin_round(&mut self) {
        let count = self.player_count();
        self.round_states = PlayerMap::new(count, PlayerRoundState::new);
        let start = self.dealer.next(count);
        self.current_player = start;
        self.phase = RoundPhase::Dealing { seat: start };
    }
}

fn corrupt(detail: String) -> EngineError {
    debug!(%detail, "Rejected session");
    EngineError::Snapshot(detail)
}
