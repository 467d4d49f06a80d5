//! Session-level records: players, round results, game status.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Sum of settled round scores. Only ever grows.
    pub total_score: u32,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            total_score: 0,
        }
    }
}

/// One player's settled score for a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player_id: PlayerId,
    pub score: u32,
}

/// Settled scores of one round, appended to the session history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// 1-based round number.
    pub round: u32,
    /// One entry per seat, in seat order.
    pub scores: Vec<ScoreEntry>,
}

impl RoundResult {
    /// Score a seat earned in this round.
    #[must_use]
    pub fn score_of(&self, player: PlayerId) -> Option<u32> {
        self.scores
            .iter()
            .find(|entry| entry.player_id == player)
            .map(|entry| entry.score)
    }
}

/// Where the session stands between rounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// A round is being played.
    Playing,
    /// A round was settled and nobody reached the target yet.
    RoundSummary,
    /// Someone reached the target score.
    GameOver,
}

impl GameStatus {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::RoundSummary => "round summary",
            GameStatus::GameOver => "game over",
        }
    }
}
