//! Game settings and fixed rule constants.
//!
//! `GameSettings` carries the knobs a table can change between games.
//! The constants describe the fixed rules every session plays by.

use serde::{Deserialize, Serialize};

/// Fewest seats a session may be created with.
pub const MIN_PLAYERS: usize = 2;

/// Most seats a session may be created with.
pub const MAX_PLAYERS: usize = 18;

/// Distinct number cards needed for a Flip Seven.
pub const FLIP_SEVEN_CARDS: usize = 7;

/// Flat bonus for a Flip Seven.
pub const FLIP_SEVEN_BONUS: u32 = 15;

/// Cards forced on the target of a Flip Three.
pub const FLIP_THREE_DRAWS: u8 = 3;

/// Total score that ends the game when reached by any player.
pub const DEFAULT_TARGET_SCORE: u32 = 200;

/// Per-table settings.
///
/// ```
/// use flip_seven::core::GameSettings;
///
/// let settings = GameSettings::new().with_target_score(150);
/// assert_eq!(settings.target_score, 150);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    /// A round that lifts any player's total to this value ends the game.
    pub target_score: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            target_score: DEFAULT_TARGET_SCORE,
        }
    }
}

impl GameSettings {
    /// Create settings with the default target score.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target score.
    #[must_use]
    pub fn with_target_score(mut self, target_score: u32) -> Self {
        self.target_score = target_score;
        self
    }

    /// Merge a partial update, keeping fields the update leaves out.
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(target_score) = update.target_score {
            self.target_score = target_score;
        }
    }
}

/// Partial settings change. `None` fields are left as they are.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub target_score: Option<u32>,
}
