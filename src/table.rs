//! The table: settings plus at most one session in progress.
//!
//! `Table` is the single writer callers talk to. It owns the settings that
//! outlive any one game, creates and abandons sessions, routes commands to
//! the current session and encodes the whole thing for persistence.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cards::Card;
use crate::core::{EngineError, GameSettings, Result, SettingsUpdate};
use crate::session::{Command, GameSession, RoundResult};

/// Settings and the current session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    settings: GameSettings,
    session: Option<GameSession>,
}

impl Table {
    /// Create a table with the given settings and no session.
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        Self {
            settings,
            session: None,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Merge the provided fields into the settings.
    ///
    /// A new target score applies from the next round settlement on.
    pub fn update_settings(&mut self, update: SettingsUpdate) {
        self.settings.apply(update);
        info!(target_score = self.settings.target_score, "Settings updated");
    }

    /// Start a new game, replacing any session in progress.
    ///
    /// On `InvalidPlayerCount` the current session is kept.
    pub fn create_session<S: Into<String>>(&mut self, names: impl IntoIterator<Item = S>) -> Result<&GameSession> {
        let session = GameSession::from_entropy(names)?;
        Ok(&*self.session.insert(session))
    }

    /// Start a new, replayable game from `seed`.
    pub fn create_session_with_seed<S: Into<String>>(
        &mut self,
        names: impl IntoIterator<Item = S>,
        seed: u64,
    ) -> Result<&GameSession> {
        let session = GameSession::new(names, seed)?;
        Ok(&*self.session.insert(session))
    }

    /// Abandon the current game. Settings are kept.
    pub fn reset_game(&mut self) {
        if self.session.take().is_some() {
            info!("Session abandoned");
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Settled rounds of the current game; empty without a session.
    #[must_use]
    pub fn round_history(&self) -> Vector<RoundResult> {
        self.session
            .as_ref()
            .map(|session| session.round_history().clone())
            .unwrap_or_default()
    }

    /// Run a command against the current session.
    pub fn dispatch(&mut self, command: Command) -> Result<Option<Card>> {
        let session = self.session.as_mut().ok_or(EngineError::NoSession)?;
        session.execute(command, &self.settings)
    }

    /// Encode settings and session.
    pub fn snapshot(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a table written by `snapshot`.
    ///
    /// A decoded session whose seats do not line up is rejected with
    /// `Snapshot` instead of being handed to the state machine.
    pub fn restore(bytes: &[u8]) -> Result<Self> {
        let table: Table = bincode::deserialize(bytes)?;
        if let Some(session) = &table.session {
            session.validate()?;
        }
        Ok(table)
    }
}
