//! Session context - the explicit state of one conversation.

use memini_core::{ChatTurn, SessionId, SessionProgress, Time, Topic};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Accepting turns
    Active,
    /// Terminal; no more turns
    Ended,
}

/// Everything one session owns: topic, transcript, progress, state.
///
/// Passed around as a value rather than held in shared state. Never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    /// Unique identifier
    pub id: SessionId,

    /// Conversation topic
    pub topic: Topic,

    /// When the session started
    pub started_at: Time,

    transcript: Vec<ChatTurn>,
    progress: SessionProgress,
    state: SessionState,
}

impl SessionContext {
    /// Create an empty, active session.
    pub fn new(topic: Topic) -> Self {
        Self {
            id: SessionId::new(),
            topic,
            started_at: chrono::Utc::now(),
            transcript: Vec::new(),
            progress: SessionProgress::new(),
            state: SessionState::Active,
        }
    }

    /// The transcript so far.
    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    /// Current coverage.
    pub fn progress(&self) -> &SessionProgress {
        &self.progress
    }

    /// Lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether turns are still accepted.
    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub(crate) fn push_turn(&mut self, turn: ChatTurn) {
        self.transcript.push(turn);
    }

    pub(crate) fn set_progress(&mut self, progress: SessionProgress) {
        self.progress = progress;
    }

    pub(crate) fn end(&mut self) -> bool {
        let was_active = self.is_active();
        self.state = SessionState::Ended;
        was_active
    }
}
