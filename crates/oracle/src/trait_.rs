//! Oracle trait abstraction.

use async_trait::async_trait;
use memini_core::{ChatTurn, ImagePayload, OracleResponse, SessionSummary, Topic};

/// Result type for oracle operations.
pub type Result<T> = std::result::Result<T, OracleError>;

/// Errors an oracle call can end with.
///
/// None of these are fatal to a session; the controller substitutes a
/// neutral fallback for every variant.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// Service or network failure
    #[error("Oracle unavailable: {0}")]
    Unavailable(String),

    /// Response was not decodable JSON
    #[error("Oracle response parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The call did not finish in time
    #[error("Oracle timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// A scripted oracle has no replies left
    #[error("Oracle script exhausted")]
    Exhausted,
}

/// Input for one conversational turn.
#[derive(Debug, Clone, Copy)]
pub struct OracleRequest<'a> {
    /// Transcript before the new user turn
    pub history: &'a [ChatTurn],

    /// Session topic
    pub topic: Topic,

    /// New user text, already substituted with a placeholder for photo-only turns
    pub user_text: &'a str,

    /// Photo sent with the new turn
    pub image: Option<&'a ImagePayload>,
}

/// The external reasoning service.
///
/// Implementations handle transport, prompting, retries and timeouts.
/// The session engine only sees decoded responses or an error.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Judge the new turn and produce a reply.
    async fn submit_turn(&self, request: OracleRequest<'_>) -> Result<OracleResponse>;

    /// Pick the topic that best fits an opening message or photo.
    async fn detect_topic(&self, text: &str, image: Option<&ImagePayload>) -> Result<Topic>;

    /// Produce the end-of-session emotional summary.
    async fn summarize_session(&self, transcript: &[ChatTurn]) -> Result<SessionSummary>;
}
