//! Deterministic oracle driven by a pre-recorded script.
//!
//! Replies are consumed in order, one per `submit_turn` call. Used for
//! tests and for replaying sessions from the CLI without a live model.

use std::collections::VecDeque;

use async_trait::async_trait;
use memini_core::{ChatTurn, ImagePayload, OracleResponse, SessionSummary, Topic};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use super::{Oracle, OracleError, OracleRequest, Result};

/// One scripted answer to a turn.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Already-decoded response
    Response(OracleResponse),
    /// JSON object, decoded with per-field defaulting
    Json(Value),
    /// Raw response text, which may fail to parse
    Text(String),
    /// Simulated service failure
    Fail(String),
}

/// What the oracle was asked, kept for inspection in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// Number of transcript turns passed as history
    pub history_len: usize,
    /// Topic the request was made under
    pub topic: Topic,
    /// User text sent
    pub user_text: String,
    /// Whether an image was attached
    pub has_image: bool,
}

/// Oracle that plays back a fixed script.
pub struct ScriptedOracle {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<RecordedRequest>>,
    topic: Option<Topic>,
    summary: Option<Value>,
}

impl ScriptedOracle {
    /// Create an oracle that answers turns with `replies` in order.
    pub fn new(replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
            topic: None,
            summary: None,
        }
    }

    /// Answer topic detection with a fixed topic. Without this, detection fails.
    pub fn with_topic(mut self, topic: Topic) -> Self {
        self.topic = Some(topic);
        self
    }

    /// Answer summarization with a JSON summary. Without this, summarization fails.
    pub fn with_summary(mut self, summary: Value) -> Self {
        self.summary = Some(summary);
        self
    }

    /// Requests received so far.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of scripted replies not yet consumed.
    pub async fn remaining(&self) -> usize {
        self.replies.lock().await.len()
    }
}

#[async_trait]
impl Oracle for ScriptedOracle {
    async fn submit_turn(&self, request: OracleRequest<'_>) -> Result<OracleResponse> {
        self.requests.lock().await.push(RecordedRequest {
            history_len: request.history.len(),
            topic: request.topic,
            user_text: request.user_text.to_string(),
            has_image: request.image.is_some(),
        });

        let next = self.replies.lock().await.pop_front();
        debug!("Scripted oracle answering turn: {:?}", next);

        match next.ok_or(OracleError::Exhausted)? {
            ScriptedReply::Response(response) => Ok(response),
            ScriptedReply::Json(value) => Ok(OracleResponse::from_value(&value)),
            ScriptedReply::Text(text) => Ok(OracleResponse::from_json(&text)?),
            ScriptedReply::Fail(reason) => Err(OracleError::Unavailable(reason)),
        }
    }

    async fn detect_topic(&self, _text: &str, _image: Option<&ImagePayload>) -> Result<Topic> {
        self.topic
            .ok_or_else(|| OracleError::Unavailable("no scripted topic".to_string()))
    }

    async fn summarize_session(&self, _transcript: &[ChatTurn]) -> Result<SessionSummary> {
        self.summary
            .as_ref()
            .map(SessionSummary::from_value)
            .ok_or_else(|| OracleError::Unavailable("no scripted summary".to_string()))
    }
}
