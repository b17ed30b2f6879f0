//! Replay scripts - recorded oracle answers for offline sessions.

use std::path::Path;

use anyhow::{Context, Result};
use memini_core::Topic;
use memini_oracle::{ScriptedOracle, ScriptedReply};
use serde::Deserialize;
use serde_json::Value;

/// A recorded session.
#[derive(Debug, Deserialize)]
pub struct ReplayScript {
    /// Topic label; omitted means detection from the opening (or general)
    #[serde(default)]
    pub topic: Option<String>,

    /// Free-form opening that starts the session instead of a greeting
    #[serde(default)]
    pub opening: Option<String>,

    /// User inputs and the oracle's recorded answers
    pub turns: Vec<ScriptTurn>,

    /// Recorded end-of-session summary
    #[serde(default)]
    pub summary: Option<Value>,
}

/// One recorded turn.
#[derive(Debug, Deserialize)]
pub struct ScriptTurn {
    /// What the user typed
    pub input: String,

    /// Oracle answer: an object, raw text, or null for a failed call
    #[serde(default)]
    pub response: Value,
}

impl ReplayScript {
    /// Load a script from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing script {}", path.display()))
    }

    /// The scripted topic, if any. Unknown labels become general reminiscence.
    pub fn topic(&self) -> Option<Topic> {
        self.topic.as_deref().map(Topic::from_label)
    }

    /// Build an oracle that plays back this script.
    pub fn oracle(&self, topic: Option<Topic>) -> ScriptedOracle {
        let replies = self.turns.iter().map(|turn| match &turn.response {
            Value::Null => ScriptedReply::Fail("scripted failure".to_string()),
            Value::String(text) => ScriptedReply::Text(text.clone()),
            other => ScriptedReply::Json(other.clone()),
        });

        let mut oracle = ScriptedOracle::new(replies);
        if let Some(topic) = topic {
            oracle = oracle.with_topic(topic);
        }
        if let Some(summary) = &self.summary {
            oracle = oracle.with_summary(summary.clone());
        }
        oracle
    }
}
