//! Oracle judgments and response decoding.
//!
//! The oracle is authoritative but untrusted. Decoding never fails on a
//! well-formed JSON object: each missing or mistyped field falls back to
//! its default independently.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::catalog::Dimension;
use crate::emotion::{EmotionLabel, EmotionSignal};

/// Reply used whenever the oracle gives no usable text.
pub const FALLBACK_REPLY: &str = "I'm listening, please go on.";

/// Structured per-turn assessment from the oracle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OracleJudgment {
    /// Dimensions the oracle currently believes are covered
    pub covered_dimensions: Vec<Dimension>,

    /// Milestone names the oracle reports as covered
    pub covered_milestones: Vec<String>,

    /// Whether the oracle signals the session should end
    pub is_session_complete: bool,

    /// Emotion reading, carried through untouched
    pub emotion: EmotionSignal,
}

impl OracleJudgment {
    /// An empty judgment: no coverage, not complete.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set covered dimensions.
    pub fn with_dimensions(mut self, dimensions: impl IntoIterator<Item = Dimension>) -> Self {
        self.covered_dimensions = dimensions.into_iter().collect();
        self
    }

    /// Set covered milestones.
    pub fn with_milestones<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.covered_milestones = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the completion flag.
    pub fn completed(mut self, complete: bool) -> Self {
        self.is_session_complete = complete;
        self
    }
}

/// A full oracle turn: reply text plus judgment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleResponse {
    /// Text shown to the user
    pub reply: String,

    /// Structured assessment
    pub judgment: OracleJudgment,
}

impl OracleResponse {
    /// Create a response.
    pub fn new(reply: impl Into<String>, judgment: OracleJudgment) -> Self {
        Self {
            reply: reply.into(),
            judgment,
        }
    }

    /// The neutral response substituted when the oracle fails.
    pub fn fallback() -> Self {
        Self {
            reply: FALLBACK_REPLY.to_string(),
            judgment: OracleJudgment {
                emotion: EmotionSignal {
                    label: EmotionLabel::Warm,
                    intensity: 0.1,
                },
                ..OracleJudgment::empty()
            },
        }
    }

    /// Decode the oracle's JSON object with per-field defaulting.
    ///
    /// Expected keys: `reply`, `coveredDimensions`, `coveredMilestones`,
    /// `isSessionComplete`, `currentEmotionLabel`, `emotionIntensity`.
    pub fn from_value(value: &Value) -> Self {
        let reply = match value.get("reply").and_then(Value::as_str) {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => {
                debug!("Oracle response has no usable reply, using fallback text");
                FALLBACK_REPLY.to_string()
            }
        };

        let covered_dimensions = string_array(value, "coveredDimensions")
            .into_iter()
            .filter_map(|label| {
                let parsed = Dimension::parse(&label);
                if parsed.is_none() {
                    warn!("Oracle reported unknown dimension {:?}, ignoring", label);
                }
                parsed
            })
            .collect();

        let covered_milestones = string_array(value, "coveredMilestones");

        let is_session_complete = value
            .get("isSessionComplete")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let defaults = EmotionSignal::default();
        let emotion = EmotionSignal {
            label: value
                .get("currentEmotionLabel")
                .and_then(Value::as_i64)
                .map(EmotionLabel::from_code)
                .unwrap_or(defaults.label),
            intensity: value
                .get("emotionIntensity")
                .and_then(Value::as_f64)
                .map(|i| (i as f32).clamp(0.0, 1.0))
                .unwrap_or(defaults.intensity),
        };

        Self {
            reply,
            judgment: OracleJudgment {
                covered_dimensions,
                covered_milestones,
                is_session_complete,
                emotion,
            },
        }
    }

    /// Decode raw oracle text. Fails only if the text is not JSON.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value))
    }
}

/// Read an array of strings, skipping non-string entries.
fn string_array(value: &Value, key: &str) -> Vec<String> {
    match value.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item.as_str() {
                Some(s) => Some(s.to_string()),
                None => {
                    debug!("Skipping non-string entry in {}: {}", key, item);
                    None
                }
            })
            .collect(),
        Some(other) => {
            debug!("Expected array for {}, got {}", key, other);
            Vec::new()
        }
        None => Vec::new(),
    }
}
