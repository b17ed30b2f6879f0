//! Session configuration.

use std::time::Duration;

use memini_core::FALLBACK_REPLY;
use memini_progress::CoveragePolicy;
use serde::{Deserialize, Serialize};

use crate::completion::{CompletionPolicy, Corroborated, OracleFlag};

/// Configuration for a session controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Reply shown when the oracle fails
    pub fallback_reply: String,

    /// Delay the caller should leave the final reply visible, in milliseconds
    pub end_delay_ms: u64,

    /// How judged dimensions combine with current coverage
    pub coverage_policy: CoveragePolicy,

    /// When a session ends on its own
    pub completion: CompletionRule,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fallback_reply: FALLBACK_REPLY.to_string(),
            end_delay_ms: 2500,
            coverage_policy: CoveragePolicy::Overwrite,
            completion: CompletionRule::OracleFlag,
        }
    }
}

impl SessionConfig {
    /// Parse a JSON config. Missing keys take their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// End delay as a duration.
    pub fn end_delay(&self) -> Duration {
        Duration::from_millis(self.end_delay_ms)
    }
}

/// Which completion policy to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum CompletionRule {
    /// End when the oracle says so
    OracleFlag,
    /// End when the oracle says so and enough dimensions are covered
    Corroborated {
        /// Covered dimensions required
        min_dimensions: usize,
    },
}

impl Default for CompletionRule {
    fn default() -> Self {
        CompletionRule::OracleFlag
    }
}

impl CompletionRule {
    /// Build the policy this rule names.
    pub fn build(&self) -> Box<dyn CompletionPolicy> {
        match *self {
            CompletionRule::OracleFlag => Box::new(OracleFlag),
            CompletionRule::Corroborated { min_dimensions } => {
                Box::new(Corroborated::new(min_dimensions))
            }
        }
    }
}
