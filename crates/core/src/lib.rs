//! Memini core data models.
//!
//! This crate defines the data structures shared by the reminiscence
//! session engine: the milestone catalog, session progress, transcript
//! turns, and the decoded shape of oracle judgments.

#![warn(missing_docs)]

// Core identities
mod id;

// Static catalog
pub mod catalog;

// Session state
mod progress;
mod turn;

// Oracle payloads
mod judgment;
mod emotion;
mod topic;

// Re-exports
pub use id::*;

pub use catalog::{
    canonical_milestone, dimension_of_milestone, milestones_of, ordered_dimensions, Dimension,
    UnknownDimension, MILESTONES_PER_DIMENSION, TOTAL_MILESTONES,
};
pub use progress::SessionProgress;
pub use turn::{render_transcript, ChatTurn, ImagePayload, Role};
pub use judgment::{OracleJudgment, OracleResponse, FALLBACK_REPLY};
pub use emotion::{EmotionLabel, EmotionSignal, SessionSummary};
pub use topic::Topic;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
