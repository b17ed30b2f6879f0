//! Progress Tracking
//!
//! Dimension and milestone coverage, active dimension selection, and
//! progress snapshots for rendering.

#![warn(missing_docs)]

pub mod tracker;
pub mod selector;
pub mod snapshot;

pub use tracker::{
    milestones_covered_in, progress_ratio, BasicProgressTracker, CoveragePolicy, ProgressTracker,
};
pub use selector::select_active;
pub use snapshot::{DimensionStatus, MilestoneStatus, ProgressSnapshot};
