//! Progress tracking service.

use memini_core::{
    canonical_milestone, Dimension, OracleJudgment, SessionProgress, TOTAL_MILESTONES,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// How a judgment's dimensions combine with the current coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoveragePolicy {
    /// The latest judgment replaces the covered set.
    Overwrite,
    /// The latest judgment is added to the covered set.
    Merge,
}

impl Default for CoveragePolicy {
    fn default() -> Self {
        CoveragePolicy::Overwrite
    }
}

/// Progress tracking service.
pub trait ProgressTracker: Send + Sync {
    /// Fold one oracle judgment into the progress, returning the new state.
    fn apply_judgment(&self, progress: &SessionProgress, judgment: &OracleJudgment) -> SessionProgress;

    /// Fraction of catalog milestones covered, in [0, 1].
    fn progress_ratio(&self, progress: &SessionProgress) -> f32 {
        progress_ratio(progress)
    }
}

/// Basic progress tracker implementation.
///
/// Milestones always accumulate. Dimensions follow the configured
/// [`CoveragePolicy`].
#[derive(Debug, Clone, Default)]
pub struct BasicProgressTracker {
    policy: CoveragePolicy,
}

impl BasicProgressTracker {
    /// Create a tracker with the default overwrite policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker with an explicit dimension policy.
    pub fn with_policy(policy: CoveragePolicy) -> Self {
        Self { policy }
    }

    /// The dimension policy in use.
    pub fn policy(&self) -> CoveragePolicy {
        self.policy
    }
}

impl ProgressTracker for BasicProgressTracker {
    fn apply_judgment(&self, progress: &SessionProgress, judgment: &OracleJudgment) -> SessionProgress {
        let mut next = progress.clone();

        let dimensions = judgment.covered_dimensions.iter().copied();
        match self.policy {
            CoveragePolicy::Overwrite => next.replace_dimensions(dimensions),
            CoveragePolicy::Merge => next.extend_dimensions(dimensions),
        }

        for name in &judgment.covered_milestones {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let added = match canonical_milestone(name) {
                Some(canonical) => next.add_milestone(canonical),
                None => {
                    warn!("Oracle reported milestone {:?} not in catalog", name);
                    next.add_milestone(name)
                }
            };
            if added {
                debug!("Milestone covered: {}", name);
            }
        }

        let dropped: Vec<Dimension> = progress
            .covered_dimensions()
            .difference(next.covered_dimensions())
            .copied()
            .collect();
        if !dropped.is_empty() {
            debug!("Dimensions no longer reported covered: {:?}", dropped);
        }

        next
    }
}

/// Fraction of catalog milestones covered: `|covered| / 18`, clamped to 1.0.
pub fn progress_ratio(progress: &SessionProgress) -> f32 {
    let covered = progress.covered_milestones().len();
    if covered > TOTAL_MILESTONES {
        warn!(
            "{} distinct milestones reported, more than the {} in the catalog",
            covered, TOTAL_MILESTONES
        );
    }
    (covered as f32 / TOTAL_MILESTONES as f32).min(1.0)
}

/// Number of a dimension's catalog milestones that are covered.
pub fn milestones_covered_in(progress: &SessionProgress, dimension: Dimension) -> usize {
    dimension
        .milestones()
        .iter()
        .filter(|m| progress.is_milestone_covered(m))
        .count()
}
