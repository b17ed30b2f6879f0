//! Read-only progress views for rendering.

use chrono::{DateTime, Utc};
use memini_core::{ordered_dimensions, Dimension, SessionProgress};
use serde::{Deserialize, Serialize};

use crate::selector::select_active;
use crate::tracker::progress_ratio;

/// A snapshot of progress at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// When snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Dimension to highlight
    pub active_dimension: Dimension,

    /// Covered dimensions, in catalog order
    pub covered_dimensions: Vec<Dimension>,

    /// Covered milestone names
    pub covered_milestones: Vec<String>,

    /// Fraction of catalog milestones covered
    pub ratio: f32,

    /// Per-dimension rail, in catalog order
    pub dimensions: Vec<DimensionStatus>,
}

/// Status of one dimension tab and its milestones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionStatus {
    /// The dimension
    pub dimension: Dimension,
    /// Reported covered by the latest judgment
    pub covered: bool,
    /// Currently active
    pub active: bool,
    /// Milestones in declared order
    pub milestones: Vec<MilestoneStatus>,
}

/// Status of one milestone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneStatus {
    /// Catalog name
    pub name: String,
    /// Covered at any point in the session
    pub covered: bool,
}

impl ProgressSnapshot {
    /// Take a snapshot of the given progress.
    pub fn capture(progress: &SessionProgress) -> Self {
        let active = select_active(progress);

        let dimensions = ordered_dimensions()
            .into_iter()
            .map(|dimension| DimensionStatus {
                dimension,
                covered: progress.is_dimension_covered(dimension),
                active: dimension == active,
                milestones: dimension
                    .milestones()
                    .iter()
                    .map(|name| MilestoneStatus {
                        name: name.to_string(),
                        covered: progress.is_milestone_covered(name),
                    })
                    .collect(),
            })
            .collect();

        Self {
            timestamp: Utc::now(),
            active_dimension: active,
            covered_dimensions: progress.covered_dimensions().iter().copied().collect(),
            covered_milestones: progress.covered_milestones().iter().cloned().collect(),
            ratio: progress_ratio(progress),
            dimensions,
        }
    }

    /// Ratio as a whole percentage, for progress bars.
    pub fn percentage(&self) -> u8 {
        (self.ratio * 100.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_empty() {
        let snapshot = ProgressSnapshot::capture(&SessionProgress::new());
        assert_eq!(snapshot.active_dimension, Dimension::Who);
        assert_eq!(snapshot.ratio, 0.0);
        assert_eq!(snapshot.dimensions.len(), 6);
        assert!(snapshot.dimensions[0].active);
        assert!(snapshot.dimensions.iter().all(|d| !d.covered));
    }

    #[test]
    fn test_capture_marks_rail() {
        let progress = SessionProgress::new()
            .with_dimensions([Dimension::Who])
            .with_milestones(["Identity", "Era"]);
        let snapshot = ProgressSnapshot::capture(&progress);

        assert_eq!(snapshot.active_dimension, Dimension::What);
        assert_eq!(snapshot.covered_dimensions, vec![Dimension::Who]);

        let who = &snapshot.dimensions[0];
        assert!(who.covered);
        assert!(!who.active);
        assert_eq!(
            who.milestones.iter().map(|m| m.covered).collect::<Vec<_>>(),
            vec![true, false, false]
        );

        let when = &snapshot.dimensions[3];
        assert_eq!(when.dimension, Dimension::When);
        assert!(!when.covered);
        assert!(when.milestones[2].covered);

        assert_eq!(snapshot.percentage(), 11);
    }
}
