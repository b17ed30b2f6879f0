//! Session progress - which dimensions and milestones are covered.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::catalog::Dimension;

/// Per-session coverage state.
///
/// Milestones can only be added, never removed, so the set grows
/// monotonically for the life of a session. Dimensions are replaced
/// wholesale by the tracker after each oracle judgment. The active
/// dimension is derived from this state and is not stored here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProgress {
    covered_dimensions: BTreeSet<Dimension>,
    covered_milestones: BTreeSet<String>,
}

impl SessionProgress {
    /// Create empty progress for a new session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Covered dimensions, iterated in catalog order.
    pub fn covered_dimensions(&self) -> &BTreeSet<Dimension> {
        &self.covered_dimensions
    }

    /// Covered milestone names.
    pub fn covered_milestones(&self) -> &BTreeSet<String> {
        &self.covered_milestones
    }

    /// Check whether a dimension is currently reported covered.
    pub fn is_dimension_covered(&self, dimension: Dimension) -> bool {
        self.covered_dimensions.contains(&dimension)
    }

    /// Check whether a milestone has been covered at any point.
    pub fn is_milestone_covered(&self, name: &str) -> bool {
        self.covered_milestones.contains(name)
    }

    /// Replace the covered dimension set.
    pub fn replace_dimensions(&mut self, dimensions: impl IntoIterator<Item = Dimension>) {
        self.covered_dimensions = dimensions.into_iter().collect();
    }

    /// Add dimensions to the covered set.
    pub fn extend_dimensions(&mut self, dimensions: impl IntoIterator<Item = Dimension>) {
        self.covered_dimensions.extend(dimensions);
    }

    /// Record a milestone as covered. Returns `true` if it was new.
    pub fn add_milestone(&mut self, name: impl Into<String>) -> bool {
        self.covered_milestones.insert(name.into())
    }

    /// Builder-style dimension replacement.
    pub fn with_dimensions(mut self, dimensions: impl IntoIterator<Item = Dimension>) -> Self {
        self.replace_dimensions(dimensions);
        self
    }

    /// Builder-style milestone addition.
    pub fn with_milestones<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.add_milestone(name);
        }
        self
    }
}
