//! Milestone catalog - the six memory dimensions and their milestones.
//!
//! This is static data. Every place that enumerates dimensions (active
//! dimension selection, progress rendering) goes through
//! [`ordered_dimensions`] so the declared order is the same everywhere.

use serde::{Deserialize, Serialize};

/// Number of milestones tracked per dimension.
pub const MILESTONES_PER_DIMENSION: usize = 3;

/// Total number of milestones in the catalog (6 × 3).
pub const TOTAL_MILESTONES: usize = 6 * MILESTONES_PER_DIMENSION;

/// One structured aspect of a recalled memory.
///
/// Ordering follows declaration order, which is the catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// People involved
    Who,
    /// What happened
    What,
    /// Where it happened
    Where,
    /// When it happened
    When,
    /// Why it mattered
    Why,
    /// How it unfolded
    How,
}

const ORDERED: [Dimension; 6] = [
    Dimension::Who,
    Dimension::What,
    Dimension::Where,
    Dimension::When,
    Dimension::Why,
    Dimension::How,
];

impl Dimension {
    /// Get the lowercase label used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Who => "who",
            Dimension::What => "what",
            Dimension::Where => "where",
            Dimension::When => "when",
            Dimension::Why => "why",
            Dimension::How => "how",
        }
    }

    /// Parse a wire label, ignoring case and surrounding whitespace.
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        ORDERED
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(label))
    }

    /// The three milestones owned by this dimension, in declared order.
    pub fn milestones(&self) -> [&'static str; MILESTONES_PER_DIMENSION] {
        milestones_of(*self)
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Dimension {
    type Err = UnknownDimension;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownDimension(s.to_string()))
    }
}

/// A label that does not name any catalog dimension.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dimension: {0:?}")]
pub struct UnknownDimension(pub String);

/// The fixed dimension order: who, what, where, when, why, how.
pub fn ordered_dimensions() -> [Dimension; 6] {
    ORDERED
}

/// The three milestones of a dimension, in declared order.
pub fn milestones_of(dimension: Dimension) -> [&'static str; MILESTONES_PER_DIMENSION] {
    match dimension {
        Dimension::Who => ["Identity", "Relationship", "Impact"],
        Dimension::What => ["Event", "Details", "Feelings"],
        Dimension::Where => ["Location", "Sensory", "Context"],
        Dimension::When => ["Time", "Age", "Era"],
        Dimension::Why => ["Reason", "Meaning", "Core"],
        Dimension::How => ["Process", "Result", "Reflection"],
    }
}

/// Look up the catalog spelling of a milestone name.
///
/// Matching ignores case and surrounding whitespace. Returns `None` for
/// names that are not in the catalog.
pub fn canonical_milestone(name: &str) -> Option<&'static str> {
    let name = name.trim();
    ORDERED
        .iter()
        .flat_map(|d| milestones_of(*d))
        .find(|m| m.eq_ignore_ascii_case(name))
}

/// Find the dimension that owns a milestone.
pub fn dimension_of_milestone(name: &str) -> Option<Dimension> {
    let canonical = canonical_milestone(name)?;
    ORDERED
        .iter()
        .copied()
        .find(|d| milestones_of(*d).contains(&canonical))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_order_is_fixed() {
        let labels: Vec<_> = ordered_dimensions().iter().map(|d| d.as_str()).collect();
        assert_eq!(labels, vec!["who", "what", "where", "when", "why", "how"]);
    }

    #[test]
    fn test_every_dimension_has_three_distinct_milestones() {
        let mut all = HashSet::new();
        for dim in ordered_dimensions() {
            for m in dim.milestones() {
                assert!(all.insert(m), "milestone {m} listed twice");
            }
        }
        assert_eq!(all.len(), TOTAL_MILESTONES);
    }

    #[test]
    fn test_who_milestones() {
        assert_eq!(milestones_of(Dimension::Who), ["Identity", "Relationship", "Impact"]);
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(Dimension::parse("WHERE"), Some(Dimension::Where));
        assert_eq!(Dimension::parse(" how "), Some(Dimension::How));
        assert_eq!(Dimension::parse("whom"), None);
        assert!("nowhere".parse::<Dimension>().is_err());
    }

    #[test]
    fn test_canonical_milestone_lookup() {
        assert_eq!(canonical_milestone("identity"), Some("Identity"));
        assert_eq!(canonical_milestone("  ERA "), Some("Era"));
        assert_eq!(canonical_milestone("Weather"), None);
        assert_eq!(dimension_of_milestone("sensory"), Some(Dimension::Where));
        assert_eq!(dimension_of_milestone("Weather"), None);
    }

    #[test]
    fn test_serde_uses_lowercase_labels() {
        let json = serde_json::to_string(&Dimension::When).unwrap();
        assert_eq!(json, "\"when\"");
        let back: Dimension = serde_json::from_str("\"why\"").unwrap();
        assert_eq!(back, Dimension::Why);
    }
}
