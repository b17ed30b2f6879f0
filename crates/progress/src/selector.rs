//! Active dimension selection.

use memini_core::{ordered_dimensions, Dimension, SessionProgress};

/// The dimension the conversation should focus on next.
///
/// Returns the first dimension in catalog order that is not covered. Once
/// all six are covered this is `how`, so there is always something to
/// highlight.
pub fn select_active(progress: &SessionProgress) -> Dimension {
    ordered_dimensions()
        .into_iter()
        .find(|d| !progress.is_dimension_covered(*d))
        .unwrap_or(Dimension::How)
}
