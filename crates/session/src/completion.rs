//! Completion policies - when a session ends on its own.

use memini_core::{OracleJudgment, SessionProgress};

/// Decides whether the latest turn should end the session.
///
/// `progress` is the state after the judgment has been applied.
pub trait CompletionPolicy: Send + Sync {
    /// Check whether the session should end.
    fn should_end(&self, judgment: &OracleJudgment, progress: &SessionProgress) -> bool;
}

/// Trust the oracle's completion flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleFlag;

impl CompletionPolicy for OracleFlag {
    fn should_end(&self, judgment: &OracleJudgment, _progress: &SessionProgress) -> bool {
        judgment.is_session_complete
    }
}

/// Require the oracle's flag plus local evidence of coverage.
#[derive(Debug, Clone, Copy)]
pub struct Corroborated {
    min_dimensions: usize,
}

impl Corroborated {
    /// Require at least `min_dimensions` covered dimensions.
    pub fn new(min_dimensions: usize) -> Self {
        Self { min_dimensions }
    }
}

impl Default for Corroborated {
    fn default() -> Self {
        Self::new(5)
    }
}

impl CompletionPolicy for Corroborated {
    fn should_end(&self, judgment: &OracleJudgment, progress: &SessionProgress) -> bool {
        judgment.is_session_complete
            && progress.covered_dimensions().len() >= self.min_dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memini_core::{ordered_dimensions, Dimension};

    fn five_covered() -> SessionProgress {
        SessionProgress::new().with_dimensions(ordered_dimensions()[..5].to_vec())
    }

    #[test]
    fn test_oracle_flag_follows_judgment() {
        let policy = OracleFlag;
        let progress = SessionProgress::new();
        assert!(policy.should_end(&OracleJudgment::empty().completed(true), &progress));
        assert!(!policy.should_end(&OracleJudgment::empty(), &five_covered()));
    }

    #[test]
    fn test_corroborated_needs_both() {
        let policy = Corroborated::default();
        let flagged = OracleJudgment::empty().completed(true);

        assert!(policy.should_end(&flagged, &five_covered()));
        assert!(!policy.should_end(&OracleJudgment::empty(), &five_covered()));

        let four = SessionProgress::new().with_dimensions([
            Dimension::Who,
            Dimension::What,
            Dimension::Where,
            Dimension::When,
        ]);
        assert!(!policy.should_end(&flagged, &four));
    }
}
