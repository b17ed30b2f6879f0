//! Conversation topics.

use serde::{Deserialize, Serialize};

/// Broad theme a reminiscence session is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    /// Childhood & Growing Up
    Childhood,
    /// Young Adulthood & Family Life
    Adulthood,
    /// Work & Achievements
    Work,
    /// Travel & Places
    Travel,
    /// Hobbies & Everyday Life
    Hobbies,
    /// Light & Neutral Topics
    Light,
    /// General Reminiscence
    Other,
}

impl Topic {
    /// Topics offered for explicit selection. `Other` is only a fallback.
    pub const SELECTABLE: [Topic; 6] = [
        Topic::Childhood,
        Topic::Adulthood,
        Topic::Work,
        Topic::Travel,
        Topic::Hobbies,
        Topic::Light,
    ];

    /// Display label, also the exact string the oracle returns.
    pub fn label(&self) -> &'static str {
        match self {
            Topic::Childhood => "Childhood & Growing Up",
            Topic::Adulthood => "Young Adulthood & Family Life",
            Topic::Work => "Work & Achievements",
            Topic::Travel => "Travel & Places",
            Topic::Hobbies => "Hobbies & Everyday Life",
            Topic::Light => "Light & Neutral Topics",
            Topic::Other => "General Reminiscence",
        }
    }

    /// Match an exact label. Unrecognized text falls back to `Other`.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::SELECTABLE
            .iter()
            .copied()
            .find(|t| t.label() == label)
            .unwrap_or(Topic::Other)
    }
}

impl Default for Topic {
    fn default() -> Self {
        Topic::Other
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
