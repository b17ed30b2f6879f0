//! Emotion labels and companion personas.
//!
//! Emotion inference belongs to the oracle. These types only carry its
//! output and map a label to the persona used for rendering.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The seven-label emotion set reported by the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    /// Warm, positive companionship
    Warm,
    /// Exploratory, following clues
    Curious,
    /// Vulnerable, needs safety
    Unsafe,
    /// Determination and courage
    Passion,
    /// Recognition and achievement
    Pride,
    /// Finding direction, guidance
    Healing,
    /// Light and playful
    Playful,
}

impl EmotionLabel {
    /// Map the oracle's 1-7 code. Anything out of range is `Warm`.
    pub fn from_code(code: i64) -> Self {
        match code {
            2 => EmotionLabel::Curious,
            3 => EmotionLabel::Unsafe,
            4 => EmotionLabel::Passion,
            5 => EmotionLabel::Pride,
            6 => EmotionLabel::Healing,
            7 => EmotionLabel::Playful,
            _ => EmotionLabel::Warm,
        }
    }

    /// The 1-7 wire code.
    pub fn code(&self) -> u8 {
        match self {
            EmotionLabel::Warm => 1,
            EmotionLabel::Curious => 2,
            EmotionLabel::Unsafe => 3,
            EmotionLabel::Passion => 4,
            EmotionLabel::Pride => 5,
            EmotionLabel::Healing => 6,
            EmotionLabel::Playful => 7,
        }
    }

    /// Persona character shown for this label.
    pub fn persona(&self) -> char {
        match self {
            EmotionLabel::Warm => 'a',
            EmotionLabel::Curious => 'b',
            EmotionLabel::Pride => 'c',
            EmotionLabel::Unsafe => 'd',
            EmotionLabel::Passion => 'e',
            EmotionLabel::Healing => 'f',
            EmotionLabel::Playful => 'g',
        }
    }

    /// Persona color as a hex code.
    pub fn color(&self) -> &'static str {
        match self {
            EmotionLabel::Warm => "#F4D35E",
            EmotionLabel::Curious => "#C77DFF",
            EmotionLabel::Unsafe => "#FFB7B2",
            EmotionLabel::Passion => "#F28F3B",
            EmotionLabel::Pride => "#E63946",
            EmotionLabel::Healing => "#90BE6D",
            EmotionLabel::Playful => "#4EA8DE",
        }
    }
}

impl Default for EmotionLabel {
    fn default() -> Self {
        EmotionLabel::Warm
    }
}

/// Per-turn emotion reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionSignal {
    /// Dominant label
    pub label: EmotionLabel,
    /// Strength in [0, 1]
    pub intensity: f32,
}

impl Default for EmotionSignal {
    fn default() -> Self {
        Self {
            label: EmotionLabel::Warm,
            intensity: 0.5,
        }
    }
}

/// End-of-session emotional summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Dominant label across the session
    pub label: EmotionLabel,
    /// Strength in [0, 1]
    pub intensity: f32,
    /// Closing feedback for the user
    pub feedback: String,
    /// Persona character
    pub persona: char,
    /// Persona color
    pub color: String,
}

impl SessionSummary {
    /// Summary used when the oracle cannot produce one.
    pub fn fallback() -> Self {
        let label = EmotionLabel::Warm;
        Self {
            label,
            intensity: 0.5,
            feedback: "Thank you for sharing your memories.".to_string(),
            persona: label.persona(),
            color: label.color().to_string(),
        }
    }

    /// Decode the oracle's summary JSON, defaulting each missing field.
    pub fn from_value(value: &Value) -> Self {
        let label = value
            .get("label")
            .and_then(Value::as_i64)
            .map(EmotionLabel::from_code)
            .unwrap_or_default();

        let persona = value
            .get("personaChar")
            .and_then(Value::as_str)
            .and_then(|s| s.chars().next())
            .filter(|c| ('a'..='g').contains(c))
            .unwrap_or_else(|| label.persona());

        Self {
            label,
            intensity: value
                .get("intensity")
                .and_then(Value::as_f64)
                .map(|i| (i as f32).clamp(0.0, 1.0))
                .unwrap_or(0.8),
            feedback: value
                .get("feedback")
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .unwrap_or("Thank you for sharing.")
                .to_string(),
            persona,
            color: value
                .get("color")
                .and_then(Value::as_str)
                .unwrap_or_else(|| label.color())
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_label_codes() {
        assert_eq!(EmotionLabel::from_code(5), EmotionLabel::Pride);
        assert_eq!(EmotionLabel::from_code(0), EmotionLabel::Warm);
        assert_eq!(EmotionLabel::from_code(42), EmotionLabel::Warm);
        assert_eq!(EmotionLabel::Playful.code(), 7);
    }

    #[test]
    fn test_persona_mapping() {
        assert_eq!(EmotionLabel::Pride.persona(), 'c');
        assert_eq!(EmotionLabel::Unsafe.persona(), 'd');
        assert_eq!(EmotionLabel::Healing.color(), "#90BE6D");
    }

    #[test]
    fn test_summary_defaults() {
        let summary = SessionSummary::from_value(&json!({}));
        assert_eq!(summary.label, EmotionLabel::Warm);
        assert_eq!(summary.feedback, "Thank you for sharing.");
        assert_eq!(summary.persona, 'a');
        assert_eq!(summary.color, "#F4D35E");
        assert!((summary.intensity - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_summary_decodes_fields() {
        let summary = SessionSummary::from_value(&json!({
            "label": 6,
            "feedback": "You found your way.",
            "personaChar": "f",
            "intensity": 0.9
        }));
        assert_eq!(summary.label, EmotionLabel::Healing);
        assert_eq!(summary.persona, 'f');
        assert_eq!(summary.color, "#90BE6D");
        assert_eq!(summary.feedback, "You found your way.");
    }

    #[test]
    fn test_summary_rejects_unknown_persona() {
        let summary = SessionSummary::from_value(&json!({ "label": 2, "personaChar": "z" }));
        assert_eq!(summary.persona, 'b');
    }
}
