//! Transcript turns.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::id::TurnId;
use crate::Time;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person reminiscing
    User,
    /// The companion (oracle reply)
    Assistant,
}

impl Role {
    /// Speaker name used when flattening a transcript into prompt text.
    pub fn speaker(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Memini",
        }
    }
}

/// Base64 image data attached to a turn.
///
/// Any `data:image/<type>;base64,` prefix is stripped on construction so
/// the payload is always raw base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload(String);

fn data_url_prefix() -> Option<&'static Regex> {
    static PREFIX: OnceLock<Option<Regex>> = OnceLock::new();
    PREFIX
        .get_or_init(|| Regex::new(r"^data:image/(png|jpeg|jpg|webp);base64,").ok())
        .as_ref()
}

impl ImagePayload {
    /// Create a payload from base64 data or a data URL.
    pub fn new(data: impl Into<String>) -> Self {
        let data = data.into();
        match data_url_prefix() {
            Some(re) => Self(re.replace(&data, "").into_owned()),
            None => Self(data),
        }
    }

    /// Raw base64 data.
    pub fn as_base64(&self) -> &str {
        &self.0
    }
}

/// One entry of the session transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Unique identifier
    pub id: TurnId,

    /// Speaker
    pub role: Role,

    /// Turn text
    pub text: String,

    /// Attached photo, if any
    pub image: Option<ImagePayload>,

    /// When the turn was appended
    pub created_at: Time,
}

impl ChatTurn {
    /// Create a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create an assistant turn.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: TurnId::new(),
            role,
            text: text.into(),
            image: None,
            created_at: chrono::Utc::now(),
        }
    }

    /// Attach an image.
    pub fn with_image(mut self, image: ImagePayload) -> Self {
        self.image = Some(image);
        self
    }
}

/// Flatten a transcript into `Speaker: text` lines.
pub fn render_transcript(turns: &[ChatTurn]) -> String {
    turns
        .iter()
        .map(|t| format!("{}: {}", t.role.speaker(), t.text))
        .collect::<Vec<_>>()
        .join("\n")
}
