//! Teacher persona and chat transcript types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Keys a synthesized persona must carry, in validation order.
pub const REQUIRED_PROFILE_FIELDS: [&str; 7] = [
    "name",
    "style",
    "tone",
    "strengths",
    "specializations",
    "useAnalogies",
    "stepByStep",
];

/// Structured description of a teaching style used to condition chat prompts.
///
/// Presence of every field is checked once, where the persona is synthesized
/// from model output. Profiles coming back from a client tolerate missing
/// lists and flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherProfile {
    pub name: String,
    pub style: String,
    pub tone: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub use_analogies: bool,
    #[serde(default)]
    pub step_by_step: bool,
}

impl TeacherProfile {
    /// User-initiated rename, the only mutation a profile allows.
    pub fn rename(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("Teacher name cannot be empty".into()));
        }
        self.name = name.to_string();
        Ok(())
    }
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in a chat session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Append-only, ordered chat transcript for one session.
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
