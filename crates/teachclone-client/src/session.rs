//! One chat session with a teacher persona.

use std::sync::Arc;

use tracing::warn;

use teachclone_core::{ChatLog, ChatMessage, Role, TeacherProfile};

use crate::api::TutorBackend;
use crate::error::Result;
use crate::sanitize::sanitize;
use crate::speech::Speaker;

/// Prefix of the reply shown when a turn fails.
pub const ERROR_REPLY_PREFIX: &str = "I apologize, but I encountered an error: ";

/// Chat transcript, persona and speech output for one session.
///
/// Failed turns are recorded as assistant replies so the transcript keeps
/// its shape; nothing is ever removed from it.
pub struct ChatSession<B: TutorBackend> {
    backend: B,
    profile: TeacherProfile,
    log: ChatLog,
    speaker: Arc<dyn Speaker>,
    muted: bool,
}

impl<B: TutorBackend> ChatSession<B> {
    pub fn new(backend: B, profile: TeacherProfile, speaker: Arc<dyn Speaker>) -> Self {
        Self {
            backend,
            profile,
            log: ChatLog::new(),
            speaker,
            muted: false,
        }
    }

    pub fn profile(&self) -> &TeacherProfile {
        &self.profile
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.log.messages()
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Flip mute. Muting stops the current utterance.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        if self.muted {
            self.speaker.cancel();
        }
        self.muted
    }

    pub fn rename_teacher(&mut self, name: &str) -> Result<()> {
        self.profile.rename(name)?;
        Ok(())
    }

    /// Send one message and record the reply. Blank input is ignored.
    pub async fn send(&mut self, input: &str) -> Option<&ChatMessage> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        self.log.push(ChatMessage::new(Role::User, input));

        let content = match self.backend.reply(input, &self.profile).await {
            Ok(reply) => sanitize(&reply),
            Err(e) => {
                warn!("Chat turn failed: {}", e);
                format!("{}{}", ERROR_REPLY_PREFIX, e)
            }
        };

        self.speak(&content);
        Some(self.log.push(ChatMessage::new(Role::Assistant, content)))
    }

    fn speak(&self, text: &str) {
        if self.muted {
            return;
        }
        self.speaker.cancel();
        self.speaker.speak(text);
    }
}

impl<B: TutorBackend> Drop for ChatSession<B> {
    fn drop(&mut self) {
        self.speaker.cancel();
    }
}
