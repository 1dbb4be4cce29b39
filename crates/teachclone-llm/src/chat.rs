//! Persona-conditioned chat turn.

use tracing::info;

use teachclone_core::{ChatTemplate, Error, Result, TeacherProfile};

use crate::gemini::TextGenerator;
use crate::prompts;

/// Generate the persona's reply to one student message.
///
/// Each turn is independent: the model sees the persona and this message
/// only, never earlier turns.
pub async fn chat_reply(
    generator: &dyn TextGenerator,
    template: ChatTemplate,
    profile: &TeacherProfile,
    message: &str,
) -> Result<String> {
    if message.trim().is_empty() {
        return Err(Error::InvalidInput("Message is required".into()));
    }

    info!("Chat turn as '{}' using {} template", profile.name, template);
    let prompt = prompts::render_chat_prompt(template, profile, message);
    generator.generate(&prompt).await.map_err(|e| match e {
        Error::Upstream(msg) => Error::Upstream(msg),
        other => Error::Upstream(other.to_string()),
    })
}
