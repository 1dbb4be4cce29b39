//! Shared application state.

use std::sync::Arc;

use tracing::info;

use teachclone_core::{ChatTemplate, Result, TeachCloneConfig};
use teachclone_llm::{GeminiClient, TextGenerator};
use teachclone_store::ProfileStore;
use teachclone_transcript::{CaptionSource, YouTubeCaptions};

/// Shared application state accessible from all route handlers.
///
/// Built once at startup and never mutated; handlers share it through `Arc`.
pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
    pub captions: Arc<dyn CaptionSource>,
    pub chat_template: ChatTemplate,
    pub profiles: Option<ProfileStore>,
}

impl AppState {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        captions: Arc<dyn CaptionSource>,
        chat_template: ChatTemplate,
    ) -> Self {
        Self {
            generator,
            captions,
            chat_template,
            profiles: None,
        }
    }

    /// Enable the profile routes.
    pub fn with_profile_store(mut self, store: ProfileStore) -> Self {
        self.profiles = Some(store);
        self
    }

    /// Wire the production collaborators from configuration.
    pub fn from_config(config: &TeachCloneConfig) -> Result<Self> {
        let client = reqwest::Client::new();
        let generator = GeminiClient::from_config(client.clone(), config);
        let captions = YouTubeCaptions::new(client);

        let state = Self::new(Arc::new(generator), Arc::new(captions), config.chat_template);
        info!(
            "Using model {} with {} chat template",
            config.gemini_model, config.chat_template
        );

        match &config.profile_db {
            Some(path) => Ok(state.with_profile_store(ProfileStore::open(path)?)),
            None => {
                info!("Profile persistence disabled (TEACHCLONE_DB_PATH not set)");
                Ok(state)
            }
        }
    }
}
