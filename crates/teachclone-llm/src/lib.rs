//! Persona pipeline over a remote generative-language model.
//!
//! Every operation sends exactly one prompt and receives one text reply.
//! Nothing is remembered between calls.

pub mod analysis;
pub mod chat;
pub mod gemini;
pub mod persona;
pub mod prompts;

pub use analysis::analyze_transcript;
pub use chat::chat_reply;
pub use gemini::{GeminiClient, TextGenerator};
pub use persona::{create_teacher, parse_teacher_profile, strip_code_fences};

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use teachclone_core::{Error, Result};

    use crate::TextGenerator;

    /// Returns a canned reply (or failure) and records every prompt.
    pub struct FakeGenerator {
        reply: std::result::Result<String, String>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl FakeGenerator {
        pub fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().map_err(Error::Upstream)
        }

        fn model_name(&self) -> &str {
            "fake"
        }
    }
}
