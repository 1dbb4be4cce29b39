//! Teaching-style analysis of a transcript.

use tracing::info;

use teachclone_core::{Error, Result};

use crate::gemini::TextGenerator;
use crate::prompts;

/// Ask the model for a structured breakdown of the transcript's teaching style.
///
/// The reply is returned exactly as the model produced it.
pub async fn analyze_transcript(generator: &dyn TextGenerator, transcript: &str) -> Result<String> {
    if transcript.trim().is_empty() {
        return Err(Error::InvalidInput("Transcript cannot be empty".into()));
    }

    info!("Analyzing transcript ({} chars)", transcript.len());
    let prompt = prompts::analysis_prompt(transcript);
    generator
        .generate(&prompt)
        .await
        .map_err(|e| Error::Upstream(format!("AI analysis failed: {}", e)))
}
