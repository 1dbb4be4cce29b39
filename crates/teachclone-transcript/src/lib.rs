//! Transcript acquisition: URL → video id → caption cues → newline-joined text.

pub mod captions;
pub mod video_id;

pub use captions::{CaptionItem, CaptionSource, YouTubeCaptions};
pub use video_id::extract_video_id;

use tracing::{info, warn};

use teachclone_core::{Error, Result};

/// Language requested on the single retry after an empty default fetch.
pub const FALLBACK_LANG: &str = "en";

/// Fetch the transcript of the video a URL points at.
///
/// The default-language fetch is retried once with an explicit English hint
/// only when it comes back empty. Errors are returned as-is, never retried.
pub async fn fetch_transcript(source: &dyn CaptionSource, url: &str) -> Result<String> {
    if url.trim().is_empty() {
        return Err(Error::InvalidInput("YouTube URL is required".into()));
    }

    let video_id = extract_video_id(url.trim())
        .ok_or_else(|| Error::InvalidInput("Invalid YouTube URL".into()))?;

    let mut items = source.fetch(&video_id, None).await?;
    if items.is_empty() {
        warn!("No default captions for {}, retrying with lang={}", video_id, FALLBACK_LANG);
        items = source.fetch(&video_id, Some(FALLBACK_LANG)).await?;
    }

    if items.is_empty() {
        return Err(Error::NotFound("No captions found for this video".into()));
    }

    let transcript = join_captions(&items);
    if transcript.trim().is_empty() {
        return Err(Error::NotFound("No transcript available for this video".into()));
    }

    info!("Transcript for {}: {} caption lines", video_id, items.len());
    Ok(transcript)
}

/// Join cue texts with newlines, in source order.
pub fn join_captions(items: &[CaptionItem]) -> String {
    items
        .iter()
        .map(|item| item.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
