//! Caption sources.
//!
//! `YouTubeCaptions` reads the caption track list embedded in the watch
//! page, then downloads the chosen track's timed-text XML.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use teachclone_core::{Error, Result};

pub const YOUTUBE_BASE_URL: &str = "https://www.youtube.com";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/85.0.4183.83 Safari/537.36";

static CUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<text start="([^"]*)" dur="([^"]*)"[^>]*>([^<]*)</text>"#).unwrap());

static NUMERIC_ENTITY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"&#(x?[0-9a-fA-F]+);").unwrap());

/// One caption cue.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionItem {
    pub text: String,
    pub offset_secs: f64,
    pub duration_secs: f64,
}

/// Anything that can produce caption cues for a video.
///
/// Returns an empty list when the video has no captions (or none in the
/// requested language). Every other failure is an `Err`.
#[async_trait]
pub trait CaptionSource: Send + Sync {
    async fn fetch(&self, video_id: &str, lang: Option<&str>) -> Result<Vec<CaptionItem>>;
}

#[derive(Debug, Deserialize)]
struct CaptionsBlock {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
struct TracklistRenderer {
    #[serde(rename = "captionTracks", default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Clone, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode", default)]
    language_code: String,
}

/// Caption source backed by youtube.com.
#[derive(Clone)]
pub struct YouTubeCaptions {
    client: Client,
    base_url: String,
}

impl YouTubeCaptions {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: YOUTUBE_BASE_URL.to_string(),
        }
    }

    /// Point the source at a different host (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn get_text(&self, url: &str, lang: Option<&str>) -> Result<String> {
        let mut request = self.client.get(url).header("User-Agent", USER_AGENT);
        if let Some(lang) = lang {
            request = request.header("Accept-Language", lang);
        }
        let response = request
            .send()
            .await
            .map_err(|e| Error::Http(format!("Caption request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Upstream(format!(
                "Caption request failed with status {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| Error::Http(format!("Caption read failed: {}", e)))
    }

    fn absolute(&self, url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{}", self.base_url, url)
        } else {
            url.to_string()
        }
    }
}

#[async_trait]
impl CaptionSource for YouTubeCaptions {
    async fn fetch(&self, video_id: &str, lang: Option<&str>) -> Result<Vec<CaptionItem>> {
        let page_url = format!("{}/watch?v={}", self.base_url, video_id);
        debug!("Fetching watch page {} (lang={:?})", page_url, lang);
        let page = self.get_text(&page_url, lang).await?;

        let tracks = extract_caption_tracks(&page, video_id)?;
        let track = match lang {
            Some(code) => tracks.into_iter().find(|t| t.language_code == code),
            None => tracks.into_iter().next(),
        };
        let Some(track) = track else {
            debug!("No caption track for {} (lang={:?})", video_id, lang);
            return Ok(Vec::new());
        };

        let xml = self.get_text(&self.absolute(&track.base_url), lang).await?;
        let items = parse_timed_text(&xml);
        debug!("Fetched {} caption cues for {}", items.len(), video_id);
        Ok(items)
    }
}

fn extract_caption_tracks(page: &str, video_id: &str) -> Result<Vec<CaptionTrack>> {
    let Some((_, after)) = page.split_once("\"captions\":") else {
        if page.contains("class=\"g-recaptcha\"") {
            return Err(Error::Upstream(
                "YouTube is receiving too many requests from this IP and now requires solving a captcha"
                    .into(),
            ));
        }
        if !page.contains("\"playabilityStatus\":") {
            return Err(Error::Upstream(format!(
                "The video is no longer available ({})",
                video_id
            )));
        }
        // Playable video without a captions block: captions are disabled.
        return Ok(Vec::new());
    };

    let block = after
        .split_once(",\"videoDetails")
        .map(|(block, _)| block)
        .unwrap_or(after);
    let captions: CaptionsBlock = serde_json::from_str(block)
        .map_err(|e| Error::Upstream(format!("Unreadable caption track list: {}", e)))?;

    Ok(captions
        .renderer
        .map(|r| r.caption_tracks)
        .unwrap_or_default())
}

/// Parse timed-text XML into cues, in document order.
pub fn parse_timed_text(xml: &str) -> Vec<CaptionItem> {
    CUE_RE
        .captures_iter(xml)
        .map(|c| CaptionItem {
            offset_secs: c[1].parse().unwrap_or(0.0),
            duration_secs: c[2].parse().unwrap_or(0.0),
            text: decode_entities(&c[3]),
        })
        .collect()
}

/// Decode the HTML entities YouTube emits in caption text.
///
/// `&amp;` goes first because tracks are frequently double-encoded
/// (`&amp;#39;`).
pub fn decode_entities(text: &str) -> String {
    let text = text
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'");

    NUMERIC_ENTITY_RE
        .replace_all(&text, |c: &regex::Captures| {
            let code = &c[1];
            let value = match code.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => code.parse().ok(),
            };
            value
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| c[0].to_string())
        })
        .into_owned()
}
