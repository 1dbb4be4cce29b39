//! YouTube video-id extraction.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;

/// Length of every YouTube video id.
pub const VIDEO_ID_LEN: usize = 11;

/// Known URL shapes, tried in order. Capture group 1 is the candidate id.
static PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/|youtube\.com/watch\?.*&v=)([^#&?]*)",
        r"youtube\.com/shorts/([^#&?]*)",
        r"youtube\.com/watch\?.*v=([^#&?]*)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Extract the 11-character video id from a YouTube URL.
///
/// Falls back to the `v` query parameter when no pattern yields an id of
/// the right length. Ids that only appear in a fragment are not found.
pub fn extract_video_id(url: &str) -> Option<String> {
    for pattern in PATTERNS.iter() {
        if let Some(id) = pattern.captures(url).and_then(|c| c.get(1)) {
            if id.as_str().chars().count() == VIDEO_ID_LEN {
                return Some(id.as_str().to_string());
            }
        }
    }

    let parsed = Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
        .filter(|id| id.chars().count() == VIDEO_ID_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    #[test]
    fn test_all_shapes_yield_same_id() {
        let urls = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://m.youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?si=abc123",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ?start=10",
            "https://www.youtube.com/v/dQw4w9WgXcQ",
            "youtube.com/watch?v=dQw4w9WgXcQ#comments",
        ];
        for url in urls {
            assert_eq!(extract_video_id(url).as_deref(), Some(ID), "url: {}", url);
        }
    }

    #[test]
    fn test_query_param_fallback() {
        // Not a youtube.com host, so only the query fallback applies.
        assert_eq!(
            extract_video_id("https://www.youtube-nocookie.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some(ID)
        );
        assert_eq!(
            extract_video_id("https://example.com/player?list=PL1&v=dQw4w9WgXcQ").as_deref(),
            Some(ID)
        );
    }

    #[test]
    fn test_fragment_id_not_found() {
        assert_eq!(extract_video_id("https://www.youtube.com/watch#v=dQw4w9WgXcQ"), None);
        assert_eq!(extract_video_id("https://example.com/page#dQw4w9WgXcQ"), None);
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=short"), None);
        assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQXYZ"), None);
        assert_eq!(extract_video_id("not a url"), None);
        assert_eq!(extract_video_id(""), None);
    }
}
