//! Cleanup of model replies before display and speech.
//!
//! Order matters: markdown and filler words go first, whitespace and
//! punctuation are normalized last so removed words leave no gaps.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Filler words and disfluencies, removed as whole words in any case.
pub const FILLER_WORDS: &[&str] = &[
    "ahh", "uhm", "um", "uh", "umm", "uhmm", "ummm", "uhmmm", "well", "so", "like", "you know",
    "kind of", "sort of", "actually", "basically", "literally", "just", "anyway", "anyways",
];

static FILLER_RE: Lazy<Regex> = Lazy::new(|| {
    let alternatives: Vec<String> = FILLER_WORDS
        .iter()
        .map(|word| word.split(' ').map(regex::escape).collect::<Vec<_>>().join(r"\s+"))
        .collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|"))).unwrap()
});

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static SPACE_BEFORE_PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+([.,!?])").unwrap());
static PUNCT_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.,!?]{2,}").unwrap());
static LEADING_PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\s.,!?]+").unwrap());
static SPACE_AFTER_PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([.,!?])\s+").unwrap());

/// Strip bold markers and filler words, then normalize spacing and punctuation.
///
/// `sanitize(sanitize(x)) == sanitize(x)` for any input.
pub fn sanitize(text: &str) -> String {
    let mut cleaned = text.to_string();
    // Removing a word can bring `*` or words back together, so repeat.
    loop {
        let next = FILLER_RE.replace_all(&cleaned.replace("**", ""), "").into_owned();
        if next == cleaned {
            break;
        }
        cleaned = next;
    }

    let cleaned = WHITESPACE_RE.replace_all(&cleaned, " ");
    let cleaned = SPACE_BEFORE_PUNCT_RE.replace_all(&cleaned, "$1");
    let cleaned = PUNCT_RUN_RE.replace_all(&cleaned, collapse_punctuation);
    let cleaned = LEADING_PUNCT_RE.replace(&cleaned, "");
    let cleaned = SPACE_AFTER_PUNCT_RE.replace_all(&cleaned, "$1 ");
    cleaned.trim().to_string()
}

/// Commas orphaned next to other marks are dropped; repeated commas become one.
fn collapse_punctuation(caps: &Captures) -> String {
    let run = &caps[0];
    if run.chars().all(|c| c == ',') {
        ",".to_string()
    } else {
        run.chars().filter(|c| *c != ',').collect()
    }
}
