//! Process configuration, read once at startup.
//!
//! Lifecycle: built once in `main`, shared read-only for the life of the
//! process, no teardown.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Which role-play template the chat endpoint renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatTemplate {
    /// Detailed, thorough explanations; greetings stay simple.
    #[default]
    Elaborate,
    /// Short, encouraging replies.
    Supportive,
    /// Model classifies the message as casual or technical first.
    #[serde(rename = "dual")]
    DualMode,
}

impl FromStr for ChatTemplate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "elaborate" => Ok(ChatTemplate::Elaborate),
            "supportive" => Ok(ChatTemplate::Supportive),
            "dual" | "dual-mode" | "dualmode" => Ok(ChatTemplate::DualMode),
            other => Err(Error::Config(format!("Unknown chat template: {}", other))),
        }
    }
}

impl std::fmt::Display for ChatTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatTemplate::Elaborate => write!(f, "elaborate"),
            ChatTemplate::Supportive => write!(f, "supportive"),
            ChatTemplate::DualMode => write!(f, "dual"),
        }
    }
}

/// Sampling parameters sent with every generation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSettings {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 1024,
        }
    }
}

/// Top-level TeachClone configuration.
#[derive(Debug, Clone)]
pub struct TeachCloneConfig {
    /// HTTP server port.
    pub port: u16,
    /// Generative-language API key. Required.
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub generation: GenerationSettings,
    pub chat_template: ChatTemplate,
    /// SQLite file for server-side profile persistence. `None` disables it.
    pub profile_db: Option<PathBuf>,
}

impl TeachCloneConfig {
    /// Create configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let gemini_api_key = non_empty("GEMINI_API_KEY").ok_or_else(|| {
            Error::Config("GEMINI_API_KEY is not set in environment variables".into())
        })?;

        let port = match non_empty("PORT") {
            Some(p) => p
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("Invalid PORT: {}", p)))?,
            None => DEFAULT_PORT,
        };

        let chat_template = match non_empty("TEACHCLONE_CHAT_TEMPLATE") {
            Some(t) => t.parse()?,
            None => ChatTemplate::default(),
        };

        Ok(Self {
            port,
            gemini_api_key,
            gemini_model: non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into()),
            gemini_base_url: non_empty("GEMINI_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.into()),
            generation: GenerationSettings::default(),
            chat_template,
            profile_db: non_empty("TEACHCLONE_DB_PATH").map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_api_key_fails() {
        let result = TeachCloneConfig::from_lookup(lookup(&[("PORT", "8080")]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_defaults() {
        let config = TeachCloneConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "k")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.chat_template, ChatTemplate::Elaborate);
        assert!(config.profile_db.is_none());
        assert_eq!(config.generation.top_k, 40);
        assert_eq!(config.generation.max_output_tokens, 1024);
    }

    #[test]
    fn test_overrides() {
        let config = TeachCloneConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("PORT", "7000"),
            ("GEMINI_BASE_URL", "http://localhost:9999/"),
            ("TEACHCLONE_CHAT_TEMPLATE", "dual"),
            ("TEACHCLONE_DB_PATH", "/tmp/profiles.db"),
        ]))
        .unwrap();
        assert_eq!(config.port, 7000);
        assert_eq!(config.gemini_base_url, "http://localhost:9999");
        assert_eq!(config.chat_template, ChatTemplate::DualMode);
        assert_eq!(config.profile_db, Some(PathBuf::from("/tmp/profiles.db")));
    }

    #[test]
    fn test_bad_port_and_template() {
        assert!(TeachCloneConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "k"), ("PORT", "abc")])).is_err());
        assert!(TeachCloneConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("TEACHCLONE_CHAT_TEMPLATE", "poetic"),
        ]))
        .is_err());
    }
}
