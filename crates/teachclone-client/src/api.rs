//! HTTP client for the TeachClone API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, error};

use teachclone_core::TeacherProfile;
use teachclone_transcript::extract_video_id;

use crate::error::{ClientError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Whatever produces the persona's reply to a chat message.
#[async_trait]
pub trait TutorBackend: Send + Sync {
    async fn reply(&self, message: &str, profile: &TeacherProfile) -> Result<String>;
}

/// Everything produced while turning a video into a teacher.
#[derive(Debug, Clone)]
pub struct TeacherCreation {
    pub transcript: String,
    pub analysis: String,
    pub profile: TeacherProfile,
}

/// Typed access to the TeachClone HTTP API.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ApiClient {
    /// `base_url` includes the `/api` prefix, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and return the JSON body of a successful response.
    ///
    /// Error bodies become `ClientError::Server` carrying the server's
    /// message; a refused connection becomes `ClientError::Unreachable`.
    async fn send(&self, request: RequestBuilder, fallback: &str) -> Result<Value> {
        let response = request.send().await.map_err(|e| {
            error!("Request failed: {}", e);
            if e.is_connect() {
                ClientError::Unreachable
            } else {
                ClientError::Unexpected(fallback.to_string())
            }
        })?;

        let status = response.status();
        let body: Option<Value> = response.json().await.ok();

        if !status.is_success() {
            let message = body
                .as_ref()
                .and_then(|b| b["error"].as_str())
                .unwrap_or(fallback)
                .to_string();
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }

        body.ok_or_else(|| ClientError::Unexpected(fallback.to_string()))
    }

    fn field<T: DeserializeOwned>(mut body: Value, key: &str, fallback: &str) -> Result<T> {
        let value = body.get_mut(key).map(Value::take).unwrap_or(Value::Null);
        serde_json::from_value(value)
            .map_err(|_| ClientError::Unexpected(fallback.to_string()))
    }

    /// Fetch the transcript of a YouTube video.
    pub async fn transcript(&self, url: &str) -> Result<String> {
        if url.trim().is_empty() {
            return Err(ClientError::InvalidInput("YouTube URL is required".into()));
        }
        if extract_video_id(url.trim()).is_none() {
            return Err(ClientError::InvalidInput("Invalid YouTube URL".into()));
        }

        let fallback = "Failed to fetch transcript. Please try again.";
        let body = self
            .send(self.client.post(self.url("/transcript")).json(&json!({ "url": url })), fallback)
            .await?;
        let transcript: String = Self::field(body, "transcript", fallback)?;
        if transcript.trim().is_empty() {
            return Err(ClientError::Unexpected("No transcript available for this video".into()));
        }
        debug!("Received transcript ({} chars)", transcript.len());
        Ok(transcript)
    }

    /// Analyze a transcript's teaching style.
    pub async fn analyze(&self, transcript: &str) -> Result<String> {
        if transcript.trim().is_empty() {
            return Err(ClientError::InvalidInput("Transcript is required for analysis".into()));
        }
        let fallback = "Failed to analyze transcript. Please try again.";
        let body = self
            .send(
                self.client.post(self.url("/analyze")).json(&json!({ "transcript": transcript })),
                fallback,
            )
            .await?;
        Self::field(body, "analysis", fallback)
    }

    /// Turn an analysis into a teacher persona.
    pub async fn create_teacher(&self, analysis: &str) -> Result<TeacherProfile> {
        if analysis.trim().is_empty() {
            return Err(ClientError::InvalidInput("Analysis is required".into()));
        }
        let fallback = "Failed to create personalized teacher. Please try again.";
        let body = self
            .send(
                self.client.post(self.url("/create-teacher")).json(&json!({ "analysis": analysis })),
                fallback,
            )
            .await?;
        Self::field(body, "teacherProfile", fallback)
    }

    /// One stateless chat turn with the persona.
    pub async fn chat(&self, message: &str, profile: &TeacherProfile) -> Result<String> {
        if message.trim().is_empty() {
            return Err(ClientError::InvalidInput("Message is required".into()));
        }
        let fallback = "Failed to generate tutor response. Please try again.";
        let body = self
            .send(
                self.client
                    .post(self.url("/chat"))
                    .json(&json!({ "message": message, "profile": profile })),
                fallback,
            )
            .await?;
        Self::field(body, "response", fallback)
    }

    /// Transcript, then analysis, then persona. Stops at the first failure.
    pub async fn build_teacher(&self, url: &str) -> Result<TeacherCreation> {
        let transcript = self.transcript(url).await?;
        let analysis = self.analyze(&transcript).await?;
        let profile = self.create_teacher(&analysis).await?;
        Ok(TeacherCreation {
            transcript,
            analysis,
            profile,
        })
    }

    pub async fn save_profile(&self, user_id: &str, profile: &TeacherProfile) -> Result<()> {
        self.send(
            self.client
                .post(self.url("/profile"))
                .json(&json!({ "userId": user_id, "profile": profile })),
            "Failed to save tutor profile",
        )
        .await?;
        Ok(())
    }

    pub async fn load_profile(&self, user_id: &str) -> Result<Option<TeacherProfile>> {
        let fallback = "Failed to load tutor profile";
        let body = self
            .send(self.client.get(self.url(&format!("/profile/{}", user_id))), fallback)
            .await?;
        Self::field(body, "profile", fallback)
    }

    pub async fn clear_profile(&self, user_id: &str) -> Result<()> {
        self.send(
            self.client.delete(self.url(&format!("/profile/{}", user_id))),
            "Failed to clear tutor profile",
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl TutorBackend for ApiClient {
    async fn reply(&self, message: &str, profile: &TeacherProfile) -> Result<String> {
        self.chat(message, profile).await
    }
}
