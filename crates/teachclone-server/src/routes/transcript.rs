//! Transcript retrieval route.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::error::{ApiJson, ApiResult};
use crate::routes::required_string;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/transcript", post(get_transcript))
}

#[derive(Debug, Deserialize)]
struct TranscriptRequest {
    url: Option<Value>,
}

/// POST /api/transcript: captions of a YouTube video as plain text.
async fn get_transcript(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<TranscriptRequest>,
) -> ApiResult<Json<Value>> {
    let url = required_string(req.url, "YouTube URL is required", "YouTube URL must be a string")?;
    info!("Fetching transcript for {}", url);

    let transcript = teachclone_transcript::fetch_transcript(state.captions.as_ref(), &url).await?;
    Ok(Json(json!({ "transcript": transcript })))
}
