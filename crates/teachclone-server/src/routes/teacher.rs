//! Style analysis and persona synthesis routes.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use teachclone_llm::{analyze_transcript, create_teacher};

use crate::error::{ApiJson, ApiResult};
use crate::routes::required_string;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/create-teacher", post(create))
}

// ---------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    transcript: Option<Value>,
}

/// POST /api/analyze: teaching-style analysis of a transcript.
async fn analyze(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<AnalyzeRequest>,
) -> ApiResult<Json<Value>> {
    let transcript = required_string(
        req.transcript,
        "Transcript is required",
        "Transcript must be a string",
    )?;

    let analysis = analyze_transcript(state.generator.as_ref(), &transcript).await?;
    Ok(Json(json!({ "analysis": analysis })))
}

// ---------------------------------------------------------------
// Persona
// ---------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CreateTeacherRequest {
    analysis: Option<Value>,
}

/// POST /api/create-teacher: persona synthesized from an analysis.
async fn create(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateTeacherRequest>,
) -> ApiResult<Json<Value>> {
    let analysis = required_string(req.analysis, "Analysis is required", "Analysis must be a string")?;

    let profile = create_teacher(state.generator.as_ref(), &analysis).await?;
    Ok(Json(json!({ "teacherProfile": profile })))
}
