//! Persona chat route. Stateless: one message in, one reply out.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use teachclone_core::{Error, TeacherProfile};
use teachclone_llm::chat_reply;

use crate::error::{ApiJson, ApiResult};
use crate::routes::required_string;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/chat", post(chat))
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: Option<Value>,
    profile: Option<Value>,
}

/// POST /api/chat: the persona's reply to one student message.
async fn chat(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ChatRequest>,
) -> ApiResult<Json<Value>> {
    let message = required_string(req.message, "Message is required", "Message must be a string")?;
    let profile = parse_profile(req.profile)?;

    let response = chat_reply(state.generator.as_ref(), state.chat_template, &profile, &message).await?;
    Ok(Json(json!({ "response": response })))
}

pub(crate) fn parse_profile(value: Option<Value>) -> Result<TeacherProfile, Error> {
    match value {
        None | Some(Value::Null) => Err(Error::InvalidInput("Teacher profile is required".into())),
        Some(value) => serde_json::from_value(value)
            .map_err(|e| Error::InvalidInput(format!("Invalid teacher profile: {}", e))),
    }
}
