//! Server-side profile persistence keyed by client id.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use teachclone_store::ProfileStore;

use crate::error::{ApiError, ApiJson, ApiResult};
use crate::routes::chat::parse_profile;
use crate::routes::required_string;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profile", post(save_profile))
        .route("/profile/{user_id}", get(load_profile).delete(clear_profile))
}

fn store(state: &AppState) -> ApiResult<&ProfileStore> {
    state.profiles.as_ref().ok_or(ApiError::PersistenceDisabled)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveProfileRequest {
    user_id: Option<Value>,
    profile: Option<Value>,
}

/// POST /api/profile: store (or replace) a client's profile.
async fn save_profile(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SaveProfileRequest>,
) -> ApiResult<Json<Value>> {
    let store = store(&state)?;
    let user_id = required_string(req.user_id, "User ID is required", "User ID must be a string")?;
    let profile = parse_profile(req.profile)?;

    store.save(&user_id, &profile)?;
    info!("Saved profile '{}' for {}", profile.name, user_id);
    Ok(Json(json!({ "success": true })))
}

/// GET /api/profile/{userId}
async fn load_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let profile = store(&state)?.get(&user_id)?;
    Ok(Json(json!({ "profile": profile })))
}

/// DELETE /api/profile/{userId}
async fn clear_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let deleted = store(&state)?.delete(&user_id)?;
    Ok(Json(json!({ "success": true, "deleted": deleted })))
}
