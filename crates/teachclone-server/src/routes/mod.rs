//! HTTP route handlers for the `/api` surface.

pub mod chat;
pub mod health;
pub mod profile;
pub mod teacher;
pub mod transcript;

use std::sync::Arc;

use axum::Router;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use teachclone_core::{Error, Result};

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(transcript::routes())
        .merge(teacher::routes())
        .merge(chat::routes())
        .merge(profile::routes())
        .merge(health::routes())
}

/// A body field that must be a non-empty string.
///
/// Absent, `null` and `""` are all "required"; other JSON types are rejected
/// with `type_message`. Whitespace-only strings pass through for the
/// operation itself to reject.
pub(crate) fn required_string(
    value: Option<Value>,
    required_message: &str,
    type_message: &str,
) -> Result<String> {
    match value {
        None | Some(Value::Null) => Err(Error::InvalidInput(required_message.into())),
        Some(Value::String(s)) if s.is_empty() => Err(Error::InvalidInput(required_message.into())),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(Error::InvalidInput(type_message.into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_string() {
        let check = |v: Option<Value>| required_string(v, "X is required", "X must be a string");

        assert_eq!(check(Some(json!("  hi "))).unwrap(), "  hi ");
        assert_eq!(check(Some(json!("   "))).unwrap(), "   ");
        assert_eq!(check(None).unwrap_err().to_string(), "X is required");
        assert_eq!(check(Some(Value::Null)).unwrap_err().to_string(), "X is required");
        assert_eq!(check(Some(json!(""))).unwrap_err().to_string(), "X is required");
        assert_eq!(check(Some(json!(42))).unwrap_err().to_string(), "X must be a string");
        assert_eq!(check(Some(json!(["a"]))).unwrap_err().to_string(), "X must be a string");
    }
}
