//! Request-boundary error mapping.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{error, warn};

use teachclone_core::Error;

/// Error returned by handlers; renders as `{error}` with a mapped status.
#[derive(Debug)]
pub enum ApiError {
    Core(Error),
    PersistenceDisabled,
    BadJson(String),
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError::Core(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(Error::InvalidInput(_)) | ApiError::BadJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Core(Error::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::PersistenceDisabled => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Core(e) => e.to_string(),
            ApiError::PersistenceDisabled => "Profile persistence is not configured".into(),
            ApiError::BadJson(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            error!("Request failed ({}): {}", status.as_u16(), message);
        } else {
            warn!("Request rejected ({}): {}", status.as_u16(), message);
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// `Json` extractor whose rejection is an `{error}` body like every other failure.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::BadJson(rejection_message(&rejection))),
        }
    }
}

fn rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Request body must be JSON (Content-Type: application/json)".into()
        }
        other => format!("Invalid JSON body: {}", other.body_text()),
    }
}
