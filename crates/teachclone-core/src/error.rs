//! Error types for TeachClone.
//!
//! The first four variants form the request-level taxonomy: their display
//! text is the human-readable message returned to callers as-is.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed caller-supplied field.
    #[error("{0}")]
    InvalidInput(String),

    /// No captions available for the requested video.
    #[error("{0}")]
    NotFound(String),

    /// The generative-language call failed or returned unusable output.
    #[error("{0}")]
    Upstream(String),

    /// A synthesized persona is missing a required field.
    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

pub type Result<T> = std::result::Result<T, Error>;
