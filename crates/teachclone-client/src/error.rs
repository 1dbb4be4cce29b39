//! Client-side error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// No server answered at the configured address.
    #[error("Unable to connect to the server. Please check if the server is running.")]
    Unreachable,

    /// The server answered with an error body.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Rejected before any request was sent.
    #[error("{0}")]
    InvalidInput(String),

    /// Anything else: unreadable body, transport failure mid-request.
    #[error("{0}")]
    Unexpected(String),

    #[error(transparent)]
    Core(#[from] teachclone_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
