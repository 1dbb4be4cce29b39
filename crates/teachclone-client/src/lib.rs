//! Client side of TeachClone: talks to the HTTP API, cleans up replies
//! before display and speech, and keeps the chat transcript.

pub mod api;
pub mod error;
pub mod identity;
pub mod sanitize;
pub mod session;
pub mod speech;

pub use api::{ApiClient, TeacherCreation, TutorBackend, DEFAULT_API_URL};
pub use error::ClientError;
pub use identity::ClientIdentity;
pub use sanitize::sanitize;
pub use session::ChatSession;
pub use speech::{select_voice, CommandSpeaker, NullSpeaker, Speaker};
