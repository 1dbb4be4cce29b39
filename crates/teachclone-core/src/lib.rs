//! Shared TeachClone types: the persona, chat messages, errors and config.

pub mod config;
pub mod error;
pub mod profile;

pub use config::{ChatTemplate, GenerationSettings, TeachCloneConfig};
pub use error::{Error, Result};
pub use profile::{ChatLog, ChatMessage, Role, TeacherProfile, REQUIRED_PROFILE_FIELDS};
