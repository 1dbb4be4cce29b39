//! Opaque client id used as the key for server-side profile persistence.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;

/// A random id persisted in a file, created on first use.
pub struct ClientIdentity {
    path: PathBuf,
}

impl ClientIdentity {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Return the stored id, generating and saving one if none exists.
    pub fn load_or_create(&self) -> Result<String> {
        if let Ok(existing) = std::fs::read_to_string(&self.path) {
            let existing = existing.trim();
            if !existing.is_empty() {
                return Ok(existing.to_string());
            }
        }

        let id = uuid::Uuid::new_v4().simple().to_string();
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, &id)?;
        info!("Created client id at {}", self.path.display());
        Ok(id)
    }

    /// Forget the id; the next `load_or_create` makes a new one.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_id_is_stable_until_cleared() {
        let dir = TempDir::new().unwrap();
        let identity = ClientIdentity::new(dir.path().join("nested").join("user-id"));

        let first = identity.load_or_create().unwrap();
        assert_eq!(identity.load_or_create().unwrap(), first);

        identity.clear().unwrap();
        identity.clear().unwrap();
        assert_ne!(identity.load_or_create().unwrap(), first);
    }
}
