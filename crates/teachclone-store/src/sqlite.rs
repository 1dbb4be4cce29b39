//! SQLite-backed profile store.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::schema::SCHEMA_SQL;
use teachclone_core::{Error, Result, TeacherProfile};

/// Teacher profiles keyed by client id.
pub struct ProfileStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl ProfileStore {
    /// Open or create the store at `db_path`, creating parent directories.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&db_path).map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")
            .map_err(|e| Error::Database(e.to_string()))?;
        Self::init_schema(&conn)?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path,
        };
        info!(
            "ProfileStore initialized: {} profiles, path={}",
            store.count()?,
            store.db_path.display()
        );
        Ok(store)
    }

    /// In-memory store, nothing touches disk.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| Error::Database(e.to_string()))?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            db_path: PathBuf::from(":memory:"),
        })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| Error::Database(format!("Schema init failed: {}", e)))
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Insert or replace the profile for `user_id`.
    pub fn save(&self, user_id: &str, profile: &TeacherProfile) -> Result<()> {
        let json = serde_json::to_string(profile)?;
        let now = chrono::Utc::now().timestamp_millis();

        self.conn
            .lock()
            .execute(
                "INSERT INTO profiles (user_id, profile_data, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(user_id) DO UPDATE SET profile_data = excluded.profile_data,
                                                    updated_at = excluded.updated_at",
                params![user_id, json, now],
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        debug!("Saved profile for {}", user_id);
        Ok(())
    }

    pub fn get(&self, user_id: &str) -> Result<Option<TeacherProfile>> {
        let data: Option<String> = self
            .conn
            .lock()
            .query_row(
                "SELECT profile_data FROM profiles WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        data.map(|json| serde_json::from_str(&json).map_err(Error::from))
            .transpose()
    }

    /// Remove the profile for `user_id`. Returns whether one existed.
    pub fn delete(&self, user_id: &str) -> Result<bool> {
        let removed = self
            .conn
            .lock()
            .execute("DELETE FROM profiles WHERE user_id = ?1", params![user_id])
            .map_err(|e| Error::Database(e.to_string()))?;
        debug!("Deleted {} profile(s) for {}", removed, user_id);
        Ok(removed > 0)
    }

    pub fn count(&self) -> Result<i64> {
        self.conn
            .lock()
            .query_row("SELECT COUNT(*) FROM profiles", [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))
    }
}
