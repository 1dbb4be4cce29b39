//! Database schema SQL.

/// One profile per client id, stored as JSON.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS profiles (
    user_id TEXT PRIMARY KEY,
    profile_data TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);
"#;
