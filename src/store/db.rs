//! SQLite database connection and schema management for profiles
//!
//! Manages the `~/.chamcode/chamcode.db` database with automatic schema
//! migration.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::config::Config;

/// Database wrapper shared between the recorder and query sides
#[derive(Clone)]
pub struct ProfileDb {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl ProfileDb {
    /// Open or create the database at the default location (~/.chamcode/chamcode.db)
    pub fn open_default() -> Result<Self> {
        Self::open(&Config::default_db_path())
    }

    /// Open or create the database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open profile db: {}", path.display()))?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Get a reference to the connection
    pub fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("Profile DB lock poisoned")
    }

    /// Initialize the database schema
    fn init_schema(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA_SQL)?;
        drop(conn);
        self.run_migrations()?;
        Ok(())
    }

    /// Run any pending migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn();

        let version: i32 = conn
            .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))
            .unwrap_or(0);

        // Migration 2: add last_seen to profiles (older installs lack it)
        if version < 2 {
            let has_last_seen: bool = conn
                .prepare("SELECT COUNT(*) FROM pragma_table_info('profiles') WHERE name = 'last_seen'")
                .and_then(|mut s| s.query_row([], |r| r.get::<_, i32>(0)))
                .map(|c| c > 0)
                .unwrap_or(false);

            if !has_last_seen {
                conn.execute_batch(
                    "ALTER TABLE profiles ADD COLUMN last_seen INTEGER NOT NULL DEFAULT 0;",
                )?;
            }

            conn.execute("INSERT OR REPLACE INTO schema_version VALUES (2)", [])?;
        }

        Ok(())
    }
}

/// SQL schema for the profile database
const SCHEMA_SQL: &str = r#"
-- User profiles (one row per user)
CREATE TABLE IF NOT EXISTS profiles (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    display_tag TEXT NOT NULL DEFAULT 'WLU',
    total_xp INTEGER NOT NULL DEFAULT 0,
    current_rank TEXT NOT NULL DEFAULT 'Bronze',
    daily_streak INTEGER NOT NULL DEFAULT 0,
    last_activity TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    last_seen INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_profiles_xp ON profiles(total_xp DESC);

-- Lesson completions (one row per user + lesson)
CREATE TABLE IF NOT EXISTS lesson_completions (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES profiles(id),
    lesson_id TEXT NOT NULL,
    score INTEGER NOT NULL DEFAULT 0,
    attempts INTEGER NOT NULL DEFAULT 1,
    completed_at INTEGER NOT NULL,
    UNIQUE(user_id, lesson_id)
);
CREATE INDEX IF NOT EXISTS idx_completion_user ON lesson_completions(user_id);

-- Friend requests
CREATE TABLE IF NOT EXISTS friend_requests (
    id TEXT PRIMARY KEY,
    requester_id TEXT NOT NULL REFERENCES profiles(id),
    recipient_id TEXT NOT NULL REFERENCES profiles(id),
    status TEXT NOT NULL DEFAULT 'pending',
    created_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_request_recipient ON friend_requests(recipient_id);

-- Friendships (symmetric; accepting a request inserts both directions)
CREATE TABLE IF NOT EXISTS friendships (
    user_id TEXT NOT NULL REFERENCES profiles(id),
    friend_id TEXT NOT NULL REFERENCES profiles(id),
    created_at INTEGER NOT NULL,
    PRIMARY KEY (user_id, friend_id)
);

-- Duels
CREATE TABLE IF NOT EXISTS duels (
    id TEXT PRIMARY KEY,
    challenger_id TEXT NOT NULL REFERENCES profiles(id),
    opponent_id TEXT NOT NULL REFERENCES profiles(id),
    status TEXT NOT NULL DEFAULT 'pending',
    winner_id TEXT,
    xp_reward INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL,
    completed_at INTEGER
);
CREATE INDEX IF NOT EXISTS idx_duel_challenger ON duels(challenger_id);
CREATE INDEX IF NOT EXISTS idx_duel_opponent ON duels(opponent_id);

-- Schema version
CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);
INSERT OR IGNORE INTO schema_version VALUES (2);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_and_init() {
        let dir = tempdir().unwrap();
        let db = ProfileDb::open(&dir.path().join("test.db")).unwrap();

        let conn = db.conn();
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap();
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"profiles".to_string()));
        assert!(tables.contains(&"lesson_completions".to_string()));
        assert!(tables.contains(&"friend_requests".to_string()));
        assert!(tables.contains(&"friendships".to_string()));
        assert!(tables.contains(&"duels".to_string()));
    }

    #[test]
    fn test_reopen_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        drop(ProfileDb::open(&path).unwrap());
        let db = ProfileDb::open(&path).unwrap();

        let conn = db.conn();
        let version: i32 = conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(version, 2);
    }
}
