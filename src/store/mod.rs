//! Profile store for ChamCode
//!
//! Persists profiles, lesson completions, friendships, and duels in a
//! SQLite database (`~/.chamcode/chamcode.db`).
//!
//! # Usage
//!
//! ```ignore
//! let store = ProfileStore::new()?;
//!
//! // Record a lesson completion (awards XP, updates streak and rank)
//! let events = store.recorder().record_lesson_completion(&user_id, "lesson-1", 100, Utc::now())?;
//!
//! // Query the leaderboard
//! let top = store.query().leaderboard(10)?;
//! ```

mod db;
mod models;
mod queries;
mod recorder;

pub use db::ProfileDb;
pub use models::{
    DuelRecord, DuelStatus, FriendRequestRecord, FriendRequestStatus, LeaderboardEntry,
    LessonCompletionRecord, ProfileRecord,
};
pub use queries::ProfileQuery;
pub use recorder::{DuelResolution, ProfileRecorder, ProgressionEvent};

use anyhow::Result;

/// Domain rejections callers can branch on
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("profile not found: {0}")]
    ProfileNotFound(String),
    #[error("username already taken: {0}")]
    UsernameTaken(String),
    #[error("unknown lesson: {0}")]
    UnknownLesson(String),
    #[error("duel not found: {0}")]
    DuelNotFound(String),
    #[error("duel is not pending: {0}")]
    DuelNotPending(String),
    #[error("cannot duel yourself")]
    SelfChallenge,
    #[error("cannot send a friend request to yourself")]
    SelfFriendRequest,
    #[error("a friend request between these profiles is already pending")]
    DuplicateFriendRequest,
    #[error("these profiles are already friends")]
    AlreadyFriends,
    #[error("friend request not found: {0}")]
    RequestNotFound(String),
    #[error("friend request is not pending: {0}")]
    RequestNotPending(String),
}

/// Central handle for the profile database
///
/// Coordinates recording and querying. Thread-safe through the internal
/// mutex on the database connection.
#[derive(Clone)]
pub struct ProfileStore {
    db: ProfileDb,
}

impl ProfileStore {
    /// Open the store at the default database location
    pub fn new() -> Result<Self> {
        let db = ProfileDb::open_default()?;
        Ok(Self { db })
    }

    /// Open the store at a custom database path
    pub fn with_path(path: &std::path::Path) -> Result<Self> {
        let db = ProfileDb::open(path)?;
        Ok(Self { db })
    }

    /// Get a recorder for writes
    pub fn recorder(&self) -> ProfileRecorder {
        ProfileRecorder::new(self.db.clone())
    }

    /// Get a query interface for reads
    pub fn query(&self) -> ProfileQuery {
        ProfileQuery::new(self.db.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::Rank;
    use chrono::{DateTime, Utc};
    use tempfile::tempdir;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-14T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_store_roundtrip() {
        let dir = tempdir().unwrap();
        let store = ProfileStore::with_path(&dir.path().join("test.db")).unwrap();

        let profile = store
            .recorder()
            .create_profile("TestUser", "WLU", now())
            .unwrap();
        assert_eq!(profile.total_xp, 0);

        let events = store
            .recorder()
            .record_lesson_completion(&profile.id, "lesson-1", 100, now())
            .unwrap();
        assert!(events
            .iter()
            .any(|e| matches!(e, ProgressionEvent::XpAwarded { amount: 25, .. })));

        let reloaded = store.query().profile(&profile.id).unwrap().unwrap();
        assert_eq!(reloaded.total_xp, 25);
        assert_eq!(reloaded.current_rank, Rank::Bronze.as_str());
        assert_eq!(reloaded.last_activity, now().to_rfc3339());

        let completions = store.query().completed_lessons(&profile.id).unwrap();
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].lesson_id, "lesson-1");
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let dir = tempdir().unwrap();
        let store = ProfileStore::with_path(&dir.path().join("test.db")).unwrap();

        store
            .recorder()
            .create_profile("TestUser", "WLU", now())
            .unwrap();
        let err = store
            .recorder()
            .create_profile("TestUser", "WLU", now())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::UsernameTaken(_))
        ));
    }
}
