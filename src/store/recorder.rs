//! Profile recorder - writes progression and social state
//!
//! Every XP-earning path (lessons, duels) funnels through one award
//! routine so streak, rank, and activity bookkeeping cannot drift
//! between features.

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use super::db::ProfileDb;
use super::models::{
    DuelRecord, DuelStatus, FriendRequestRecord, FriendRequestStatus, ProfileRecord,
};
use super::queries::ProfileQuery;
use super::StoreError;
use anyhow::Result;
use crate::catalog::Lesson;
use crate::duel::{pick_outcome, DuelOutcome};
use crate::progression::{self, BadgeId, Rank};

/// Events that can happen while recording an XP award
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressionEvent {
    XpAwarded { amount: u32, reason: String },
    StreakExtended { count: u32 },
    RankUp { from: Rank, to: Rank },
    BadgeEarned { badge: BadgeId },
}

/// Result of resolving a duel
#[derive(Debug, Clone)]
pub struct DuelResolution {
    pub duel: DuelRecord,
    pub outcome: &'static DuelOutcome,
    pub events: Vec<ProgressionEvent>,
}

/// Demo rival profiles for a freshly seeded database
static DEMO_RIVALS: &[(&str, &str, i64)] = &[
    ("CodeMaster", "PRO", 2500),
    ("PytonNinja", "DEV", 1800),
    ("JSWizard", "WIZ", 1200),
    ("ReactGuru", "GUI", 950),
    ("DataSci", "SCI", 875),
    ("WebDev123", "WEB", 580),
    ("AlgoExpert", "ALG", 420),
    ("FullStack", "FS", 350),
    ("CSSNinja", "CSS", 320),
];

/// Records profile mutations to the database
#[derive(Clone)]
pub struct ProfileRecorder {
    db: ProfileDb,
}

impl ProfileRecorder {
    pub fn new(db: ProfileDb) -> Self {
        Self { db }
    }

    fn query(&self) -> ProfileQuery {
        ProfileQuery::new(self.db.clone())
    }

    // ========================================
    // PROFILE LIFECYCLE
    // ========================================

    /// Create a new profile with zeroed counters
    pub fn create_profile(
        &self,
        username: &str,
        display_tag: &str,
        now: DateTime<Utc>,
    ) -> Result<ProfileRecord> {
        if self.query().profile_by_username(username)?.is_some() {
            return Err(StoreError::UsernameTaken(username.to_string()).into());
        }

        let record = ProfileRecord {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            display_tag: display_tag.to_string(),
            total_xp: 0,
            current_rank: Rank::Bronze.as_str().to_string(),
            daily_streak: 0,
            last_activity: now.to_rfc3339(),
            created_at: now.timestamp_millis(),
            last_seen: now.timestamp_millis(),
        };

        let conn = self.db.conn();
        conn.execute(
            r#"INSERT INTO profiles
               (id, username, display_tag, total_xp, current_rank, daily_streak,
                last_activity, created_at, last_seen)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"#,
            rusqlite::params![
                record.id,
                record.username,
                record.display_tag,
                record.total_xp,
                record.current_rank,
                record.daily_streak,
                record.last_activity,
                record.created_at,
                record.last_seen,
            ],
        )?;

        debug!(username, id = %record.id, "created profile");
        Ok(record)
    }

    /// Insert the demo rival set, skipping usernames that already exist.
    /// Gives a fresh install a populated leaderboard.
    pub fn seed_demo_rivals(&self, now: DateTime<Utc>) -> Result<usize> {
        let mut created = 0;
        for (username, tag, xp) in DEMO_RIVALS {
            if self.query().profile_by_username(username)?.is_some() {
                continue;
            }
            let profile = self.create_profile(username, tag, now)?;
            let conn = self.db.conn();
            conn.execute(
                "UPDATE profiles SET total_xp = ?1, current_rank = ?2 WHERE id = ?3",
                rusqlite::params![
                    xp,
                    Rank::for_xp(*xp as u32).as_str(),
                    profile.id
                ],
            )?;
            created += 1;
        }
        Ok(created)
    }

    // ========================================
    // XP AWARD PATH
    // ========================================

    /// Award XP to a profile and update streak, rank, and activity
    /// bookkeeping. Returns the progression events that occurred.
    fn award_xp(
        &self,
        profile: &ProfileRecord,
        amount: u32,
        reason: String,
        now: DateTime<Utc>,
    ) -> Result<Vec<ProgressionEvent>> {
        let before = progression::evaluate(&profile.snapshot(), now);

        let new_xp = profile.total_xp + amount as i64;
        let new_rank = Rank::for_xp(u32::try_from(new_xp.max(0)).unwrap_or(u32::MAX));
        // The evaluation at `now` already accounts for this activity's day
        let new_streak = before.effective_streak;
        let last_activity = now.to_rfc3339();

        let conn = self.db.conn();
        conn.execute(
            r#"UPDATE profiles
               SET total_xp = ?1, current_rank = ?2, daily_streak = ?3,
                   last_activity = ?4, last_seen = ?5
               WHERE id = ?6"#,
            rusqlite::params![
                new_xp,
                new_rank.as_str(),
                new_streak,
                last_activity,
                now.timestamp_millis(),
                profile.id,
            ],
        )?;
        drop(conn);

        let after = progression::evaluate(
            &progression::ProfileSnapshot {
                total_xp: new_xp,
                daily_streak: new_streak,
                last_activity,
                current_rank: new_rank.as_str().to_string(),
            },
            now,
        );

        let mut events = vec![ProgressionEvent::XpAwarded { amount, reason }];
        if new_streak > profile.daily_streak {
            events.push(ProgressionEvent::StreakExtended { count: new_streak });
        }
        if after.effective_rank > before.effective_rank {
            events.push(ProgressionEvent::RankUp {
                from: before.effective_rank,
                to: after.effective_rank,
            });
        }
        for badge in &after.earned_badges {
            if !before.earned_badges.contains(badge) {
                events.push(ProgressionEvent::BadgeEarned { badge: *badge });
            }
        }

        Ok(events)
    }

    // ========================================
    // LESSONS
    // ========================================

    /// Record a lesson completion and award its XP.
    ///
    /// Re-completing a lesson bumps the attempt counter (and keeps the
    /// best score) but awards no XP and emits no events.
    pub fn record_lesson_completion(
        &self,
        user_id: &str,
        lesson_id: &str,
        score: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<ProgressionEvent>> {
        let profile = self
            .query()
            .profile(user_id)?
            .ok_or_else(|| StoreError::ProfileNotFound(user_id.to_string()))?;
        let lesson = Lesson::get(lesson_id)
            .ok_or_else(|| StoreError::UnknownLesson(lesson_id.to_string()))?;
        let score = score.min(100);

        let conn = self.db.conn();
        let existing: Option<String> = conn
            .query_row(
                "SELECT id FROM lesson_completions WHERE user_id = ?1 AND lesson_id = ?2",
                rusqlite::params![user_id, lesson_id],
                |r| r.get(0),
            )
            .ok();

        if let Some(completion_id) = existing {
            conn.execute(
                "UPDATE lesson_completions SET attempts = attempts + 1, score = MAX(score, ?1) WHERE id = ?2",
                rusqlite::params![score, completion_id],
            )?;
            debug!(user_id, lesson_id, "repeat completion, no XP awarded");
            return Ok(Vec::new());
        }

        conn.execute(
            r#"INSERT INTO lesson_completions (id, user_id, lesson_id, score, attempts, completed_at)
               VALUES (?1, ?2, ?3, ?4, 1, ?5)"#,
            rusqlite::params![
                Uuid::new_v4().to_string(),
                user_id,
                lesson_id,
                score,
                now.timestamp_millis(),
            ],
        )?;
        drop(conn);

        self.award_xp(
            &profile,
            lesson.xp_reward,
            format!("Lesson '{}'", lesson.title),
            now,
        )
    }

    // ========================================
    // DUELS
    // ========================================

    /// Create a pending duel between two profiles
    pub fn create_duel(
        &self,
        challenger_id: &str,
        opponent_id: &str,
        now: DateTime<Utc>,
    ) -> Result<DuelRecord> {
        if challenger_id == opponent_id {
            return Err(StoreError::SelfChallenge.into());
        }
        for id in [challenger_id, opponent_id] {
            if self.query().profile(id)?.is_none() {
                return Err(StoreError::ProfileNotFound(id.to_string()).into());
            }
        }

        let record = DuelRecord {
            id: Uuid::new_v4().to_string(),
            challenger_id: challenger_id.to_string(),
            opponent_id: opponent_id.to_string(),
            status: DuelStatus::Pending,
            winner_id: None,
            xp_reward: 0,
            created_at: now.timestamp_millis(),
            completed_at: None,
        };

        let conn = self.db.conn();
        conn.execute(
            r#"INSERT INTO duels (id, challenger_id, opponent_id, status, xp_reward, created_at)
               VALUES (?1, ?2, ?3, ?4, 0, ?5)"#,
            rusqlite::params![
                record.id,
                record.challenger_id,
                record.opponent_id,
                record.status.as_str(),
                record.created_at,
            ],
        )?;

        Ok(record)
    }

    /// Resolve a pending duel: pick an outcome, set the winner, and award
    /// the outcome XP to the challenger (win or lose).
    pub fn resolve_duel(&self, duel_id: &str, now: DateTime<Utc>) -> Result<DuelResolution> {
        let duel = self
            .query()
            .duel(duel_id)?
            .ok_or_else(|| StoreError::DuelNotFound(duel_id.to_string()))?;
        if duel.status != DuelStatus::Pending {
            return Err(StoreError::DuelNotPending(duel_id.to_string()).into());
        }

        let challenger = self
            .query()
            .profile(&duel.challenger_id)?
            .ok_or_else(|| StoreError::ProfileNotFound(duel.challenger_id.clone()))?;
        let opponent = self
            .query()
            .profile(&duel.opponent_id)?
            .ok_or_else(|| StoreError::ProfileNotFound(duel.opponent_id.clone()))?;

        let outcome = pick_outcome();
        let winner_id = if outcome.won {
            duel.challenger_id.clone()
        } else {
            duel.opponent_id.clone()
        };

        let conn = self.db.conn();
        conn.execute(
            r#"UPDATE duels
               SET status = ?1, winner_id = ?2, xp_reward = ?3, completed_at = ?4
               WHERE id = ?5"#,
            rusqlite::params![
                DuelStatus::Completed.as_str(),
                winner_id,
                outcome.xp,
                now.timestamp_millis(),
                duel.id,
            ],
        )?;
        drop(conn);

        let events = self.award_xp(
            &challenger,
            outcome.xp,
            format!("Duel vs {}", opponent.username),
            now,
        )?;

        let duel = self
            .query()
            .duel(duel_id)?
            .ok_or_else(|| StoreError::DuelNotFound(duel_id.to_string()))?;

        Ok(DuelResolution {
            duel,
            outcome,
            events,
        })
    }

    // ========================================
    // FRIENDS
    // ========================================

    /// Send a friend request
    pub fn send_friend_request(
        &self,
        requester_id: &str,
        recipient_id: &str,
        now: DateTime<Utc>,
    ) -> Result<FriendRequestRecord> {
        if requester_id == recipient_id {
            return Err(StoreError::SelfFriendRequest.into());
        }
        for id in [requester_id, recipient_id] {
            if self.query().profile(id)?.is_none() {
                return Err(StoreError::ProfileNotFound(id.to_string()).into());
            }
        }

        let conn = self.db.conn();
        let already_friends: i64 = conn.query_row(
            "SELECT COUNT(*) FROM friendships WHERE user_id = ?1 AND friend_id = ?2",
            rusqlite::params![requester_id, recipient_id],
            |r| r.get(0),
        )?;
        if already_friends > 0 {
            return Err(StoreError::AlreadyFriends.into());
        }

        let pending: i64 = conn.query_row(
            r#"SELECT COUNT(*) FROM friend_requests
               WHERE status = 'pending'
                 AND ((requester_id = ?1 AND recipient_id = ?2)
                   OR (requester_id = ?2 AND recipient_id = ?1))"#,
            rusqlite::params![requester_id, recipient_id],
            |r| r.get(0),
        )?;
        if pending > 0 {
            return Err(StoreError::DuplicateFriendRequest.into());
        }

        let record = FriendRequestRecord {
            id: Uuid::new_v4().to_string(),
            requester_id: requester_id.to_string(),
            recipient_id: recipient_id.to_string(),
            status: FriendRequestStatus::Pending,
            created_at: now.timestamp_millis(),
        };

        conn.execute(
            r#"INSERT INTO friend_requests (id, requester_id, recipient_id, status, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5)"#,
            rusqlite::params![
                record.id,
                record.requester_id,
                record.recipient_id,
                record.status.as_str(),
                record.created_at,
            ],
        )?;

        Ok(record)
    }

    /// Accept or decline a pending friend request. Accepting creates the
    /// symmetric friendship pair in one transaction.
    pub fn respond_to_request(
        &self,
        request_id: &str,
        accept: bool,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let request = self
            .query()
            .friend_request(request_id)?
            .ok_or_else(|| StoreError::RequestNotFound(request_id.to_string()))?;
        if request.status != FriendRequestStatus::Pending {
            return Err(StoreError::RequestNotPending(request_id.to_string()).into());
        }

        let new_status = if accept {
            FriendRequestStatus::Accepted
        } else {
            FriendRequestStatus::Declined
        };

        let mut conn = self.db.conn();
        let tx = conn.transaction()?;
        tx.execute(
            "UPDATE friend_requests SET status = ?1 WHERE id = ?2",
            rusqlite::params![new_status.as_str(), request_id],
        )?;
        if accept {
            let ts = now.timestamp_millis();
            tx.execute(
                "INSERT OR IGNORE INTO friendships (user_id, friend_id, created_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![request.requester_id, request.recipient_id, ts],
            )?;
            tx.execute(
                "INSERT OR IGNORE INTO friendships (user_id, friend_id, created_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![request.recipient_id, request.requester_id, ts],
            )?;
        }
        tx.commit()?;

        Ok(())
    }
}
