//! Read-side queries over the profile database

use anyhow::Result;
use rusqlite::{OptionalExtension, Row};

use super::db::ProfileDb;
use super::models::{
    DuelRecord, DuelStatus, FriendRequestRecord, FriendRequestStatus, LeaderboardEntry,
    LessonCompletionRecord, ProfileRecord,
};
use crate::progression::{tier_color, Rank};

const PROFILE_COLUMNS: &str =
    "id, username, display_tag, total_xp, current_rank, daily_streak, last_activity, created_at, last_seen";

fn profile_from_row(row: &Row<'_>) -> rusqlite::Result<ProfileRecord> {
    Ok(ProfileRecord {
        id: row.get(0)?,
        username: row.get(1)?,
        display_tag: row.get(2)?,
        total_xp: row.get(3)?,
        current_rank: row.get(4)?,
        daily_streak: row.get(5)?,
        last_activity: row.get(6)?,
        created_at: row.get(7)?,
        last_seen: row.get(8)?,
    })
}

fn duel_from_row(row: &Row<'_>) -> rusqlite::Result<DuelRecord> {
    let status: String = row.get(3)?;
    Ok(DuelRecord {
        id: row.get(0)?,
        challenger_id: row.get(1)?,
        opponent_id: row.get(2)?,
        status: DuelStatus::from_str(&status).unwrap_or(DuelStatus::Pending),
        winner_id: row.get(4)?,
        xp_reward: row.get(5)?,
        created_at: row.get(6)?,
        completed_at: row.get(7)?,
    })
}

/// Queries profiles, leaderboards, and social state
#[derive(Clone)]
pub struct ProfileQuery {
    db: ProfileDb,
}

impl ProfileQuery {
    pub fn new(db: ProfileDb) -> Self {
        Self { db }
    }

    /// Look up a profile by ID
    pub fn profile(&self, user_id: &str) -> Result<Option<ProfileRecord>> {
        let conn = self.db.conn();
        let record = conn
            .query_row(
                &format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = ?1"),
                [user_id],
                profile_from_row,
            )
            .optional()?;
        Ok(record)
    }

    /// Look up a profile by username
    pub fn profile_by_username(&self, username: &str) -> Result<Option<ProfileRecord>> {
        let conn = self.db.conn();
        let record = conn
            .query_row(
                &format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE username = ?1"),
                [username],
                profile_from_row,
            )
            .optional()?;
        Ok(record)
    }

    /// Top profiles by XP, with rank and tier color derived from XP
    pub fn leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY total_xp DESC, username ASC LIMIT ?1"
        ))?;
        let profiles: Vec<ProfileRecord> = stmt
            .query_map([limit], profile_from_row)?
            .filter_map(|r| r.ok())
            .collect();

        Ok(profiles
            .into_iter()
            .enumerate()
            .map(|(i, p)| {
                let xp = u32::try_from(p.total_xp.max(0)).unwrap_or(u32::MAX);
                LeaderboardEntry {
                    position: i as u32 + 1,
                    user_id: p.id,
                    username: p.username,
                    display_tag: p.display_tag,
                    total_xp: p.total_xp,
                    rank: Rank::for_xp(xp),
                    tier_color: tier_color(xp).to_string(),
                }
            })
            .collect())
    }

    /// 1-based leaderboard position of a profile
    pub fn rank_position(&self, user_id: &str) -> Result<u32> {
        let conn = self.db.conn();
        let position: u32 = conn.query_row(
            r#"SELECT COUNT(*) + 1 FROM profiles
               WHERE total_xp > (SELECT total_xp FROM profiles WHERE id = ?1)"#,
            [user_id],
            |r| r.get(0),
        )?;
        Ok(position)
    }

    /// Friends of a profile, highest XP first
    pub fn friends_of(&self, user_id: &str) -> Result<Vec<ProfileRecord>> {
        let conn = self.db.conn();
        // friendships also has a created_at column, so qualify everything
        let mut stmt = conn.prepare(
            r#"SELECT profiles.id, profiles.username, profiles.display_tag, profiles.total_xp,
                      profiles.current_rank, profiles.daily_streak, profiles.last_activity,
                      profiles.created_at, profiles.last_seen
               FROM profiles
               JOIN friendships ON friendships.friend_id = profiles.id
               WHERE friendships.user_id = ?1
               ORDER BY profiles.total_xp DESC"#,
        )?;
        let friends = stmt
            .query_map([user_id], profile_from_row)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(friends)
    }

    /// Look up a friend request by ID
    pub fn friend_request(&self, request_id: &str) -> Result<Option<FriendRequestRecord>> {
        let conn = self.db.conn();
        let record = conn
            .query_row(
                "SELECT id, requester_id, recipient_id, status, created_at FROM friend_requests WHERE id = ?1",
                [request_id],
                |row| {
                    let status: String = row.get(3)?;
                    Ok(FriendRequestRecord {
                        id: row.get(0)?,
                        requester_id: row.get(1)?,
                        recipient_id: row.get(2)?,
                        status: FriendRequestStatus::from_str(&status)
                            .unwrap_or(FriendRequestStatus::Pending),
                        created_at: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    /// Pending friend requests addressed to a profile, oldest first
    pub fn pending_requests(&self, user_id: &str) -> Result<Vec<FriendRequestRecord>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            r#"SELECT id, requester_id, recipient_id, status, created_at
               FROM friend_requests
               WHERE recipient_id = ?1 AND status = 'pending'
               ORDER BY created_at ASC"#,
        )?;
        let requests = stmt
            .query_map([user_id], |row| {
                let status: String = row.get(3)?;
                Ok(FriendRequestRecord {
                    id: row.get(0)?,
                    requester_id: row.get(1)?,
                    recipient_id: row.get(2)?,
                    status: FriendRequestStatus::from_str(&status)
                        .unwrap_or(FriendRequestStatus::Pending),
                    created_at: row.get(4)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(requests)
    }

    /// Look up a duel by ID
    pub fn duel(&self, duel_id: &str) -> Result<Option<DuelRecord>> {
        let conn = self.db.conn();
        let record = conn
            .query_row(
                r#"SELECT id, challenger_id, opponent_id, status, winner_id, xp_reward,
                          created_at, completed_at
                   FROM duels WHERE id = ?1"#,
                [duel_id],
                duel_from_row,
            )
            .optional()?;
        Ok(record)
    }

    /// Duels involving a profile, newest first
    pub fn duel_history(&self, user_id: &str) -> Result<Vec<DuelRecord>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            r#"SELECT id, challenger_id, opponent_id, status, winner_id, xp_reward,
                      created_at, completed_at
               FROM duels
               WHERE challenger_id = ?1 OR opponent_id = ?1
               ORDER BY created_at DESC"#,
        )?;
        let duels = stmt
            .query_map([user_id], duel_from_row)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(duels)
    }

    /// Lessons a profile has completed, in completion order
    pub fn completed_lessons(&self, user_id: &str) -> Result<Vec<LessonCompletionRecord>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            r#"SELECT id, user_id, lesson_id, score, attempts, completed_at
               FROM lesson_completions
               WHERE user_id = ?1
               ORDER BY completed_at ASC"#,
        )?;
        let completions = stmt
            .query_map([user_id], |row| {
                Ok(LessonCompletionRecord {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    lesson_id: row.get(2)?,
                    score: row.get(3)?,
                    attempts: row.get(4)?,
                    completed_at: row.get(5)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(completions)
    }
}
