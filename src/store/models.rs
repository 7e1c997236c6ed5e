//! Data models for the profile store
//!
//! These structures represent the rows stored in and queried from the
//! profile database.

use serde::{Deserialize, Serialize};

use crate::progression::{ProfileSnapshot, Rank};

/// A stored user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: String,
    pub username: String,
    pub display_tag: String,

    // Progression counters
    pub total_xp: i64,
    /// Stored rank string; display logic recomputes from XP instead
    pub current_rank: String,
    pub daily_streak: u32,
    /// RFC 3339 timestamp of the most recent recorded activity
    pub last_activity: String,

    // Timestamps (ms since epoch)
    pub created_at: i64,
    pub last_seen: i64,
}

impl ProfileRecord {
    /// Engine input view of this row
    pub fn snapshot(&self) -> ProfileSnapshot {
        ProfileSnapshot {
            total_xp: self.total_xp,
            daily_streak: self.daily_streak,
            last_activity: self.last_activity.clone(),
            current_rank: self.current_rank.clone(),
        }
    }
}

/// A completed lesson (one row per user + lesson)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonCompletionRecord {
    pub id: String,
    pub user_id: String,
    pub lesson_id: String,
    /// Score achieved, 0-100
    pub score: u32,
    pub attempts: u32,
    /// ms since epoch
    pub completed_at: i64,
}

/// Status of a friend request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendRequestStatus {
    Pending,
    Accepted,
    Declined,
}

impl FriendRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "declined" => Some(Self::Declined),
            _ => None,
        }
    }
}

/// A friend request between two profiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequestRecord {
    pub id: String,
    pub requester_id: String,
    pub recipient_id: String,
    pub status: FriendRequestStatus,
    pub created_at: i64,
}

/// Status of a duel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuelStatus {
    Pending,
    Completed,
}

impl DuelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// A duel between two profiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuelRecord {
    pub id: String,
    pub challenger_id: String,
    pub opponent_id: String,
    pub status: DuelStatus,
    pub winner_id: Option<String>,
    /// XP awarded to the challenger on completion
    pub xp_reward: u32,
    pub created_at: i64,
    pub completed_at: Option<i64>,
}

/// One leaderboard row, ordered by XP.
///
/// The rank and tier color are derived from XP at query time; the stored
/// rank string is never surfaced here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based position in XP order
    pub position: u32,
    pub user_id: String,
    pub username: String,
    pub display_tag: String,
    pub total_xp: i64,
    pub rank: Rank,
    pub tier_color: String,
}
