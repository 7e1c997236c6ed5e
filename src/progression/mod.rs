//! Progression engine for ChamCode
//!
//! Turns a profile's persisted counters (total XP, stored streak, last
//! activity timestamp) into the derived gamification state shown on every
//! screen: effective rank, effective streak, earned badges, tier color,
//! and XP progress toward the next rank.
//!
//! The engine is pure and synchronous. It does no I/O, reads no ambient
//! clock (`now` is always an explicit parameter), and never fails: bad
//! timestamps are coerced to `now`, negative XP is clamped to zero, and
//! the stored rank string is informational only - rank is always
//! recomputed from XP.
//!
//! # Usage
//!
//! ```ignore
//! let state = progression::evaluate(&profile.snapshot(), Utc::now());
//! println!("{} ({} day streak)", state.effective_rank, state.effective_streak);
//! ```

mod badges;
mod rank;
mod streak;

pub use badges::{earned_badges, Badge, BadgeId, BADGES};
pub use rank::{
    progress_to_next_rank, tier_color, Rank, RankProgress, RankThreshold, LEGEND_COLOR,
    MAX_RANK_DISPLAY_SPAN, RANK_THRESHOLDS,
};
pub use streak::{parse_last_activity, resolve_streak, STREAK_CAP};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Engine input: the persisted counters of one profile.
///
/// `total_xp` is signed to match the storage row; the engine clamps
/// negatives to zero. `current_rank` is carried for interop but never
/// trusted for display logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub total_xp: i64,
    pub daily_streak: u32,
    /// RFC 3339 timestamp of the most recent recorded activity
    pub last_activity: String,
    /// Stored rank string, informational only
    pub current_rank: String,
}

/// Engine output: derived gamification state, recomputed fresh per call
/// and never persisted by the engine itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamificationState {
    pub effective_rank: Rank,
    pub effective_streak: u32,
    /// Earned badge IDs in canonical display order
    pub earned_badges: Vec<BadgeId>,
    /// Hex color keyed by XP thresholds
    pub tier_color: String,
    pub progress: RankProgress,
}

/// Clamp a stored XP value into the engine's non-negative domain.
fn clamp_xp(total_xp: i64) -> u32 {
    u32::try_from(total_xp.max(0)).unwrap_or(u32::MAX)
}

/// Evaluate the full derived state for a profile at an explicit instant.
///
/// Deterministic: identical inputs (including `now`) yield identical
/// output, so concurrent evaluations from multiple views are safe and
/// comparable.
pub fn evaluate(profile: &ProfileSnapshot, now: DateTime<Utc>) -> GamificationState {
    let xp = clamp_xp(profile.total_xp);
    let last_activity = parse_last_activity(&profile.last_activity, now);

    let effective_rank = Rank::for_xp(xp);
    let effective_streak = resolve_streak(profile.daily_streak, last_activity, now);

    GamificationState {
        effective_rank,
        effective_streak,
        earned_badges: earned_badges(xp, effective_streak, effective_rank),
        tier_color: tier_color(xp).to_string(),
        progress: progress_to_next_rank(xp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-14T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn snapshot(total_xp: i64, daily_streak: u32, last_activity: &str) -> ProfileSnapshot {
        ProfileSnapshot {
            total_xp,
            daily_streak,
            last_activity: last_activity.to_string(),
            current_rank: "Bronze".to_string(),
        }
    }

    #[test]
    fn test_evaluate_bronze_profile() {
        let state = evaluate(&snapshot(650, 5, "2026-03-14T09:00:00Z"), now());

        assert_eq!(state.effective_rank, Rank::Bronze);
        assert_eq!(state.effective_streak, 5);
        assert_eq!(
            state.earned_badges,
            vec![
                BadgeId::FirstLesson,
                BadgeId::HundredXpClub,
                BadgeId::BronzeRank
            ]
        );
        assert_eq!(state.tier_color, "#CD7F32");
    }

    #[test]
    fn test_evaluate_ignores_stored_rank() {
        let mut profile = snapshot(2600, 0, "2026-03-14T09:00:00Z");
        profile.current_rank = "Bronze".to_string();

        let state = evaluate(&profile, now());
        assert_eq!(state.effective_rank, Rank::Gold);
        assert_eq!(state.tier_color, "#FFD700");
        assert!(state.earned_badges.contains(&BadgeId::GoldRank));
        assert!(!state.earned_badges.contains(&BadgeId::BronzeRank));
    }

    #[test]
    fn test_evaluate_unknown_rank_string_ignored() {
        let mut profile = snapshot(1200, 0, "2026-03-14T09:00:00Z");
        profile.current_rank = "Platinum".to_string();

        assert_eq!(evaluate(&profile, now()).effective_rank, Rank::Silver);
    }

    #[test]
    fn test_negative_xp_clamped() {
        let state = evaluate(&snapshot(-500, 0, "2026-03-14T09:00:00Z"), now());
        assert_eq!(state.effective_rank, Rank::Bronze);
        assert_eq!(state.earned_badges, vec![BadgeId::BronzeRank]);
    }

    #[test]
    fn test_bad_timestamp_behaves_as_same_day() {
        let state = evaluate(&snapshot(650, 5, "garbage"), now());
        assert_eq!(state.effective_streak, 5);
    }

    #[test]
    fn test_idempotence() {
        let profile = snapshot(1800, 4, "2026-03-13T12:00:00Z");
        let a = evaluate(&profile, now());
        let b = evaluate(&profile, now());
        assert_eq!(a, b);
    }
}
