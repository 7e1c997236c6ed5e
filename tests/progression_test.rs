//! End-to-end properties of the progression engine

use chamcode::progression::{
    earned_badges, evaluate, progress_to_next_rank, resolve_streak, tier_color, BadgeId,
    ProfileSnapshot, Rank, RankProgress, STREAK_CAP,
};
use chrono::{DateTime, Duration, Utc};

fn t() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-14T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

#[test]
fn rank_intervals_partition_xp_space() {
    // Every XP value maps to exactly one rank, with no gaps at the seams
    for xp in [0, 1, 500, 998, 999, 1000, 1001, 2498, 2499, 2500, 2501, 1_000_000] {
        let rank = Rank::for_xp(xp);
        let threshold = rank.threshold();
        assert!(xp >= threshold.min_xp);
        if let Some(max) = threshold.max_xp {
            assert!(xp <= max);
        }
    }
    assert_eq!(Rank::for_xp(999), Rank::Bronze);
    assert_eq!(Rank::for_xp(1000), Rank::Silver);
    assert_eq!(Rank::for_xp(2499), Rank::Silver);
    assert_eq!(Rank::for_xp(2500), Rank::Gold);
}

#[test]
fn streak_rules() {
    assert_eq!(resolve_streak(5, t(), t()), 5);
    assert_eq!(resolve_streak(5, t() - Duration::days(1), t()), 6);
    assert_eq!(resolve_streak(5, t() - Duration::days(3), t()), 0);
    assert_eq!(resolve_streak(14, t() - Duration::days(1), t()), 15);
    for stored in 0..40 {
        assert!(resolve_streak(stored, t() - Duration::days(1), t()) <= STREAK_CAP);
    }
}

#[test]
fn badge_sets_for_reference_profiles() {
    let badges = earned_badges(100, 0, Rank::Bronze);
    assert!(badges.contains(&BadgeId::FirstLesson));
    assert!(badges.contains(&BadgeId::HundredXpClub));
    assert!(badges.contains(&BadgeId::BronzeRank));
    assert!(!badges.contains(&BadgeId::SpeedDemon));
    assert!(!badges.contains(&BadgeId::Perfectionist));
    assert!(!badges.contains(&BadgeId::StreakMaster));

    let badges = earned_badges(2600, 8, Rank::Gold);
    assert_eq!(
        badges,
        vec![
            BadgeId::FirstLesson,
            BadgeId::HundredXpClub,
            BadgeId::SpeedDemon,
            BadgeId::Perfectionist,
            BadgeId::StreakMaster,
            BadgeId::GoldRank,
        ]
    );
}

#[test]
fn progress_reference_values() {
    assert_eq!(progress_to_next_rank(2500), RankProgress::MaxRank);
    assert_eq!(
        progress_to_next_rank(1000),
        RankProgress::Progress {
            xp_into_rank: 0,
            xp_needed_for_rank: 1500,
            xp_to_next: 1500,
            next_rank: Rank::Gold,
        }
    );
}

#[test]
fn bronze_scenario_from_dashboard() {
    // Profile {totalXp: 650, dailyStreak: 5, lastActivity: today}
    let profile = ProfileSnapshot {
        total_xp: 650,
        daily_streak: 5,
        last_activity: t().to_rfc3339(),
        current_rank: "Bronze".to_string(),
    };
    let state = evaluate(&profile, t());

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
fn evaluate_is_idempotent() {
    let profile = ProfileSnapshot {
        total_xp: 1800,
        daily_streak: 4,
        last_activity: (t() - Duration::days(1)).to_rfc3339(),
        current_rank: "Silver".to_string(),
    };
    assert_eq!(evaluate(&profile, t()), evaluate(&profile, t()));
}

#[test]
fn tier_color_matches_rank_thresholds() {
    for (xp, color) in [(0, "#CD7F32"), (999, "#CD7F32"), (1000, "#C0C0C0"), (2500, "#FFD700")] {
        assert_eq!(tier_color(xp), color);
    }
}
