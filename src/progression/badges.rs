//! Badge definitions and eligibility rules
//!
//! Badges are derived fresh on every evaluation from XP, streak, and rank.
//! The evaluator reports currently-satisfied conditions only; an accretive
//! "ever earned" history is the caller's responsibility.

use serde::{Deserialize, Serialize};

use super::rank::Rank;

/// Unique identifier for each badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BadgeId {
    // XP milestones
    FirstLesson,
    HundredXpClub,
    SpeedDemon,
    Perfectionist,

    // Streak badges
    StreakMaster,

    // Rank badges (mutually exclusive, exactly one fires)
    BronzeRank,
    SilverRank,
    GoldRank,
}

impl BadgeId {
    /// Get the string ID used in profile rows and API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstLesson => "first_lesson",
            Self::HundredXpClub => "100_xp_club",
            Self::SpeedDemon => "speed_demon",
            Self::Perfectionist => "perfectionist",
            Self::StreakMaster => "streak_master",
            Self::BronzeRank => "bronze_rank",
            Self::SilverRank => "silver_rank",
            Self::GoldRank => "gold_rank",
        }
    }

    /// Parse from the string ID
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "first_lesson" => Some(Self::FirstLesson),
            "100_xp_club" => Some(Self::HundredXpClub),
            "speed_demon" => Some(Self::SpeedDemon),
            "perfectionist" => Some(Self::Perfectionist),
            "streak_master" => Some(Self::StreakMaster),
            "bronze_rank" => Some(Self::BronzeRank),
            "silver_rank" => Some(Self::SilverRank),
            "gold_rank" => Some(Self::GoldRank),
            _ => None,
        }
    }

    /// All badge IDs in canonical display order
    pub fn all() -> &'static [BadgeId] {
        &[
            Self::FirstLesson,
            Self::HundredXpClub,
            Self::SpeedDemon,
            Self::Perfectionist,
            Self::StreakMaster,
            Self::BronzeRank,
            Self::SilverRank,
            Self::GoldRank,
        ]
    }
}

/// Badge definition with display metadata
#[derive(Debug, Clone)]
pub struct Badge {
    pub id: BadgeId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

/// All badge definitions
pub static BADGES: &[Badge] = &[
    Badge {
        id: BadgeId::FirstLesson,
        name: "First Steps",
        description: "Completed first lesson",
        icon: "🎓",
        color: "#2196F3",
    },
    Badge {
        id: BadgeId::HundredXpClub,
        name: "100 XP Club",
        description: "Earned 100+ XP",
        icon: "💯",
        color: "#4CAF50",
    },
    Badge {
        id: BadgeId::SpeedDemon,
        name: "Speed Demon",
        description: "Completed lesson in under 2 minutes",
        icon: "⚡",
        color: "#9C27B0",
    },
    Badge {
        id: BadgeId::Perfectionist,
        name: "Perfectionist",
        description: "100% score on 5 lessons",
        icon: "⭐",
        color: "#FF9800",
    },
    Badge {
        id: BadgeId::StreakMaster,
        name: "Streak Master",
        description: "7+ day streak",
        icon: "🔥",
        color: "#FF5722",
    },
    Badge {
        id: BadgeId::BronzeRank,
        name: "Bronze Coder",
        description: "Reached Bronze rank",
        icon: "🥉",
        color: "#CD7F32",
    },
    Badge {
        id: BadgeId::SilverRank,
        name: "Silver Coder",
        description: "Reached Silver rank",
        icon: "🥈",
        color: "#C0C0C0",
    },
    Badge {
        id: BadgeId::GoldRank,
        name: "Gold Coder",
        description: "Reached Gold rank",
        icon: "🥇",
        color: "#FFD700",
    },
];

impl Badge {
    /// Get badge definition by ID
    pub fn get(id: BadgeId) -> &'static Badge {
        BADGES
            .iter()
            .find(|b| b.id == id)
            .expect("All badges should be defined")
    }
}

/// Evaluate which badges are currently earned.
///
/// Output order is the canonical definition order: XP milestones low to
/// high, then the streak badge, then the rank badge for the effective
/// rank (exactly one of the three rank badges).
pub fn earned_badges(total_xp: u32, effective_streak: u32, effective_rank: Rank) -> Vec<BadgeId> {
    let mut earned = Vec::new();

    let xp_milestones = [
        (25, BadgeId::FirstLesson),
        (100, BadgeId::HundredXpClub),
        (200, BadgeId::SpeedDemon),
        (500, BadgeId::Perfectionist),
    ];

    for (threshold, id) in xp_milestones {
        if total_xp >= threshold {
            earned.push(id);
        }
    }

    if effective_streak >= 7 {
        earned.push(BadgeId::StreakMaster);
    }

    earned.push(match effective_rank {
        Rank::Bronze => BadgeId::BronzeRank,
        Rank::Silver => BadgeId::SilverRank,
        Rank::Gold => BadgeId::GoldRank,
    });

    earned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_xp_bronze_profile() {
        let badges = earned_badges(100, 0, Rank::Bronze);
        assert_eq!(
            badges,
            vec![
                BadgeId::FirstLesson,
                BadgeId::HundredXpClub,
                BadgeId::BronzeRank
            ]
        );
        assert!(!badges.contains(&BadgeId::SpeedDemon));
        assert!(!badges.contains(&BadgeId::Perfectionist));
        assert!(!badges.contains(&BadgeId::StreakMaster));
    }

    #[test]
    fn test_gold_profile_with_streak() {
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
        assert!(!badges.contains(&BadgeId::BronzeRank));
        assert!(!badges.contains(&BadgeId::SilverRank));
    }

    #[test]
    fn test_exactly_one_rank_badge() {
        for rank in [Rank::Bronze, Rank::Silver, Rank::Gold] {
            let badges = earned_badges(0, 0, rank);
            let rank_badges = badges
                .iter()
                .filter(|b| {
                    matches!(
                        b,
                        BadgeId::BronzeRank | BadgeId::SilverRank | BadgeId::GoldRank
                    )
                })
                .count();
            assert_eq!(rank_badges, 1);
        }
    }

    #[test]
    fn test_xp_milestones_are_monotonic() {
        let low = earned_badges(150, 0, Rank::Bronze);
        let high = earned_badges(600, 0, Rank::Bronze);
        for badge in &low {
            if !matches!(badge, BadgeId::BronzeRank) {
                assert!(high.contains(badge));
            }
        }
    }

    #[test]
    fn test_streak_master_threshold() {
        assert!(!earned_badges(0, 6, Rank::Bronze).contains(&BadgeId::StreakMaster));
        assert!(earned_badges(0, 7, Rank::Bronze).contains(&BadgeId::StreakMaster));
    }

    #[test]
    fn test_badge_id_string_roundtrip() {
        for id in BadgeId::all() {
            assert_eq!(BadgeId::from_str(id.as_str()), Some(*id));
        }
        assert_eq!(BadgeId::from_str("weekly_winner"), None);
    }

    #[test]
    fn test_all_badges_defined() {
        for id in BadgeId::all() {
            let badge = Badge::get(*id);
            assert_eq!(badge.id, *id);
            assert!(!badge.name.is_empty());
        }
        assert_eq!(BADGES.len(), BadgeId::all().len());
    }
}
