//! Rank thresholds, tier colors, and XP progress
//!
//! Defines the Bronze/Silver/Gold ladder and progress-to-next-rank math.

use serde::{Deserialize, Serialize};

/// Gamification rank, ordered from lowest to highest attainable tier.
///
/// Legend is a display-only aspiration beyond Gold and is never returned
/// by [`Rank::for_xp`]; it only appears as a next-rank label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Bronze,
    Silver,
    Gold,
}

/// Rank threshold definition (inclusive bounds, open-ended top tier)
#[derive(Debug, Clone)]
pub struct RankThreshold {
    pub rank: Rank,
    pub min_xp: u32,
    /// None for the unbounded top tier
    pub max_xp: Option<u32>,
}

/// All rank thresholds (must be sorted by min_xp, contiguous, non-overlapping)
pub static RANK_THRESHOLDS: &[RankThreshold] = &[
    RankThreshold {
        rank: Rank::Bronze,
        min_xp: 0,
        max_xp: Some(999),
    },
    RankThreshold {
        rank: Rank::Silver,
        min_xp: 1000,
        max_xp: Some(2499),
    },
    RankThreshold {
        rank: Rank::Gold,
        min_xp: 2500,
        max_xp: None,
    },
];

/// Display color for the Legend label (next rank after Gold)
pub const LEGEND_COLOR: &str = "#FF6B6B";

/// Fixed display span for the unbounded top tier's progress bar.
/// Not a real ceiling, only a rendering convention.
pub const MAX_RANK_DISPLAY_SPAN: u32 = 1000;

impl Rank {
    /// Resolve the rank for a given XP total
    pub fn for_xp(xp: u32) -> Rank {
        RANK_THRESHOLDS
            .iter()
            .rev()
            .find(|t| xp >= t.min_xp)
            .map(|t| t.rank)
            .unwrap_or(Rank::Bronze)
    }

    /// Threshold entry for this rank
    pub fn threshold(self) -> &'static RankThreshold {
        RANK_THRESHOLDS
            .iter()
            .find(|t| t.rank == self)
            .expect("All ranks should have a threshold")
    }

    /// Next attainable rank (None at the top of the ladder)
    pub fn next(self) -> Option<Rank> {
        match self {
            Self::Bronze => Some(Self::Silver),
            Self::Silver => Some(Self::Gold),
            Self::Gold => None,
        }
    }

    /// Name of the next tier for display, including the aspirational Legend
    pub fn next_name(self) -> &'static str {
        match self {
            Self::Bronze => "Silver",
            Self::Silver => "Gold",
            Self::Gold => "Legend",
        }
    }

    /// Get the string form for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
        }
    }

    /// Parse from database string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Bronze" => Some(Self::Bronze),
            "Silver" => Some(Self::Silver),
            "Gold" => Some(Self::Gold),
            _ => None,
        }
    }

    /// Display color associated with this rank
    pub fn color(&self) -> &'static str {
        match self {
            Self::Bronze => "#CD7F32",
            Self::Silver => "#C0C0C0",
            Self::Gold => "#FFD700",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cosmetic tier color keyed by XP thresholds.
///
/// Keyed by XP rather than a stored rank string so the color stays
/// consistent even when the persisted rank is stale.
pub fn tier_color(xp: u32) -> &'static str {
    Rank::for_xp(xp).color()
}

/// XP progress toward the next rank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankProgress {
    /// Progress figures for a bounded tier
    Progress {
        /// XP accumulated inside the current tier
        xp_into_rank: u32,
        /// Total XP span of the current tier
        xp_needed_for_rank: u32,
        /// XP remaining until the next tier
        xp_to_next: u32,
        /// The tier this progress leads to
        next_rank: Rank,
    },
    /// Top of the ladder; no numeric progress exists.
    /// Callers must branch on this instead of doing ceiling arithmetic.
    MaxRank,
}

/// Compute progress toward the next rank for an XP total.
///
/// Returns [`RankProgress::MaxRank`] once the unbounded top tier is
/// reached; bar rendering for that case uses [`MAX_RANK_DISPLAY_SPAN`].
pub fn progress_to_next_rank(xp: u32) -> RankProgress {
    let current = Rank::for_xp(xp);
    let threshold = current.threshold();

    let (Some(max_xp), Some(next_rank)) = (threshold.max_xp, current.next()) else {
        return RankProgress::MaxRank;
    };

    RankProgress::Progress {
        xp_into_rank: xp - threshold.min_xp,
        xp_needed_for_rank: max_xp + 1 - threshold.min_xp,
        xp_to_next: max_xp + 1 - xp,
        next_rank,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_for_xp_boundaries() {
        assert_eq!(Rank::for_xp(0), Rank::Bronze);
        assert_eq!(Rank::for_xp(999), Rank::Bronze);
        assert_eq!(Rank::for_xp(1000), Rank::Silver);
        assert_eq!(Rank::for_xp(2499), Rank::Silver);
        assert_eq!(Rank::for_xp(2500), Rank::Gold);
        assert_eq!(Rank::for_xp(u32::MAX), Rank::Gold);
    }

    #[test]
    fn test_thresholds_partition_xp_space() {
        let mut expected_min = 0u32;
        for threshold in RANK_THRESHOLDS {
            assert_eq!(threshold.min_xp, expected_min);
            match threshold.max_xp {
                Some(max) => {
                    assert!(max >= threshold.min_xp);
                    expected_min = max + 1;
                }
                None => assert!(std::ptr::eq(
                    threshold,
                    RANK_THRESHOLDS.last().unwrap()
                )),
            }
        }
        assert!(RANK_THRESHOLDS.last().unwrap().max_xp.is_none());
    }

    #[test]
    fn test_tier_color_tracks_xp_not_stored_rank() {
        assert_eq!(tier_color(650), "#CD7F32");
        assert_eq!(tier_color(1800), "#C0C0C0");
        assert_eq!(tier_color(2500), "#FFD700");
    }

    #[test]
    fn test_progress_mid_bronze() {
        let progress = progress_to_next_rank(650);
        assert_eq!(
            progress,
            RankProgress::Progress {
                xp_into_rank: 650,
                xp_needed_for_rank: 1000,
                xp_to_next: 350,
                next_rank: Rank::Silver,
            }
        );
    }

    #[test]
    fn test_progress_at_silver_floor() {
        let progress = progress_to_next_rank(1000);
        assert_eq!(
            progress,
            RankProgress::Progress {
                xp_into_rank: 0,
                xp_needed_for_rank: 1500,
                xp_to_next: 1500,
                next_rank: Rank::Gold,
            }
        );
    }

    #[test]
    fn test_progress_max_rank_sentinel() {
        assert_eq!(progress_to_next_rank(2500), RankProgress::MaxRank);
        assert_eq!(progress_to_next_rank(99_999), RankProgress::MaxRank);
    }

    #[test]
    fn test_next_rank_names() {
        assert_eq!(Rank::Bronze.next_name(), "Silver");
        assert_eq!(Rank::Silver.next_name(), "Gold");
        assert_eq!(Rank::Gold.next_name(), "Legend");
        assert_eq!(Rank::Gold.next(), None);
    }
}
