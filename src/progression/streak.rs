//! Daily streak resolution
//!
//! Derives the effective streak from the stored counter and the elapsed
//! time since the last recorded activity. The caller supplies `now`
//! explicitly so results stay deterministic.

use chrono::{DateTime, Utc};

/// Hard cap on the derived streak. A single evaluation never raises the
/// counter past this, so a stale stored value cannot compound.
pub const STREAK_CAP: u32 = 15;

/// Resolve the effective daily streak.
///
/// Same-day activity keeps the stored value, activity yesterday extends it
/// by one (capped), a gap of more than one day resets to zero. A
/// `last_activity` in the future (clock skew) is treated as same-day
/// rather than producing a negative elapsed time.
pub fn resolve_streak(stored: u32, last_activity: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let days_since = (now - last_activity).num_days();

    if days_since <= 0 {
        stored
    } else if days_since == 1 {
        (stored + 1).min(STREAK_CAP)
    } else {
        0
    }
}

/// Parse an RFC 3339 activity timestamp, substituting `now` when the
/// string does not parse. Never fails.
pub fn parse_last_activity(raw: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn t() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-14T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_same_day_keeps_streak() {
        assert_eq!(resolve_streak(5, t(), t()), 5);
        assert_eq!(resolve_streak(0, t() - Duration::hours(3), t()), 0);
    }

    #[test]
    fn test_yesterday_increments() {
        assert_eq!(resolve_streak(5, t() - Duration::days(1), t()), 6);
        assert_eq!(resolve_streak(0, t() - Duration::days(1), t()), 1);
    }

    #[test]
    fn test_cap_enforced() {
        assert_eq!(resolve_streak(14, t() - Duration::days(1), t()), 15);
        assert_eq!(resolve_streak(15, t() - Duration::days(1), t()), 15);
        assert_eq!(resolve_streak(99, t() - Duration::days(1), t()), 15);
    }

    #[test]
    fn test_gap_resets() {
        assert_eq!(resolve_streak(5, t() - Duration::days(3), t()), 0);
        assert_eq!(resolve_streak(15, t() - Duration::days(2), t()), 0);
    }

    #[test]
    fn test_future_timestamp_treated_as_same_day() {
        assert_eq!(resolve_streak(5, t() + Duration::days(2), t()), 5);
    }

    #[test]
    fn test_partial_day_does_not_increment() {
        // 1.9 days is still floor() == 1 day elapsed
        assert_eq!(resolve_streak(5, t() - Duration::hours(45), t()), 6);
        // 23 hours is the same day bucket
        assert_eq!(resolve_streak(5, t() - Duration::hours(23), t()), 5);
    }

    #[test]
    fn test_unparsable_timestamp_falls_back_to_now() {
        assert_eq!(parse_last_activity("not-a-date", t()), t());
        assert_eq!(parse_last_activity("", t()), t());
        let parsed = parse_last_activity("2026-03-13T12:00:00Z", t());
        assert_eq!(parsed, t() - Duration::days(1));
    }
}
