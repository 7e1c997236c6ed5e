//! Duel outcome resolution
//!
//! A duel resolves to one of four fixed outcomes, picked uniformly at
//! random. The challenger earns the outcome XP whether they win or lose.

/// A possible duel result from the challenger's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuelOutcome {
    pub won: bool,
    pub xp: u32,
    pub message: &'static str,
}

/// All possible duel outcomes
pub static DUEL_OUTCOMES: &[DuelOutcome] = &[
    DuelOutcome {
        won: true,
        xp: 15,
        message: "Victory! Your coding skills prevailed!",
    },
    DuelOutcome {
        won: true,
        xp: 10,
        message: "Close match, but you pulled through!",
    },
    DuelOutcome {
        won: false,
        xp: 5,
        message: "Good effort! You still earned some XP.",
    },
    DuelOutcome {
        won: false,
        xp: 3,
        message: "Better luck next time, keep practicing!",
    },
];

/// Pick a duel outcome using the OS RNG.
///
/// Falls back to a time-derived index if the OS RNG is unavailable;
/// resolution must never fail.
pub fn pick_outcome() -> &'static DuelOutcome {
    let mut byte = [0u8; 1];
    let index = if getrandom::getrandom(&mut byte).is_ok() {
        byte[0] as usize % DUEL_OUTCOMES.len()
    } else {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or(0);
        nanos as usize % DUEL_OUTCOMES.len()
    };
    &DUEL_OUTCOMES[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_table_shape() {
        assert_eq!(DUEL_OUTCOMES.len(), 4);
        assert_eq!(DUEL_OUTCOMES.iter().filter(|o| o.won).count(), 2);
        assert!(DUEL_OUTCOMES.iter().all(|o| o.xp > 0));
    }

    #[test]
    fn test_pick_returns_table_entry() {
        for _ in 0..32 {
            let outcome = pick_outcome();
            assert!(DUEL_OUTCOMES.iter().any(|o| o == outcome));
        }
    }
}
