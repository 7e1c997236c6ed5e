//! CLI command implementations

pub mod dashboard;
pub mod init;
pub mod leaderboard;
pub mod lessons;
pub mod social;

use chamcode::store::ProgressionEvent;
use chamcode::progression::Badge;

/// Print the progression events from an XP award
pub fn print_events(events: &[ProgressionEvent]) {
    for event in events {
        match event {
            ProgressionEvent::XpAwarded { amount, reason } => {
                println!("  ⭐ +{} XP ({})", amount, reason);
            }
            ProgressionEvent::StreakExtended { count } => {
                println!("  🔥 {}-day streak!", count);
            }
            ProgressionEvent::RankUp { from, to } => {
                println!("  🏆 Rank up: {} → {}", from, to);
            }
            ProgressionEvent::BadgeEarned { badge } => {
                let def = Badge::get(*badge);
                println!("  {} Badge earned: {}", def.icon, def.name);
            }
        }
    }
}
