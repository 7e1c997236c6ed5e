//! Dashboard command implementation

use anyhow::Result;
use chrono::Utc;

use chamcode::progression::{self, Badge, RankProgress, MAX_RANK_DISPLAY_SPAN};
use chamcode::store::ProfileStore;
use chamcode::store::StoreError;

const BAR_WIDTH: usize = 24;

/// Show the active profile's derived gamification state
pub fn dashboard_command(store: &ProfileStore, user_id: &str, json: bool) -> Result<()> {
    let profile = store
        .query()
        .profile(user_id)?
        .ok_or_else(|| StoreError::ProfileNotFound(user_id.to_string()))?;
    let state = progression::evaluate(&profile.snapshot(), Utc::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    println!(
        "{} [{}]  {} {}",
        profile.username,
        profile.display_tag,
        state.effective_rank,
        state.tier_color
    );
    println!("  XP: {}", profile.total_xp);
    println!("  🔥 Day streak: {}", state.effective_streak);

    match &state.progress {
        RankProgress::Progress {
            xp_into_rank,
            xp_needed_for_rank,
            xp_to_next,
            next_rank,
        } => {
            println!(
                "  🎯 {} XP to {}",
                xp_to_next,
                next_rank.as_str()
            );
            println!(
                "  [{}] {} / {} XP",
                bar(*xp_into_rank, *xp_needed_for_rank),
                xp_into_rank,
                xp_needed_for_rank
            );
        }
        RankProgress::MaxRank => {
            println!("  👑 Maximum rank achieved!");
            println!("  [{}]", bar(MAX_RANK_DISPLAY_SPAN, MAX_RANK_DISPLAY_SPAN));
        }
    }

    if !state.earned_badges.is_empty() {
        println!("  Badges:");
        for id in &state.earned_badges {
            let badge = Badge::get(*id);
            println!("    {} {} - {}", badge.icon, badge.name, badge.description);
        }
    }

    Ok(())
}

fn bar(progress: u32, total: u32) -> String {
    let filled = if total == 0 {
        BAR_WIDTH
    } else {
        (progress as usize * BAR_WIDTH) / total as usize
    };
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
