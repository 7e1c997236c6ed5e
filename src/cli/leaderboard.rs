//! Leaderboard command implementation

use anyhow::Result;

use chamcode::store::ProfileStore;

/// Show the top profiles by XP and the active profile's position
pub fn leaderboard_command(store: &ProfileStore, user_id: &str, limit: u32, json: bool) -> Result<()> {
    let entries = store.query().leaderboard(limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No profiles yet.");
        return Ok(());
    }

    println!("Leaderboard:\n");
    for entry in &entries {
        let medal = match entry.position {
            1 => "🥇",
            2 => "🥈",
            3 => "🥉",
            _ => "  ",
        };
        let you = if entry.user_id == user_id { " ← you" } else { "" };
        println!(
            "  {} #{:<3} {} [{}]  {} XP • {}{}",
            medal, entry.position, entry.username, entry.display_tag, entry.total_xp, entry.rank, you
        );
    }

    let position = store.query().rank_position(user_id)?;
    println!("\nYour position: #{}", position);
    Ok(())
}
