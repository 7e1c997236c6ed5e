//! Init command implementation

use anyhow::Result;
use chrono::Utc;

use chamcode::config::Config;
use chamcode::store::ProfileStore;

/// Create a profile, optionally seed demo rivals, and make it active
pub fn init_command(store: &ProfileStore, username: &str, tag: &str, seed: bool) -> Result<()> {
    let now = Utc::now();
    let profile = store.recorder().create_profile(username, tag, now)?;

    if seed {
        let created = store.recorder().seed_demo_rivals(now)?;
        if created > 0 {
            println!("Seeded {} demo rivals.", created);
        }
    }

    let mut config = Config::load()?;
    config.active_profile = Some(profile.id.clone());
    config.save()?;

    println!(
        "Welcome to ChamCode, {} [{}]! Run `chamcode lessons` to start earning XP.",
        profile.username, profile.display_tag
    );
    Ok(())
}
