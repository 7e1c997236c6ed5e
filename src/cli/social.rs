//! Friends and duel commands implementation

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;

use chamcode::store::{DuelStatus, ProfileStore, StoreError};

use super::print_events;

#[derive(Subcommand)]
pub enum FriendsAction {
    /// List your friends
    List,
    /// Send a friend request
    Add {
        /// Recipient's username
        username: String,
    },
    /// Show pending friend requests addressed to you
    Requests,
    /// Accept a pending friend request
    Accept {
        /// Request ID (from `chamcode friends requests`)
        request_id: String,
    },
    /// Decline a pending friend request
    Decline {
        /// Request ID (from `chamcode friends requests`)
        request_id: String,
    },
}

/// Resolve a username to a profile ID
fn lookup_user(store: &ProfileStore, username: &str) -> Result<String> {
    let profile = store
        .query()
        .profile_by_username(username)?
        .ok_or_else(|| StoreError::ProfileNotFound(username.to_string()))?;
    Ok(profile.id)
}

pub fn friends_command(store: &ProfileStore, user_id: &str, action: FriendsAction) -> Result<()> {
    let now = Utc::now();
    match action {
        FriendsAction::List => {
            let friends = store.query().friends_of(user_id)?;
            if friends.is_empty() {
                println!("No friends yet. Send a request with `chamcode friends add <username>`.");
                return Ok(());
            }
            println!("Friends ({}):\n", friends.len());
            for friend in friends {
                println!(
                    "  {} [{}] - {} XP",
                    friend.username, friend.display_tag, friend.total_xp
                );
            }
        }
        FriendsAction::Add { username } => {
            let recipient = lookup_user(store, &username)?;
            store.recorder().send_friend_request(user_id, &recipient, now)?;
            println!("Friend request sent to {}.", username);
        }
        FriendsAction::Requests => {
            let requests = store.query().pending_requests(user_id)?;
            if requests.is_empty() {
                println!("No pending requests.");
                return Ok(());
            }
            println!("Pending requests ({}):\n", requests.len());
            for request in requests {
                let requester = store
                    .query()
                    .profile(&request.requester_id)?
                    .map(|p| p.username)
                    .unwrap_or_else(|| request.requester_id.clone());
                println!("  {} from {}", request.id, requester);
            }
        }
        FriendsAction::Accept { request_id } => {
            store.recorder().respond_to_request(&request_id, true, now)?;
            println!("Friend request accepted.");
        }
        FriendsAction::Decline { request_id } => {
            store.recorder().respond_to_request(&request_id, false, now)?;
            println!("Friend request declined.");
        }
    }
    Ok(())
}

/// Challenge an opponent and resolve the duel immediately
pub fn duel_command(store: &ProfileStore, user_id: &str, opponent: &str) -> Result<()> {
    let now = Utc::now();
    let opponent_id = lookup_user(store, opponent)?;

    let duel = store.recorder().create_duel(user_id, &opponent_id, now)?;
    let resolution = store.recorder().resolve_duel(&duel.id, now)?;

    println!("⚔️  Duel vs {}!", opponent);
    println!("{}", resolution.outcome.message);
    print_events(&resolution.events);
    Ok(())
}

/// Show the active profile's duel history, newest first
pub fn history_command(store: &ProfileStore, user_id: &str) -> Result<()> {
    let duels = store.query().duel_history(user_id)?;
    if duels.is_empty() {
        println!("No duels yet. Start one with `chamcode duel <username>`.");
        return Ok(());
    }

    println!("Duels ({}):\n", duels.len());
    for duel in duels {
        let name = |id: &str| -> Result<String> {
            Ok(store
                .query()
                .profile(id)?
                .map(|p| p.username)
                .unwrap_or_else(|| id.to_string()))
        };
        let challenger = name(&duel.challenger_id)?;
        let opponent = name(&duel.opponent_id)?;

        match duel.status {
            DuelStatus::Completed => {
                let won = duel.winner_id.as_deref() == Some(user_id);
                let marker = if won { "🏆 won " } else { "💔 lost" };
                println!(
                    "  {} {} vs {} (+{} XP)",
                    marker, challenger, opponent, duel.xp_reward
                );
            }
            DuelStatus::Pending => {
                println!("  ⏳ pending {} vs {}", challenger, opponent);
            }
        }
    }
    Ok(())
}
