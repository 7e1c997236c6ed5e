use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use chamcode::config::Config;
use chamcode::store::ProfileStore;

mod cli;

#[derive(Parser)]
#[command(name = "chamcode")]
#[command(about = "ChamCode - gamified coding lessons with XP ranks, streaks and duels")]
#[command(version)]
struct Cli {
    /// Path to the profile database (defaults to ~/.chamcode/chamcode.db)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a profile and make it the active one
    Init {
        /// Username for the new profile
        username: String,

        /// Three-letter display tag shown next to the username
        #[arg(long, default_value = "WLU")]
        tag: String,

        /// Also seed a set of demo rivals for the leaderboard
        #[arg(long)]
        seed: bool,
    },

    /// Show the active profile's rank, streak, badges and XP progress
    Dashboard {
        /// Emit the derived state as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the lesson catalog with completion status
    Lessons,

    /// Complete a lesson and collect its XP
    Complete {
        /// Lesson ID (e.g. lesson-1)
        lesson_id: String,

        /// Score achieved, 0-100
        #[arg(long, default_value_t = 100)]
        score: u32,
    },

    /// Show the leaderboard
    Leaderboard {
        /// Number of entries to show
        #[arg(long, default_value_t = 10)]
        limit: u32,

        /// Emit the entries as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Manage friends and friend requests
    Friends {
        #[command(subcommand)]
        action: cli::social::FriendsAction,
    },

    /// Challenge another user to a duel
    Duel {
        /// Opponent's username
        opponent: String,
    },

    /// Show duel history
    History,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let db_path = cli
        .data_dir
        .map(|dir| dir.join("chamcode.db"))
        .unwrap_or_else(Config::default_db_path);
    let store = ProfileStore::with_path(&db_path)?;
    let config = Config::load()?;

    match cli.command {
        Commands::Init { username, tag, seed } => {
            cli::init::init_command(&store, &username, &tag, seed)?;
        }
        Commands::Dashboard { json } => {
            cli::dashboard::dashboard_command(&store, &active_profile(&config)?, json)?;
        }
        Commands::Lessons => {
            cli::lessons::lessons_command(&store, &active_profile(&config)?)?;
        }
        Commands::Complete { lesson_id, score } => {
            cli::lessons::complete_command(&store, &active_profile(&config)?, &lesson_id, score)?;
        }
        Commands::Leaderboard { limit, json } => {
            cli::leaderboard::leaderboard_command(&store, &active_profile(&config)?, limit, json)?;
        }
        Commands::Friends { action } => {
            cli::social::friends_command(&store, &active_profile(&config)?, action)?;
        }
        Commands::Duel { opponent } => {
            cli::social::duel_command(&store, &active_profile(&config)?, &opponent)?;
        }
        Commands::History => {
            cli::social::history_command(&store, &active_profile(&config)?)?;
        }
    }

    Ok(())
}

/// Resolve the active profile ID or explain how to create one
fn active_profile(config: &Config) -> Result<String> {
    match &config.active_profile {
        Some(id) => Ok(id.clone()),
        None => bail!("No active profile. Run `chamcode init <username>` first."),
    }
}
