//! ChamCode - gamified coding lessons
//!
//! The core of a gamified lessons app: completing lessons and duels earns
//! XP, XP maps onto a Bronze/Silver/Gold rank ladder, daily activity
//! builds a streak, and thresholds unlock badges. Every screen derives
//! its display state through the pure [`progression`] engine so rank,
//! streak, badge, and color rules cannot drift between features.
//!
//! Modules:
//!
//! - [`progression`] - pure derivation of rank, streak, badges, tier
//!   color, and XP progress from persisted counters
//! - [`catalog`] - the static lesson set
//! - [`duel`] - randomized duel outcome table
//! - [`store`] - SQLite persistence for profiles, completions,
//!   friendships, and duels
//! - [`config`] - CLI configuration under `~/.chamcode`

pub mod catalog;
pub mod config;
pub mod duel;
pub mod progression;
pub mod store;

pub use progression::{evaluate, GamificationState, ProfileSnapshot, Rank};
