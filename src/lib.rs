//! IPL Statistics Library
//!
//! Team analytics and playoff prediction over cached Indian Premier League
//! data: historical match results, per-season points tables, player
//! leaderboards and franchise squads, all stored as CSV under one data
//! directory.
//!
//! ## Features
//!
//! - **Match Corpus**: Historical and current-season results merged into one table with consistent team names
//! - **Team Analysis**: Win rates, titles, season, venue and head-to-head records
//! - **Playoff Prediction**: Strength scoring from recent form, batting balance and experience, blended with live standings when a points table is cached
//! - **Points Tables**: Per-season snapshot cache with upload and feed refresh
//! - **Match Prediction**: Pre-match and second-innings win probabilities from a logistic model
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ipl_stats::{analysis::analyze, commands::common::DataContext, config::AppConfig};
//!
//! # fn example() -> ipl_stats::Result<()> {
//! let ctx = DataContext::load(AppConfig::from_env()?)?;
//! let stats = analyze(&ctx.corpus, "CSK")?;
//! println!("{} won {} titles", stats.team, stats.titles);
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export IPL_STATS_DATA_DIR=~/ipl-data
//! export IPL_STATS_SEASON=2025
//! export IPL_STATS_FEED_URL='https://example.org/ipl/{season}/{resource}'
//! ```

pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod feeds;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{Season, StatCategory, StatGroup, TossDecision};
pub use error::{ErrorKind, IplError, Result};

pub const DATA_DIR_ENV_VAR: &str = "IPL_STATS_DATA_DIR";
pub const SEASON_ENV_VAR: &str = "IPL_STATS_SEASON";
pub const FEED_URL_ENV_VAR: &str = "IPL_STATS_FEED_URL";
pub const ADJUSTMENTS_ENV_VAR: &str = "IPL_STATS_ADJUSTMENTS";
