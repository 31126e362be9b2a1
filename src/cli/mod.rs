//! CLI argument definitions and parsing.

pub mod args;
pub mod types;

use args::{LiveArgs, MatchArgs};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use types::{Season, StatCategory};

#[derive(Debug, Parser)]
#[clap(
    name = "ipl-stats",
    version,
    about = "IPL team analytics, points tables and playoff prediction"
)]
pub struct IplStats {
    /// Data directory (or set `IPL_STATS_DATA_DIR`).
    #[clap(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Season year (or set `IPL_STATS_SEASON`; defaults to 2025).
    #[clap(long, short, global = true)]
    pub season: Option<Season>,

    /// Debug logging on stderr.
    #[clap(long, short, global = true)]
    pub verbose: bool,

    /// Output results, and failures, as JSON.
    #[clap(long, global = true)]
    pub json: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every team in the match data
    Teams,

    /// Aggregate statistics for one team, or every team when omitted
    Analyze {
        /// Team name, abbreviation or partial name.
        team: Option<String>,
    },

    /// Rank the current franchises and predict the four playoff qualifiers.
    ///
    /// Uses the cached points table for the season when one exists and falls
    /// back to historical performance otherwise.
    PredictPlayoffs {
        /// Use this points table CSV instead of the cached snapshot.
        #[clap(long)]
        points_table: Option<PathBuf>,
    },

    /// Cached per-season standings
    PointsTable {
        #[clap(subcommand)]
        cmd: PointsTableCmd,
    },

    /// Player leaderboards (Orange Cap, Purple Cap, ...)
    Stats {
        #[clap(subcommand)]
        cmd: StatsCmd,
    },

    /// Franchise squads
    Squads {
        #[clap(subcommand)]
        cmd: SquadsCmd,
    },

    /// List every venue in the match data
    Venues,

    /// Per-team results at one venue
    Venue {
        /// Venue name (case-insensitive).
        name: String,
    },

    /// Win probability for an upcoming fixture
    PredictMatch {
        #[clap(flatten)]
        args: MatchArgs,
    },

    /// Win probability for the chasing side during the second innings
    PredictLive {
        #[clap(flatten)]
        args: LiveArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum PointsTableCmd {
    /// Show the standings for the season
    Get {
        /// Fetch from the stats feed first, overwriting the cache.
        #[clap(long)]
        refresh: bool,
    },

    /// Seasons with a cached table, newest first
    Years,

    /// Every cached table
    All,

    /// Fetch the season's table from the stats feed and cache it
    Refresh,

    /// Store a points table CSV for the season and re-run the playoff prediction
    Upload {
        /// CSV with columns Team, Played, Won, Lost, NRR, Points.
        file: PathBuf,
    },

    /// Team abbreviations used in points tables
    Teams,
}

#[derive(Debug, Subcommand)]
pub enum StatsCmd {
    /// Show one leaderboard for the season
    Get {
        #[clap(value_enum)]
        category: StatCategory,

        /// Fetch from the stats feed first, overwriting the cache.
        #[clap(long)]
        refresh: bool,
    },

    /// Leaderboard categories and whether each is cached for the season
    Categories,
}

#[derive(Debug, Subcommand)]
pub enum SquadsCmd {
    /// Every franchise with its squad size
    List,

    /// Players of one franchise
    Show {
        /// Franchise id, e.g. `mi` or `csk`.
        id: String,

        /// Only players with this role (`All` for everyone).
        #[clap(long)]
        role: Option<String>,
    },

    /// Known player roles
    Roles,

    /// Rewrite squad files with canonical role names
    NormalizeRoles,
}
