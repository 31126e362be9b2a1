//! Argument groups for the prediction commands.

use super::types::TossDecision;
use crate::analysis::live::LiveSituation;
use crate::analysis::match_prediction::MatchSetup;
use clap::Args;

/// Fixture details for a pre-match prediction.
#[derive(Debug, Args)]
pub struct MatchArgs {
    /// First team (full name or abbreviation).
    #[clap(long)]
    pub team1: String,

    /// Second team (full name or abbreviation).
    #[clap(long)]
    pub team2: String,

    /// Venue as it appears in the match data.
    #[clap(long)]
    pub venue: String,

    /// Team that won the toss; must be one of the two sides.
    #[clap(long)]
    pub toss_winner: String,

    /// What the toss winner chose: `bat` or `field`.
    #[clap(long)]
    pub toss_decision: TossDecision,
}

impl From<MatchArgs> for MatchSetup {
    fn from(args: MatchArgs) -> Self {
        MatchSetup {
            team1: args.team1,
            team2: args.team2,
            venue: args.venue,
            toss_winner: args.toss_winner,
            toss_decision: args.toss_decision,
        }
    }
}

/// State of a second-innings chase.
#[derive(Debug, Args)]
pub struct LiveArgs {
    #[clap(long)]
    pub batting_team: String,

    #[clap(long)]
    pub bowling_team: String,

    /// Venue, ideally `"Ground, City"`.
    #[clap(long)]
    pub venue: String,

    /// Runs needed to win.
    #[clap(long)]
    pub target: u32,

    /// Runs scored so far.
    #[clap(long)]
    pub score: u32,

    /// Legal balls bowled so far (0-120).
    #[clap(long)]
    pub balls: u32,

    /// Wickets fallen (0-10).
    #[clap(long)]
    pub wickets: u32,
}

impl From<LiveArgs> for LiveSituation {
    fn from(args: LiveArgs) -> Self {
        LiveSituation {
            batting_team: args.batting_team,
            bowling_team: args.bowling_team,
            venue: args.venue,
            target: args.target,
            current_score: args.score,
            balls_played: args.balls,
            wickets_fallen: args.wickets,
        }
    }
}
