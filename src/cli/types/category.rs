//! Player statistic categories published for a season.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the game a category belongs to; also the cache sub-folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatGroup {
    Batting,
    Bowling,
}

impl fmt::Display for StatGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatGroup::Batting => write!(f, "batting"),
            StatGroup::Bowling => write!(f, "bowling"),
        }
    }
}

/// Leaderboard categories cached from the stats feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StatCategory {
    /// Most runs in the season
    OrangeCap,
    /// Most hundreds in the season
    MostCenturies,
    /// Best batting average
    BestBattingAverage,
    /// Most wickets in the season
    PurpleCap,
    /// Best bowling figures in an innings
    BestBowlingFigures,
    /// Most dot balls bowled
    GreenDotBalls,
}

impl StatCategory {
    pub const ALL: [StatCategory; 6] = [
        StatCategory::OrangeCap,
        StatCategory::MostCenturies,
        StatCategory::BestBattingAverage,
        StatCategory::PurpleCap,
        StatCategory::BestBowlingFigures,
        StatCategory::GreenDotBalls,
    ];

    pub fn group(&self) -> StatGroup {
        match self {
            StatCategory::OrangeCap
            | StatCategory::MostCenturies
            | StatCategory::BestBattingAverage => StatGroup::Batting,
            StatCategory::PurpleCap
            | StatCategory::BestBowlingFigures
            | StatCategory::GreenDotBalls => StatGroup::Bowling,
        }
    }

    /// Cache file name inside the group folder.
    pub fn file_name(&self) -> &'static str {
        match self {
            StatCategory::OrangeCap => "orange_cap.csv",
            StatCategory::MostCenturies => "most_centuries.csv",
            StatCategory::BestBattingAverage => "best_batting_average.csv",
            StatCategory::PurpleCap => "purple_cap.csv",
            StatCategory::BestBowlingFigures => "best_bowling_figures.csv",
            StatCategory::GreenDotBalls => "tata_ipl_green_dot_balls.csv",
        }
    }

    /// Identifier substituted for `{resource}` in the feed URL template.
    pub fn slug(&self) -> &'static str {
        match self {
            StatCategory::OrangeCap => "orange-cap",
            StatCategory::MostCenturies => "most-centuries",
            StatCategory::BestBattingAverage => "best-batting-average",
            StatCategory::PurpleCap => "purple-cap",
            StatCategory::BestBowlingFigures => "best-bowling-figures",
            StatCategory::GreenDotBalls => "green-dot-balls",
        }
    }
}

impl fmt::Display for StatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatCategory::OrangeCap => "Orange Cap",
            StatCategory::MostCenturies => "Most Centuries",
            StatCategory::BestBattingAverage => "Best Batting Average",
            StatCategory::PurpleCap => "Purple Cap",
            StatCategory::BestBowlingFigures => "Best Bowling Figures",
            StatCategory::GreenDotBalls => "Green Dot Balls",
        };
        write!(f, "{}", s)
    }
}
