//! Statistical analyses over the match corpus.
//!
//! - `teams`: franchise name normalisation and lookup
//! - `corpus`: the unified match table
//! - `team_stats`: per-team aggregate records
//! - `playoffs`: strength scoring and playoff ranking
//! - `venues`: grounds and per-team records at a ground
//! - `match_prediction`, `live`, `model`: classifier-backed predictors

pub mod corpus;
pub mod live;
pub mod match_prediction;
pub mod model;
pub mod playoffs;
pub mod team_stats;
pub mod teams;
pub mod venues;

pub use corpus::{MatchCorpus, MatchRecord};
pub use team_stats::{analyze, analyze_all, TeamStats};
pub use teams::{normalize_team, resolve_team, CURRENT_FRANCHISES};

/// Round to two decimal places for reporting.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / whole` as a 0-100 percentage; 0 when `whole` is 0.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_handles_zero_denominator() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(3, 0), 0.0);
        assert_eq!(round2(percentage(2, 3)), 66.67);
    }
}
