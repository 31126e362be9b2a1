//! Grounds and per-team records at a ground.

use crate::analysis::corpus::MatchCorpus;
use crate::analysis::{percentage, round2};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueTeamRecord {
    pub played: usize,
    pub wins: usize,
    pub win_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueReport {
    /// Venue name as spelled in the corpus; the query when nothing matched.
    pub venue: String,
    pub matches: usize,
    pub team_stats: BTreeMap<String, VenueTeamRecord>,
}

/// Every venue in the corpus, sorted.
pub fn venues(corpus: &MatchCorpus) -> Vec<String> {
    corpus
        .matches
        .iter()
        .filter_map(|m| m.venue.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Decided results at `venue` (case-insensitive), per team.
pub fn venue_stats(corpus: &MatchCorpus, venue: &str) -> VenueReport {
    let wanted = venue.trim();
    let mut name = None;
    let mut matches = 0;
    let mut per_team: BTreeMap<&str, (usize, usize)> = BTreeMap::new();

    for m in &corpus.matches {
        let Some(v) = m.venue.as_deref() else { continue };
        if !v.eq_ignore_ascii_case(wanted) || !m.is_decided() {
            continue;
        }
        name.get_or_insert(v);
        matches += 1;
        for team in [m.team1.as_str(), m.team2.as_str()] {
            let entry = per_team.entry(team).or_default();
            entry.0 += 1;
            entry.1 += usize::from(m.won_by(team));
        }
    }

    VenueReport {
        venue: name.unwrap_or(wanted).to_string(),
        matches,
        team_stats: per_team
            .into_iter()
            .map(|(team, (played, wins))| {
                (
                    team.to_string(),
                    VenueTeamRecord {
                        played,
                        wins,
                        win_rate: round2(percentage(wins, played)),
                    },
                )
            })
            .collect(),
    }
}
