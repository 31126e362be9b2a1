//! Per-team aggregate statistics.
//!
//! All rates are percentages rounded to two decimals. `matches` counts
//! decided games only; washed-out games are reported as `no_results`.

use crate::analysis::corpus::MatchCorpus;
use crate::analysis::teams::{normalize_team, resolve_team};
use crate::analysis::{percentage, round2};
use crate::cli::types::time::FIRST_SEASON;
use crate::error::{IplError, Result};
use crate::Season;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Minimum games at a venue before it can be a best/worst venue.
pub const MIN_VENUE_MATCHES: usize = 3;

/// Minimum games against an opponent before it can be a best/worst record.
pub const MIN_HEAD_TO_HEAD_MATCHES: usize = 5;

/// Season win rate (0-1) above which a team is counted as a likely
/// playoff side.
pub const PLAYOFF_ESTIMATE_THRESHOLD: f64 = 0.5;

/// Champions of completed seasons.
pub const CHAMPIONS: &[(u16, &str)] = &[
    (2008, "Rajasthan Royals"),
    (2009, "Deccan Chargers"),
    (2010, "Chennai Super Kings"),
    (2011, "Chennai Super Kings"),
    (2012, "Kolkata Knight Riders"),
    (2013, "Mumbai Indians"),
    (2014, "Kolkata Knight Riders"),
    (2015, "Mumbai Indians"),
    (2016, "Sunrisers Hyderabad"),
    (2017, "Mumbai Indians"),
    (2018, "Chennai Super Kings"),
    (2019, "Mumbai Indians"),
    (2020, "Mumbai Indians"),
    (2021, "Chennai Super Kings"),
    (2022, "Gujarat Titans"),
    (2023, "Chennai Super Kings"),
    (2024, "Kolkata Knight Riders"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonRecord {
    pub season: Season,
    pub matches: usize,
    pub wins: usize,
    pub win_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueRecord {
    pub venue: String,
    pub played: usize,
    pub won: usize,
    pub win_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadToHeadRecord {
    pub opponent: String,
    pub played: usize,
    pub won: usize,
    pub lost: usize,
    pub win_rate: f64,
}

/// Results in games where the team called the toss correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TossRecord {
    pub tosses_won: usize,
    pub wins_after_toss_win: usize,
    pub losses_after_toss_win: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonSummary {
    pub by_season: Vec<SeasonRecord>,
    pub best: Option<SeasonRecord>,
    pub worst: Option<SeasonRecord>,
    pub average_win_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueSummary {
    pub venues: Vec<VenueRecord>,
    pub best: Option<VenueRecord>,
    pub worst: Option<VenueRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadToHeadSummary {
    pub records: Vec<HeadToHeadRecord>,
    pub best: Option<HeadToHeadRecord>,
    pub worst: Option<HeadToHeadRecord>,
    pub most_played: Option<HeadToHeadRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStats {
    pub team: String,
    pub matches: usize,
    pub wins: usize,
    pub losses: usize,
    pub no_results: usize,
    pub win_rate: f64,
    pub titles: usize,
    pub title_seasons: Vec<Season>,
    /// Seasons with a win rate above 50%. A heuristic, not actual playoff
    /// qualification.
    pub playoff_appearances_estimate: usize,
    pub toss: Option<TossRecord>,
    pub seasons: SeasonSummary,
    pub venues: VenueSummary,
    pub head_to_head: HeadToHeadSummary,
}

/// Season -> champion, with names normalised and the current season filled
/// from the corpus when it is not in the static table.
pub fn champions(corpus: &MatchCorpus) -> BTreeMap<Season, String> {
    let mut table: BTreeMap<Season, String> = CHAMPIONS
        .iter()
        .map(|(year, team)| (Season::new(*year), normalize_team(team)))
        .collect();

    if !table.contains_key(&corpus.current_season) {
        if let Some(champion) = corpus.current_season_champion() {
            table.insert(corpus.current_season, champion);
        }
    }
    table
}

/// Analyse one team, resolving the name against the corpus team list.
pub fn analyze(corpus: &MatchCorpus, name: &str) -> Result<TeamStats> {
    let known = corpus.teams();
    let team = resolve_team(name, &known).ok_or_else(|| IplError::TeamNotFound {
        name: name.to_string(),
        available: known.clone(),
    })?;
    if team != normalize_team(name) {
        debug!(query = name, resolved = %team, "using closest team match");
    }
    Ok(team_stats(corpus, &team, &known, &champions(corpus)))
}

/// Analyse every team in the corpus in parallel.
pub fn analyze_all(corpus: &MatchCorpus) -> BTreeMap<String, TeamStats> {
    let known = corpus.teams();
    let champions = champions(corpus);
    known
        .par_iter()
        .map(|team| (team.clone(), team_stats(corpus, team, &known, &champions)))
        .collect()
}

fn team_stats(
    corpus: &MatchCorpus,
    team: &str,
    known: &[String],
    champions: &BTreeMap<Season, String>,
) -> TeamStats {
    let mut matches = 0;
    let mut wins = 0;
    let mut no_results = 0;

    let mut per_season: BTreeMap<Season, (usize, usize)> = BTreeMap::new();
    let mut per_venue: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    let mut per_opponent: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    let mut toss = TossRecord {
        tosses_won: 0,
        wins_after_toss_win: 0,
        losses_after_toss_win: 0,
    };

    for m in corpus.matches_for(team) {
        if m.toss_winner.as_deref() == Some(team) {
            toss.tosses_won += 1;
            if m.is_decided() {
                if m.won_by(team) {
                    toss.wins_after_toss_win += 1;
                } else {
                    toss.losses_after_toss_win += 1;
                }
            }
        }

        if !m.is_decided() {
            no_results += 1;
            continue;
        }

        let won = usize::from(m.won_by(team));
        matches += 1;
        wins += won;

        let entry = per_season.entry(m.season).or_default();
        entry.0 += 1;
        entry.1 += won;

        if let Some(venue) = m.venue.as_deref() {
            let entry = per_venue.entry(venue).or_default();
            entry.0 += 1;
            entry.1 += won;
        }

        if let Some(opponent) = m.opponent_of(team) {
            if opponent != team && known.iter().any(|k| k == opponent) {
                let entry = per_opponent.entry(opponent).or_default();
                entry.0 += 1;
                entry.1 += won;
            }
        }
    }

    let by_season: Vec<SeasonRecord> = per_season
        .into_iter()
        .map(|(season, (played, won))| SeasonRecord {
            season,
            matches: played,
            wins: won,
            win_rate: round2(percentage(won, played)),
        })
        .collect();

    let playoff_appearances_estimate = by_season
        .iter()
        .filter(|s| s.season.as_u16() >= FIRST_SEASON && s.season <= corpus.current_season)
        .filter(|s| s.wins as f64 / s.matches as f64 > PLAYOFF_ESTIMATE_THRESHOLD)
        .count();

    let average_win_rate = if by_season.is_empty() {
        0.0
    } else {
        round2(by_season.iter().map(|s| s.win_rate).sum::<f64>() / by_season.len() as f64)
    };

    let venues: Vec<VenueRecord> = per_venue
        .into_iter()
        .map(|(venue, (played, won))| VenueRecord {
            venue: venue.to_string(),
            played,
            won,
            win_rate: round2(percentage(won, played)),
        })
        .collect();

    let records: Vec<HeadToHeadRecord> = per_opponent
        .into_iter()
        .map(|(opponent, (played, won))| HeadToHeadRecord {
            opponent: opponent.to_string(),
            played,
            won,
            lost: played - won,
            win_rate: round2(percentage(won, played)),
        })
        .collect();

    let title_seasons: Vec<Season> = champions
        .iter()
        .filter(|(_, champion)| champion.as_str() == team)
        .map(|(season, _)| *season)
        .collect();

    let (best_season, worst_season) = (
        first_max(&by_season, |s| s.win_rate).cloned(),
        first_min(&by_season, |s| s.win_rate).cloned(),
    );

    let frequent_venues: Vec<&VenueRecord> =
        venues.iter().filter(|v| v.played >= MIN_VENUE_MATCHES).collect();
    let (best_venue, worst_venue) = (
        first_max(frequent_venues.iter().copied(), |v| v.win_rate).cloned(),
        first_min(frequent_venues.iter().copied(), |v| v.win_rate).cloned(),
    );

    let frequent_opponents: Vec<&HeadToHeadRecord> = records
        .iter()
        .filter(|r| r.played >= MIN_HEAD_TO_HEAD_MATCHES)
        .collect();
    let (best_opponent, worst_opponent) = (
        first_max(frequent_opponents.iter().copied(), |r| r.win_rate).cloned(),
        first_min(frequent_opponents.iter().copied(), |r| r.win_rate).cloned(),
    );
    let most_played = first_max(&records, |r| r.played as f64).cloned();

    TeamStats {
        team: team.to_string(),
        matches,
        wins,
        losses: matches - wins,
        no_results,
        win_rate: round2(percentage(wins, matches)),
        titles: title_seasons.len(),
        title_seasons,
        playoff_appearances_estimate,
        toss: corpus.has_toss_data().then_some(toss),
        seasons: SeasonSummary {
            by_season,
            best: best_season,
            worst: worst_season,
            average_win_rate,
        },
        venues: VenueSummary {
            venues,
            best: best_venue,
            worst: worst_venue,
        },
        head_to_head: HeadToHeadSummary {
            records,
            best: best_opponent,
            worst: worst_opponent,
            most_played,
        },
    }
}

/// First element with the largest key, in iteration order.
fn first_max<'a, T, I, F>(items: I, key: F) -> Option<&'a T>
where
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> f64,
{
    let mut best: Option<(&T, f64)> = None;
    for item in items {
        let k = key(item);
        if best.map_or(true, |(_, b)| k > b) {
            best = Some((item, k));
        }
    }
    best.map(|(item, _)| item)
}

/// First element with the smallest key, in iteration order.
fn first_min<'a, T, I, F>(items: I, key: F) -> Option<&'a T>
where
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> f64,
{
    first_max(items, |item| -key(item))
}

#[cfg(test)]
mod tests;
