//! Unified match corpus built from the historical and current-season tables.

use crate::analysis::teams::{is_no_result, normalize_optional, normalize_team};
use crate::cli::types::time::FIRST_SEASON;
use crate::error::{IplError, Result};
use crate::storage::matches::{cell, RawTable};
use crate::{Season, TossDecision};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Matches per season used when only a sequential id is available.
pub const MATCHES_PER_ID_BUCKET: u32 = 60;

/// Status value that marks a finished fixture in the current-season table.
pub const COMPLETED_STATUS: &str = "Completed";

/// One played fixture with every team name in canonical form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub team1: String,
    pub team2: String,
    /// `None` for washed-out or abandoned games.
    pub winner: Option<String>,
    pub venue: Option<String>,
    pub season: Season,
    pub toss_winner: Option<String>,
    pub toss_decision: Option<TossDecision>,
}

impl MatchRecord {
    pub fn involves(&self, team: &str) -> bool {
        self.team1 == team || self.team2 == team
    }

    pub fn opponent_of(&self, team: &str) -> Option<&str> {
        if self.team1 == team {
            Some(&self.team2)
        } else if self.team2 == team {
            Some(&self.team1)
        } else {
            None
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    pub fn won_by(&self, team: &str) -> bool {
        self.winner.as_deref() == Some(team)
    }

    /// Whether `team` batted first, derived from the toss.
    ///
    /// The toss winner bats first if they chose to bat; otherwise the other
    /// side does. `None` when the toss is unknown or `team` did not play.
    pub fn batted_first(&self, team: &str) -> Option<bool> {
        if !self.involves(team) {
            return None;
        }
        let toss_winner = self.toss_winner.as_deref()?;
        let decision = self.toss_decision?;
        let won_toss = toss_winner == team;
        Some(match decision {
            TossDecision::Bat => won_toss,
            TossDecision::Field => !won_toss,
        })
    }
}

/// Every played match available for analysis.
#[derive(Debug, Clone, Default)]
pub struct MatchCorpus {
    pub matches: Vec<MatchRecord>,
    pub current_season: Season,
    /// Decided winners from the current-season table, in table order.
    pub current_season_winners: Vec<String>,
}

impl MatchCorpus {
    /// Build the corpus from the historical table and, when present, the
    /// current-season table.
    pub fn build(
        historical: &RawTable,
        current: Option<&RawTable>,
        current_season: Season,
    ) -> Result<Self> {
        let mut matches = historical_records(historical, current_season)?;
        let historical_count = matches.len();

        let mut current_season_winners = Vec::new();
        if let Some(current) = current {
            let records = current_records(current, current_season)?;
            current_season_winners = records.iter().filter_map(|m| m.winner.clone()).collect();
            matches.extend(records);
        }

        info!(
            historical = historical_count,
            current = matches.len() - historical_count,
            season = %current_season,
            "built match corpus"
        );

        Ok(Self {
            matches,
            current_season,
            current_season_winners,
        })
    }

    /// Construct directly from records, mainly for tests and callers that
    /// already hold normalised data.
    pub fn from_records(matches: Vec<MatchRecord>, current_season: Season) -> Self {
        let current_season_winners = matches
            .iter()
            .filter(|m| m.season == current_season)
            .filter_map(|m| m.winner.clone())
            .collect();
        Self {
            matches,
            current_season,
            current_season_winners,
        }
    }

    /// Sorted distinct team names from both sides of every match.
    pub fn teams(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .matches
            .iter()
            .flat_map(|m| [m.team1.as_str(), m.team2.as_str()])
            .filter(|t| !is_no_result(t))
            .collect();
        set.into_iter().map(str::to_string).collect()
    }

    pub fn has_toss_data(&self) -> bool {
        self.matches.iter().any(|m| m.toss_winner.is_some())
    }

    pub fn matches_for<'a>(&'a self, team: &'a str) -> impl Iterator<Item = &'a MatchRecord> + 'a {
        self.matches.iter().filter(move |m| m.involves(team))
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Most frequent winner of the current season, ties to the smallest name.
    pub fn current_season_champion(&self) -> Option<String> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for winner in &self.current_season_winners {
            *counts.entry(winner.as_str()).or_default() += 1;
        }
        // max_by_key keeps the last maximum; iterate in reverse so the
        // lexically smallest name wins ties.
        counts
            .into_iter()
            .rev()
            .max_by_key(|(_, count)| *count)
            .map(|(team, _)| team.to_string())
    }
}

/// Season for a sequential match id, 60 ids per season from 2008.
pub fn season_from_id(id: u32) -> Season {
    let bucket = id.saturating_sub(1) / MATCHES_PER_ID_BUCKET;
    let year = u32::from(FIRST_SEASON) + bucket;
    Season::new(u16::try_from(year).unwrap_or(u16::MAX))
}

/// Year of a date cell in `YYYY-MM-DD`, `DD/MM/YYYY` or `DD-MM-YYYY` form.
/// A trailing time component, space or `T` separated, is ignored.
pub fn year_from_date(raw: &str) -> Option<u16> {
    let date = raw.split_whitespace().next()?.split('T').next()?;
    let parts: Vec<&str> = date.split(['-', '/']).collect();
    if parts.len() != 3 || !parts.iter().all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }
    let year = if parts[0].len() == 4 {
        parts[0]
    } else if parts[2].len() == 4 {
        parts[2]
    } else {
        return None;
    };
    year.parse().ok()
}

/// A plain four-digit season label. Split labels such as `2007/08` are
/// ambiguous and rejected.
pub fn year_from_season_label(raw: &str) -> Option<u16> {
    let raw = raw.trim();
    if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        raw.parse().ok()
    } else {
        None
    }
}

struct SeasonColumns {
    date: Option<usize>,
    season: Option<usize>,
    id: Option<usize>,
}

impl SeasonColumns {
    fn detect(table: &RawTable) -> Result<Self> {
        let cols = Self {
            date: table.column("date"),
            season: table.column("season"),
            id: table.column("id"),
        };
        if cols.date.is_none() && cols.season.is_none() && cols.id.is_none() {
            return Err(IplError::SeasonInference {
                table: table.name.clone(),
                reason: "no date, season or id column".to_string(),
            });
        }
        Ok(cols)
    }

    fn season_for(&self, row: &[String]) -> Option<Season> {
        let from_date = self.date.and_then(|i| year_from_date(cell(row, i)));
        let from_label = || self.season.and_then(|i| year_from_season_label(cell(row, i)));
        let from_id = || {
            self.id
                .and_then(|i| cell(row, i).trim().parse::<u32>().ok())
                .filter(|id| *id > 0)
                .map(season_from_id)
                .map(|s| s.as_u16())
        };
        from_date.or_else(from_label).or_else(from_id).map(Season::new)
    }
}

fn historical_records(table: &RawTable, current_season: Season) -> Result<Vec<MatchRecord>> {
    let team1 = table.require("team1")?;
    let team2 = table.require("team2")?;
    let winner = table.require("winner")?;
    let venue = table.require("venue")?;
    let toss_winner = table.column("toss_winner");
    let toss_decision = table.column("toss_decision");
    let seasons = SeasonColumns::detect(table)?;

    let mut out = Vec::with_capacity(table.rows.len());
    for (idx, row) in table.rows.iter().enumerate() {
        let line = idx + 2;
        let season = seasons.season_for(row).ok_or_else(|| {
            IplError::validation(&table.name, format!("row {}: season cannot be inferred", line))
        })?;
        if season.as_u16() < FIRST_SEASON || season > current_season {
            return Err(IplError::validation(
                &table.name,
                format!(
                    "row {}: season {} outside {}..={}",
                    line, season, FIRST_SEASON, current_season
                ),
            ));
        }

        out.push(make_record(
            &table.name,
            line,
            RowCells {
                team1: cell(row, team1),
                team2: cell(row, team2),
                winner: cell(row, winner),
                venue: cell(row, venue),
                toss_winner: toss_winner.map(|i| cell(row, i)),
                toss_decision: toss_decision.map(|i| cell(row, i)),
            },
            season,
        )?);
    }

    debug!(table = %table.name, rows = out.len(), "parsed historical matches");
    Ok(out)
}

fn current_records(table: &RawTable, current_season: Season) -> Result<Vec<MatchRecord>> {
    let team1 = table.require("Team1")?;
    let team2 = table.require("Team2")?;
    let winner = table.require("Winner")?;
    let venue = table.require("Venue")?;
    let status = table.require("Status")?;
    let toss_winner = table.column("TossWinner");
    let toss_decision = table.column("TossDecision");

    let mut out = Vec::new();
    for (idx, row) in table.rows.iter().enumerate() {
        if cell(row, status).trim() != COMPLETED_STATUS {
            continue;
        }
        out.push(make_record(
            &table.name,
            idx + 2,
            RowCells {
                team1: cell(row, team1),
                team2: cell(row, team2),
                winner: cell(row, winner),
                venue: cell(row, venue),
                toss_winner: toss_winner.map(|i| cell(row, i)),
                toss_decision: toss_decision.map(|i| cell(row, i)),
            },
            current_season,
        )?);
    }

    debug!(
        table = %table.name,
        completed = out.len(),
        total = table.rows.len(),
        "parsed current-season matches"
    );
    Ok(out)
}

struct RowCells<'a> {
    team1: &'a str,
    team2: &'a str,
    winner: &'a str,
    venue: &'a str,
    toss_winner: Option<&'a str>,
    toss_decision: Option<&'a str>,
}

fn make_record(table: &str, line: usize, cells: RowCells<'_>, season: Season) -> Result<MatchRecord> {
    let team1 = normalize_team(cells.team1);
    let team2 = normalize_team(cells.team2);
    if team1.is_empty() || team2.is_empty() {
        return Err(IplError::validation(
            table,
            format!("row {}: team name is blank", line),
        ));
    }

    let winner = if is_no_result(cells.winner) {
        None
    } else {
        let w = normalize_team(cells.winner);
        if w != team1 && w != team2 {
            return Err(IplError::validation(
                table,
                format!(
                    "row {}: winner '{}' is neither '{}' nor '{}'",
                    line, w, team1, team2
                ),
            ));
        }
        Some(w)
    };

    let venue = Some(cells.venue.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    Ok(MatchRecord {
        team1,
        team2,
        winner,
        venue,
        season,
        toss_winner: normalize_optional(cells.toss_winner),
        toss_decision: cells.toss_decision.and_then(TossDecision::parse_cell),
    })
}
