//! Per-season points table snapshots.
//!
//! One CSV per season, `IPL_Points_Table_{season}.csv`, replaced wholesale
//! on every write. Writes go to a sibling temp file that is renamed into
//! place, so a reader sees either the old table or the new one.

use crate::analysis::teams::normalize_team;
use crate::core::replace_csv;
use crate::error::{IplError, Result};
use crate::Season;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Header row of a points table file.
pub const POINTS_TABLE_HEADERS: [&str; 6] = ["Team", "Played", "Won", "Lost", "NRR", "Points"];

/// One team's line in the standings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsRow {
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Played")]
    pub played: u32,
    #[serde(rename = "Won")]
    pub won: u32,
    #[serde(rename = "Lost")]
    pub lost: u32,
    #[serde(rename = "NRR", deserialize_with = "de_nrr")]
    pub nrr: f64,
    #[serde(rename = "Points")]
    pub points: u32,
}

impl PointsRow {
    pub fn new(team: &str, played: u32, won: u32, lost: u32, nrr: f64, points: u32) -> Self {
        Self {
            team: normalize_team(team),
            played,
            won,
            lost,
            nrr,
            points,
        }
    }
}

/// NRR cells are published as `+0.123`, `-1.2` or blank.
fn de_nrr<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_nrr(&raw).map_err(serde::de::Error::custom)
}

pub fn parse_nrr(raw: &str) -> std::result::Result<f64, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return Ok(0.0);
    }
    trimmed
        .trim_start_matches('+')
        .parse::<f64>()
        .map_err(|_| format!("invalid NRR '{}'", trimmed))
}

/// Parse and validate points rows from CSV text.
pub fn parse_points_csv<R: Read>(source_name: &str, reader: R) -> Result<Vec<PointsRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for required in POINTS_TABLE_HEADERS {
        if !headers.iter().any(|h| h == required) {
            return Err(IplError::MissingColumn {
                table: source_name.to_string(),
                column: required.to_string(),
            });
        }
    }

    let mut rows: Vec<PointsRow> = Vec::new();
    for (idx, record) in rdr.deserialize::<PointsRow>().enumerate() {
        let mut row = record.map_err(|e| {
            IplError::validation(source_name, format!("row {}: {}", idx + 2, e))
        })?;
        row.team = normalize_team(&row.team);
        if row.team.is_empty() {
            return Err(IplError::validation(
                source_name,
                format!("row {}: team name is blank", idx + 2),
            ));
        }
        if rows.iter().any(|seen| seen.team == row.team) {
            return Err(IplError::validation(
                source_name,
                format!("row {}: {} appears more than once", idx + 2, row.team),
            ));
        }
        if row.won.checked_add(row.lost).map_or(true, |decided| decided > row.played) {
            return Err(IplError::validation(
                source_name,
                format!(
                    "row {}: {} won {} and lost {} of {} played",
                    idx + 2,
                    row.team,
                    row.won,
                    row.lost,
                    row.played
                ),
            ));
        }
        rows.push(row);
    }
    Ok(rows)
}

/// File-backed store of points table snapshots.
#[derive(Debug, Clone)]
pub struct PointsTableStore {
    dir: PathBuf,
}

impl PointsTableStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, season: Season) -> PathBuf {
        self.dir.join(format!("IPL_Points_Table_{}.csv", season))
    }

    /// Snapshot for `season`, or `None` when nothing has been cached.
    pub fn get(&self, season: Season) -> Result<Option<Vec<PointsRow>>> {
        let path = self.path_for(season);
        if !path.exists() {
            debug!(season = %season, "no cached points table");
            return Ok(None);
        }
        let file = fs::File::open(&path)?;
        let rows = parse_points_csv(&path.display().to_string(), file)?;
        Ok(Some(rows))
    }

    /// Replace the snapshot for `season`.
    pub fn put(&self, season: Season, rows: &[PointsRow]) -> Result<PathBuf> {
        let path = self.path_for(season);
        replace_csv(&path, |wtr| {
            for row in rows {
                wtr.serialize(row)?;
            }
            if rows.is_empty() {
                wtr.write_record(POINTS_TABLE_HEADERS)?;
            }
            Ok(())
        })?;

        info!(season = %season, teams = rows.len(), path = %path.display(), "stored points table");
        Ok(path)
    }

    /// Seasons with a cached snapshot, newest first.
    pub fn available_seasons(&self) -> Result<Vec<Season>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut seasons: Vec<Season> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name();
                let name = name.to_str()?;
                name.strip_prefix("IPL_Points_Table_")?
                    .strip_suffix(".csv")?
                    .parse::<Season>()
                    .ok()
            })
            .collect();
        seasons.sort_unstable_by(|a, b| b.cmp(a));
        seasons.dedup();
        Ok(seasons)
    }

    /// Every cached snapshot, newest season first. Unreadable files are
    /// skipped with a warning.
    pub fn all(&self) -> Result<Vec<(Season, Vec<PointsRow>)>> {
        let mut out = Vec::new();
        for season in self.available_seasons()? {
            match self.get(season) {
                Ok(Some(rows)) => out.push((season, rows)),
                Ok(None) => {}
                Err(e) => tracing::warn!(season = %season, error = %e, "skipping unreadable points table"),
            }
        }
        Ok(out)
    }

    /// Validate an uploaded CSV and store it as the snapshot for `season`.
    pub fn import(&self, season: Season, source: &Path) -> Result<Vec<PointsRow>> {
        if !source.exists() {
            return Err(IplError::MissingCache {
                path: source.to_path_buf(),
            });
        }
        let is_csv = source
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if !is_csv {
            return Err(IplError::validation(
                source.display().to_string(),
                "points table upload must be a .csv file",
            ));
        }

        let file = fs::File::open(source)?;
        let rows = parse_points_csv(&source.display().to_string(), file)?;
        if rows.is_empty() {
            return Err(IplError::validation(
                source.display().to_string(),
                "points table has no rows",
            ));
        }
        self.put(season, &rows)?;
        Ok(rows)
    }
}
