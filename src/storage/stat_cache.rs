//! Cached player leaderboards (Orange Cap, Purple Cap and friends).

use crate::cli::types::StatCategory;
use crate::core::replace_csv;
use crate::error::{IplError, Result};
use crate::Season;
use serde::Serialize;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, info};

/// A leaderboard as published: free-form headers and string cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl StatTable {
    /// Build a table, dropping rows whose width does not match the header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let total = rows.len();
        let rows: Vec<Vec<String>> = rows.into_iter().filter(|r| r.len() == width).collect();
        if rows.len() != total {
            debug!(dropped = total - rows.len(), "dropped malformed leaderboard rows");
        }
        Self { headers, rows }
    }

    pub fn from_csv<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = rdr.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in rdr.records() {
            rows.push(record?.iter().map(str::to_string).collect());
        }
        Ok(Self::new(headers, rows))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as JSON objects keyed by header.
    pub fn to_records(&self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.headers
                    .iter()
                    .cloned()
                    .zip(row.iter().map(|c| serde_json::Value::String(c.clone())))
                    .collect()
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct StatCache {
    dir: PathBuf,
}

impl StatCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, category: StatCategory, season: Season) -> PathBuf {
        self.dir
            .join(season.to_string())
            .join(category.group().to_string())
            .join(category.file_name())
    }

    pub fn exists(&self, category: StatCategory, season: Season) -> bool {
        self.path_for(category, season).exists()
    }

    pub fn get(&self, category: StatCategory, season: Season) -> Result<StatTable> {
        let path = self.path_for(category, season);
        if !path.exists() {
            return Err(IplError::MissingCache { path });
        }
        let table = StatTable::from_csv(fs::File::open(&path)?)?;
        if table.is_empty() {
            return Err(IplError::validation(
                path.display().to_string(),
                format!("{} leaderboard has no rows", category),
            ));
        }
        Ok(table)
    }

    /// Replace the cached leaderboard.
    pub fn put(&self, category: StatCategory, season: Season, table: &StatTable) -> Result<PathBuf> {
        let path = self.path_for(category, season);
        replace_csv(&path, |wtr| {
            wtr.write_record(&table.headers)?;
            for row in &table.rows {
                wtr.write_record(row)?;
            }
            Ok(())
        })?;
        info!(category = %category, season = %season, rows = table.rows.len(), "stored leaderboard");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orange_cap() -> StatTable {
        StatTable::new(
            vec!["POS".into(), "Player".into(), "Runs".into()],
            vec![
                vec!["1".into(), "Sai Sudharsan".into(), "759".into()],
                vec!["2".into(), "Suryakumar Yadav".into(), "717".into()],
            ],
        )
    }

    #[test]
    fn test_mismatched_rows_are_dropped() {
        let table = StatTable::new(
            vec!["POS".into(), "Player".into()],
            vec![
                vec!["1".into(), "A".into()],
                vec!["2".into()],
                vec!["3".into(), "C".into(), "extra".into()],
            ],
        );
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_paths_follow_group_layout() {
        let cache = StatCache::new("/data/stats");
        let path = cache.path_for(StatCategory::PurpleCap, Season::new(2025));
        assert_eq!(path, PathBuf::from("/data/stats/2025/bowling/purple_cap.csv"));
    }

    #[test]
    fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let cache = StatCache::new(dir.path());
        cache.put(StatCategory::OrangeCap, Season::new(2025), &orange_cap()).unwrap();
        let table = cache.get(StatCategory::OrangeCap, Season::new(2025)).unwrap();
        assert_eq!(table, orange_cap());
        assert_eq!(table.to_records()[0]["Player"], "Sai Sudharsan");
    }

    #[test]
    fn test_get_missing_and_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = StatCache::new(dir.path());
        let err = cache.get(StatCategory::GreenDotBalls, Season::new(2025)).unwrap_err();
        assert!(matches!(err, IplError::MissingCache { .. }));

        let empty = StatTable::new(vec!["POS".into()], Vec::new());
        cache.put(StatCategory::GreenDotBalls, Season::new(2025), &empty).unwrap();
        let err = cache.get(StatCategory::GreenDotBalls, Season::new(2025)).unwrap_err();
        assert!(matches!(err, IplError::DataValidation { .. }));
    }
}
