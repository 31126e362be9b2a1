//! Raw match tables read from the CSV cache.
//!
//! Tables are kept as plain string cells; the corpus builder decides which
//! columns it needs and how to interpret them.

use crate::error::{IplError, Result};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// A parsed CSV table with a header row.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Parse a table from any reader. Ragged rows are padded with blanks.
    pub fn from_reader<R: Read>(name: &str, reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let width = headers.len();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(width, String::new());
            rows.push(row);
        }

        Ok(Self::new(name, headers, rows))
    }

    /// Load a table from disk; a missing file is a not-found error.
    pub fn load(name: &str, path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(IplError::MissingCache {
                path: path.to_path_buf(),
            });
        }
        let file = fs::File::open(path)?;
        let table = Self::from_reader(name, file)?;
        debug!(table = name, rows = table.rows.len(), "loaded match table");
        Ok(table)
    }

    /// Index of a column, matched case-insensitively.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    }

    /// Like [`RawTable::column`] but a missing column is an error.
    pub fn require(&self, name: &str) -> Result<usize> {
        self.column(name).ok_or_else(|| IplError::MissingColumn {
            table: self.name.clone(),
            column: name.to_string(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Cell accessor that tolerates short rows.
pub fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reader_pads_short_rows() {
        let data = "team1,team2,winner\nA,B\nC,D,C\n";
        let table = RawTable::from_reader("historical", data.as_bytes()).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["A", "B", ""]);
        assert_eq!(cell(&table.rows[1], 2), "C");
    }

    #[test]
    fn test_column_lookup_is_case_insensitive() {
        let data = "Team1,Team2,Status\n";
        let table = RawTable::from_reader("current", data.as_bytes()).unwrap();
        assert_eq!(table.column("team1"), Some(0));
        assert_eq!(table.column("STATUS"), Some(2));
        assert!(table.column("winner").is_none());
    }

    #[test]
    fn test_require_reports_table_and_column() {
        let table = RawTable::from_reader("current", "Team1\n".as_bytes()).unwrap();
        match table.require("Winner") {
            Err(IplError::MissingColumn { table, column }) => {
                assert_eq!(table, "current");
                assert_eq!(column, "Winner");
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = RawTable::load("historical", &dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, IplError::MissingCache { .. }));
    }
}
