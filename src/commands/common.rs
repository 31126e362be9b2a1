//! Shared state and output helpers for command handlers.

use crate::analysis::MatchCorpus;
use crate::config::AppConfig;
use crate::error::Result;
use crate::feeds::FeedClient;
use crate::storage::{PointsTableStore, RawTable};
use serde::Serialize;
use tracing::{debug, info};

/// Everything a corpus-backed command needs, loaded once per invocation.
pub struct DataContext {
    pub config: AppConfig,
    pub corpus: MatchCorpus,
}

impl DataContext {
    /// Load the match tables named by `config` and build the corpus.
    ///
    /// The historical table is required; the current-season table is used
    /// when present.
    pub fn load(config: AppConfig) -> Result<Self> {
        let historical = RawTable::load("historical matches", &config.historical_matches_path())?;

        let current_path = config.current_season_matches_path();
        let current = if current_path.exists() {
            Some(RawTable::load("current season matches", &current_path)?)
        } else {
            debug!(path = %current_path.display(), "no current season table");
            None
        };

        let corpus = MatchCorpus::build(&historical, current.as_ref(), config.season)?;
        info!(
            matches = corpus.matches.len(),
            teams = corpus.teams().len(),
            "data context ready"
        );
        Ok(Self { config, corpus })
    }

    pub fn points_store(&self) -> PointsTableStore {
        self.config.points_store()
    }
}

pub fn feed_client(config: &AppConfig) -> Result<FeedClient> {
    FeedClient::new(config.feed_url.as_deref())
}

/// Pretty-printed JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Fixed-width text table on stdout.
pub fn print_table(headers: &[String], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }
    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };
    println!("{}", line(headers));
    for row in rows {
        println!("{}", line(row));
    }
}
