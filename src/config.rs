//! Runtime configuration: environment first, command-line flags on top.

use crate::analysis::playoffs::{AdjustmentTable, ScoringConfig};
use crate::core::default_data_dir;
use crate::error::Result;
use crate::storage::{PointsTableStore, SquadStore, StatCache};
use crate::{Season, ADJUSTMENTS_ENV_VAR, DATA_DIR_ENV_VAR, FEED_URL_ENV_VAR, SEASON_ENV_VAR};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub season: Season,
    pub feed_url: Option<String>,
    pub adjustments_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            season: Season::default(),
            feed_url: None,
            adjustments_path: None,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl AppConfig {
    /// Read the `IPL_STATS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(dir) = non_empty(lookup(DATA_DIR_ENV_VAR)) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(season) = non_empty(lookup(SEASON_ENV_VAR)) {
            config.season = season.parse()?;
        }
        config.feed_url = non_empty(lookup(FEED_URL_ENV_VAR));
        config.adjustments_path = non_empty(lookup(ADJUSTMENTS_ENV_VAR)).map(PathBuf::from);
        Ok(config)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, season: Option<Season>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        if let Some(season) = season {
            self.season = season;
        }
        self
    }

    pub fn historical_matches_path(&self) -> PathBuf {
        self.data_dir.join("matches").join("historical.csv")
    }

    pub fn current_season_matches_path(&self) -> PathBuf {
        self.data_dir.join("matches").join("current_season.csv")
    }

    pub fn points_tables_dir(&self) -> PathBuf {
        self.data_dir.join("points_tables")
    }

    pub fn stats_dir(&self) -> PathBuf {
        self.data_dir.join("stats")
    }

    pub fn squads_dir(&self) -> PathBuf {
        self.data_dir.join("squads")
    }

    pub fn models_dir(&self) -> PathBuf {
        self.data_dir.join("models")
    }

    pub fn match_model_path(&self) -> PathBuf {
        self.models_dir().join("match_outcome.json")
    }

    pub fn live_model_path(&self) -> PathBuf {
        self.models_dir().join("live_match.json")
    }

    pub fn points_store(&self) -> PointsTableStore {
        PointsTableStore::new(self.points_tables_dir())
    }

    pub fn stat_cache(&self) -> StatCache {
        StatCache::new(self.stats_dir())
    }

    pub fn squad_store(&self) -> SquadStore {
        SquadStore::new(self.squads_dir())
    }

    /// Playoff scoring inputs for the configured season, with the
    /// adjustment table from `IPL_STATS_ADJUSTMENTS` when set.
    pub fn scoring_config(&self) -> Result<ScoringConfig> {
        let config = ScoringConfig::new(self.season);
        match &self.adjustments_path {
            Some(path) => Ok(config.with_adjustments(load_adjustments(path)?)),
            None => Ok(config),
        }
    }
}

fn load_adjustments(path: &Path) -> Result<AdjustmentTable> {
    debug!(path = %path.display(), "loading adjustment table");
    AdjustmentTable::load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.season, Season::new(2025));
        assert!(config.data_dir.ends_with("ipl-stats"));
        assert!(config.feed_url.is_none());
        assert!(config.adjustments_path.is_none());
    }

    #[test]
    fn test_env_values_and_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (DATA_DIR_ENV_VAR, "/srv/ipl"),
            (SEASON_ENV_VAR, "2024"),
            (FEED_URL_ENV_VAR, "https://feed/{season}/{resource}"),
            (ADJUSTMENTS_ENV_VAR, " "),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/ipl"));
        assert_eq!(config.season, Season::new(2024));
        assert!(config.feed_url.is_some());
        assert!(config.adjustments_path.is_none());

        let config = config.with_overrides(Some(PathBuf::from("/tmp/x")), Some(Season::new(2023)));
        assert_eq!(config.points_tables_dir(), PathBuf::from("/tmp/x/points_tables"));
        assert_eq!(config.season, Season::new(2023));
    }

    #[test]
    fn test_invalid_season_env() {
        assert!(AppConfig::from_lookup(lookup(&[(SEASON_ENV_VAR, "last year")])).is_err());
    }

    #[test]
    fn test_scoring_config_reads_adjustments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adjust.json");
        std::fs::write(&path, r#"{"MI": 1.2}"#).unwrap();
        let config = AppConfig {
            adjustments_path: Some(path),
            ..AppConfig::default()
        };
        let scoring = config.scoring_config().unwrap();
        assert_eq!(scoring.adjustments.factor("Mumbai Indians"), 1.2);
        assert_eq!(scoring.adjustments.factor("Delhi Capitals"), 1.0);
    }
}
