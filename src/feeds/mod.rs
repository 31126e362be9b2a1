//! Refreshing the on-disk caches from a remote stats feed.
//!
//! The feed is any HTTP endpoint described by a URL template containing
//! `{resource}` and `{season}`. Each resource is served as a JSON array of
//! flat objects or as CSV with a header row.

pub mod http;

use crate::cli::types::StatCategory;
use crate::error::{IplError, Result};
use crate::storage::points_table::parse_points_csv;
use crate::storage::{PointsRow, PointsTableStore, StatCache, StatTable};
use crate::{Season, FEED_URL_ENV_VAR};
use reqwest::Client;
use tracing::{info, warn};

/// Resource name used for points table snapshots.
pub const POINTS_TABLE_RESOURCE: &str = "points-table";

pub struct FeedClient {
    client: Client,
    template: String,
}

impl FeedClient {
    /// Build a client for `template`; `None` means no feed is configured.
    pub fn new(template: Option<&str>) -> Result<Self> {
        let template = template
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| IplError::FeedNotConfigured {
                env_var: FEED_URL_ENV_VAR.to_string(),
            })?;
        let client = Client::builder()
            .user_agent(concat!("ipl-stats/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            template: template.to_string(),
        })
    }

    pub fn url_for(&self, resource: &str, season: Season) -> String {
        http::expand_template(&self.template, resource, season)
    }

    /// Fetch and decode one resource.
    pub async fn fetch_table(&self, resource: &str, season: Season) -> Result<StatTable> {
        let url = self.url_for(resource, season);
        let body = http::fetch_text(&self.client, &url).await?;
        http::parse_payload(&body)
    }

    /// Fetch the standings for `season` and overwrite the cached snapshot.
    pub async fn refresh_points_table(
        &self,
        store: &PointsTableStore,
        season: Season,
    ) -> Result<Vec<PointsRow>> {
        let table = self.fetch_table(POINTS_TABLE_RESOURCE, season).await?;
        let rows = points_rows_from(&table).map_err(|e| {
            warn!(season = %season, error = %e, "feed points table rejected");
            IplError::Upstream {
                message: format!("points table from feed is unusable: {}", e),
            }
        })?;
        if rows.is_empty() {
            return Err(IplError::Upstream {
                message: format!("feed returned no points table rows for {}", season),
            });
        }
        store.put(season, &rows)?;
        info!(season = %season, teams = rows.len(), "refreshed points table");
        Ok(rows)
    }

    /// Fetch one leaderboard and overwrite its cache file.
    pub async fn refresh_stat(
        &self,
        cache: &StatCache,
        category: StatCategory,
        season: Season,
    ) -> Result<StatTable> {
        let table = self.fetch_table(category.slug(), season).await?;
        if table.is_empty() {
            return Err(IplError::Upstream {
                message: format!("feed returned no {} rows for {}", category, season),
            });
        }
        cache.put(category, season, &table)?;
        info!(category = %category, season = %season, rows = table.rows.len(), "refreshed leaderboard");
        Ok(table)
    }
}

/// Run a fetched table through the same validation as an uploaded file.
fn points_rows_from(table: &StatTable) -> Result<Vec<PointsRow>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }
    let bytes = wtr.into_inner().map_err(|e| IplError::Upstream {
        message: e.to_string(),
    })?;
    parse_points_csv("feed", bytes.as_slice())
}
