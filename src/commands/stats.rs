//! Player leaderboard commands.

use super::common::{feed_client, print_json, print_table};
use crate::cli::types::{StatCategory, StatGroup};
use crate::config::AppConfig;
use crate::Result;
use crate::Season;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LeaderboardView {
    pub category: StatCategory,
    pub title: String,
    pub year: Season,
    pub data: Vec<serde_json::Map<String, serde_json::Value>>,
}

/// A cached leaderboard, fetched first when `refresh` is set.
pub async fn leaderboard(config: &AppConfig, category: StatCategory, refresh: bool) -> Result<(Vec<String>, LeaderboardView)> {
    let cache = config.stat_cache();
    let table = if refresh {
        feed_client(config)?
            .refresh_stat(&cache, category, config.season)
            .await?
    } else {
        cache.get(category, config.season)?
    };
    let view = LeaderboardView {
        category,
        title: category.to_string(),
        year: config.season,
        data: table.to_records(),
    };
    Ok((table.headers, view))
}

pub async fn handle_get(config: &AppConfig, category: StatCategory, refresh: bool, as_json: bool) -> Result<()> {
    let (headers, view) = leaderboard(config, category, refresh).await?;
    if as_json {
        return print_json(&view);
    }
    println!("{} {}", view.title, view.year);
    let rows: Vec<Vec<String>> = view
        .data
        .iter()
        .map(|record| {
            headers
                .iter()
                .map(|h| {
                    record
                        .get(h)
                        .and_then(|v| v.as_str())
                        .unwrap_or_default()
                        .to_string()
                })
                .collect()
        })
        .collect();
    print_table(&headers, &rows);
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct CategoryStatus {
    pub category: StatCategory,
    pub title: String,
    pub group: StatGroup,
    pub cached: bool,
}

pub fn categories(config: &AppConfig) -> Vec<CategoryStatus> {
    let cache = config.stat_cache();
    StatCategory::ALL
        .iter()
        .map(|&category| CategoryStatus {
            category,
            title: category.to_string(),
            group: category.group(),
            cached: cache.exists(category, config.season),
        })
        .collect()
}

pub fn handle_categories(config: &AppConfig, as_json: bool) -> Result<()> {
    let statuses = categories(config);
    if as_json {
        return print_json(&statuses);
    }
    for status in &statuses {
        println!(
            "{:<22} {:<8} {}",
            status.title,
            status.group,
            if status.cached { "cached" } else { "-" }
        );
    }
    Ok(())
}
