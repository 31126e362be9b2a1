//! Points table commands: cached standings, feed refresh and uploads.

use super::common::{feed_client, print_json, print_table, DataContext};
use super::playoffs::print_prediction;
use crate::analysis::playoffs::{predict, PlayoffPrediction};
use crate::analysis::teams::TEAM_ABBREVIATIONS;
use crate::config::AppConfig;
use crate::error::{IplError, Result};
use crate::storage::{PointsRow, PointsTableStore};
use crate::Season;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableSource {
    Cached,
    Live,
}

#[derive(Debug, Serialize)]
pub struct PointsTableView {
    pub year: Season,
    pub source: TableSource,
    pub data: Vec<PointsRow>,
}

/// Cached standings, or a feed fetch when `refresh` is set or nothing is
/// cached and a feed is configured.
pub async fn points_table(config: &AppConfig, refresh: bool) -> Result<PointsTableView> {
    let store = config.points_store();
    let season = config.season;

    if !refresh {
        if let Some(rows) = store.get(season)? {
            return Ok(PointsTableView {
                year: season,
                source: TableSource::Cached,
                data: rows,
            });
        }
        if config.feed_url.is_none() {
            return Err(IplError::MissingCache {
                path: store.path_for(season),
            });
        }
    }

    let rows = feed_client(config)?.refresh_points_table(&store, season).await?;
    Ok(PointsTableView {
        year: season,
        source: TableSource::Live,
        data: rows,
    })
}

#[derive(Debug, Serialize)]
pub struct AvailableYears {
    pub years: Vec<Season>,
}

#[derive(Debug, Serialize)]
pub struct AllPointsTables {
    pub years: Vec<Season>,
    pub data: BTreeMap<String, Vec<PointsRow>>,
}

pub fn all_points_tables(store: &PointsTableStore) -> Result<AllPointsTables> {
    let tables = store.all()?;
    Ok(AllPointsTables {
        years: tables.iter().map(|(season, _)| *season).collect(),
        data: tables
            .into_iter()
            .map(|(season, rows)| (season.to_string(), rows))
            .collect(),
    })
}

#[derive(Debug, Serialize)]
pub struct TeamAbbreviation {
    pub abbreviation: &'static str,
    pub name: &'static str,
}

pub fn team_abbreviations() -> Vec<TeamAbbreviation> {
    TEAM_ABBREVIATIONS
        .iter()
        .map(|&(abbreviation, name)| TeamAbbreviation {
            abbreviation,
            name,
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct UploadResult {
    pub message: String,
    pub year: Season,
    pub teams: usize,
    pub predictions: PlayoffPrediction,
}

/// Validate and store `file` as the season's table, then predict from it.
pub fn upload_points_table(ctx: &DataContext, file: &Path) -> Result<UploadResult> {
    let config = ctx.config.scoring_config()?;
    let rows = ctx.points_store().import(config.target_season, file)?;
    info!(season = %config.target_season, file = %file.display(), "points table uploaded");
    let predictions = predict(&ctx.corpus, Some(rows.as_slice()), &config);
    Ok(UploadResult {
        message: "Points table uploaded successfully".to_string(),
        year: config.target_season,
        teams: rows.len(),
        predictions,
    })
}

fn print_rows(rows: &[PointsRow]) {
    let headers: Vec<String> = ["#", "Team", "P", "W", "L", "NRR", "Pts"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            vec![
                (i + 1).to_string(),
                r.team.clone(),
                r.played.to_string(),
                r.won.to_string(),
                r.lost.to_string(),
                format!("{:+.3}", r.nrr),
                r.points.to_string(),
            ]
        })
        .collect();
    print_table(&headers, &body);
}

pub async fn handle_get(config: &AppConfig, refresh: bool, as_json: bool) -> Result<()> {
    let view = points_table(config, refresh).await?;
    if as_json {
        return print_json(&view);
    }
    let source = match view.source {
        TableSource::Cached => "cached",
        TableSource::Live => "live",
    };
    println!("IPL {} points table ({})", view.year, source);
    print_rows(&view.data);
    Ok(())
}

pub fn handle_years(config: &AppConfig, as_json: bool) -> Result<()> {
    let years = AvailableYears {
        years: config.points_store().available_seasons()?,
    };
    if as_json {
        return print_json(&years);
    }
    if years.years.is_empty() {
        println!("No points tables cached");
    }
    for year in &years.years {
        println!("{}", year);
    }
    Ok(())
}

pub fn handle_all(config: &AppConfig, as_json: bool) -> Result<()> {
    let all = all_points_tables(&config.points_store())?;
    if as_json {
        return print_json(&all);
    }
    for year in &all.years {
        if let Some(rows) = all.data.get(&year.to_string()) {
            println!("IPL {}", year);
            print_rows(rows);
            println!();
        }
    }
    Ok(())
}

pub async fn handle_refresh(config: &AppConfig, as_json: bool) -> Result<()> {
    let store = config.points_store();
    let rows = feed_client(config)?
        .refresh_points_table(&store, config.season)
        .await?;
    if as_json {
        return print_json(&PointsTableView {
            year: config.season,
            source: TableSource::Live,
            data: rows,
        });
    }
    println!(
        "Points table for {} updated ({} teams) at {}",
        config.season,
        rows.len(),
        store.path_for(config.season).display()
    );
    Ok(())
}

pub fn handle_upload(ctx: &DataContext, file: &Path, as_json: bool) -> Result<()> {
    let result = upload_points_table(ctx, file)?;
    if as_json {
        return print_json(&result);
    }
    println!("{} ({} teams, {})", result.message, result.teams, result.year);
    println!();
    print_prediction(&result.predictions);
    Ok(())
}

pub fn handle_teams(as_json: bool) -> Result<()> {
    let teams = team_abbreviations();
    if as_json {
        return print_json(&serde_json::json!({ "teams": teams }));
    }
    for team in &teams {
        println!("{:<5} {}", team.abbreviation, team.name);
    }
    Ok(())
}
