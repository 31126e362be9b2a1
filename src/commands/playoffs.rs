//! Playoff prediction command.

use super::common::{print_json, DataContext};
use crate::analysis::playoffs::{predict_with_fallback, PlayoffPrediction, PredictionMethod};
use crate::error::{IplError, Result};
use crate::storage::points_table::parse_points_csv;
use std::fs;
use std::path::Path;

/// Predict with an explicit points table file, or the cached snapshot for
/// the configured season.
///
/// A bad explicit file is an error. A missing or unreadable cached
/// snapshot only downgrades the prediction to the historical method.
pub fn playoff_prediction(ctx: &DataContext, points_table: Option<&Path>) -> Result<PlayoffPrediction> {
    let config = ctx.config.scoring_config()?;
    let snapshot = match points_table {
        Some(path) => {
            if !path.exists() {
                return Err(IplError::MissingCache {
                    path: path.to_path_buf(),
                });
            }
            let rows = parse_points_csv(&path.display().to_string(), fs::File::open(path)?)?;
            Ok(Some(rows))
        }
        None => ctx.points_store().get(config.target_season),
    };
    Ok(predict_with_fallback(&ctx.corpus, snapshot, &config))
}

pub fn handle_predict_playoffs(
    ctx: &DataContext,
    points_table: Option<&Path>,
    as_json: bool,
) -> Result<()> {
    let prediction = playoff_prediction(ctx, points_table)?;
    if as_json {
        return print_json(&prediction);
    }
    print_prediction(&prediction);
    Ok(())
}

pub fn print_prediction(prediction: &PlayoffPrediction) {
    let method = match prediction.method {
        PredictionMethod::PointsTable => "points table and history",
        PredictionMethod::Historical => "historical performance",
    };
    println!("IPL {} playoff prediction ({})", prediction.target_season, method);
    if let Some(note) = &prediction.note {
        println!("Note: {}", note);
    }
    println!();

    for (rank, strength) in prediction.metrics.iter().enumerate() {
        let marker = if rank < prediction.qualifiers.len() { "Q" } else { " " };
        let standing = strength
            .standing
            .as_ref()
            .map(|s| format!("  {} pts (max {}), NRR {:+.3}", s.current_points, s.max_possible_points, s.nrr))
            .unwrap_or_default();
        println!(
            "{} {:>2}. {:<30} {:>6.2}{}",
            marker,
            rank + 1,
            strength.team,
            strength.strength_score,
            standing
        );
    }

    if let Some(threshold) = prediction.threshold_points {
        println!();
        println!("Qualification threshold: {} points", threshold);
    }
    for scenario in &prediction.scenarios {
        println!("  {}", scenario.summary);
    }
}
