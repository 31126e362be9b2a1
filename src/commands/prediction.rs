//! Classifier-backed match predictions.

use super::common::{print_json, DataContext};
use crate::analysis::live::{predict_live, LivePrediction, LiveSituation};
use crate::analysis::match_prediction::{
    predict_outcome, prepare_features, MatchPrediction, MatchSetup,
};
use crate::analysis::model::LogisticModel;
use crate::config::AppConfig;
use crate::Result;

pub fn match_prediction(ctx: &DataContext, setup: &MatchSetup) -> Result<MatchPrediction> {
    let features = prepare_features(&ctx.corpus, setup)?;
    let model = LogisticModel::load(&ctx.config.match_model_path())?;
    predict_outcome(&model, &features)
}

pub fn handle_predict_match(ctx: &DataContext, setup: &MatchSetup, as_json: bool) -> Result<()> {
    let prediction = match_prediction(ctx, setup)?;
    if as_json {
        return print_json(&prediction);
    }
    println!(
        "{} vs {} at {} ({} won the toss and chose to {})",
        prediction.team1,
        prediction.team2,
        prediction.venue,
        prediction.toss_winner,
        prediction.toss_decision
    );
    println!("  {:<30} {:>6.2}%", prediction.team1, prediction.team1_win_probability);
    println!("  {:<30} {:>6.2}%", prediction.team2, prediction.team2_win_probability);
    println!("Favourite: {}", prediction.favourite);
    let k = &prediction.key_factors;
    println!(
        "Key factors: win rate {:+.3}, form {:+.3}, venue {:+.3}, head-to-head {:+.3}, toss {:.3}",
        k.win_rate_diff, k.form_diff, k.venue_advantage, k.h2h_advantage, k.toss_advantage
    );
    Ok(())
}

pub fn live_prediction(config: &AppConfig, situation: &LiveSituation) -> Result<LivePrediction> {
    // Reject impossible states before touching the model file.
    situation.validate()?;
    let model = LogisticModel::load(&config.live_model_path())?;
    predict_live(&model, situation)
}

pub fn handle_predict_live(config: &AppConfig, situation: &LiveSituation, as_json: bool) -> Result<()> {
    let prediction = live_prediction(config, situation)?;
    if as_json {
        return print_json(&prediction);
    }
    println!(
        "{} chasing {} against {}: {}",
        prediction.batting_team, prediction.target, prediction.bowling_team, prediction.current_situation
    );
    println!(
        "  Need {} from {} balls with {} wickets in hand (CRR {:.2}, RRR {:.2})",
        prediction.runs_needed,
        prediction.balls_remaining,
        prediction.wickets_in_hand,
        prediction.current_run_rate,
        prediction.required_run_rate
    );
    println!(
        "  {} {:.2}%  {} {:.2}%",
        prediction.batting_team, prediction.win_probability, prediction.bowling_team, prediction.lose_probability
    );
    println!("{}", prediction.analysis);
    Ok(())
}
