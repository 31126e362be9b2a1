//! Second-innings win probability.

use crate::analysis::model::{FeatureVector, WinProbabilityModel};
use crate::analysis::round2;
use crate::analysis::teams::normalize_team;
use crate::error::{IplError, Result};
use serde::Serialize;

pub const INNINGS_BALLS: u32 = 120;
pub const MAX_WICKETS: u32 = 10;

/// Required rate reported once no balls remain.
pub const EXHAUSTED_REQUIRED_RATE: f64 = 99.99;

/// The state of a chase.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveSituation {
    pub batting_team: String,
    pub bowling_team: String,
    pub venue: String,
    pub target: u32,
    pub current_score: u32,
    pub balls_played: u32,
    pub wickets_fallen: u32,
}

impl LiveSituation {
    pub fn validate(&self) -> Result<()> {
        if self.target == 0 {
            return Err(IplError::InvalidArgument {
                message: "target must be positive".to_string(),
            });
        }
        if self.balls_played > INNINGS_BALLS {
            return Err(IplError::InvalidArgument {
                message: format!(
                    "balls played ({}) cannot exceed {}",
                    self.balls_played, INNINGS_BALLS
                ),
            });
        }
        if self.wickets_fallen > MAX_WICKETS {
            return Err(IplError::InvalidArgument {
                message: format!(
                    "wickets fallen ({}) cannot exceed {}",
                    self.wickets_fallen, MAX_WICKETS
                ),
            });
        }
        if normalize_team(&self.batting_team) == normalize_team(&self.bowling_team) {
            return Err(IplError::InvalidArgument {
                message: "batting and bowling teams must differ".to_string(),
            });
        }
        Ok(())
    }

    pub fn runs_left(&self) -> i64 {
        i64::from(self.target) - i64::from(self.current_score)
    }

    pub fn balls_left(&self) -> u32 {
        INNINGS_BALLS.saturating_sub(self.balls_played)
    }

    pub fn wickets_in_hand(&self) -> u32 {
        MAX_WICKETS.saturating_sub(self.wickets_fallen)
    }

    pub fn current_run_rate(&self) -> f64 {
        if self.balls_played == 0 {
            0.0
        } else {
            f64::from(self.current_score) * 6.0 / f64::from(self.balls_played)
        }
    }

    pub fn required_run_rate(&self) -> f64 {
        match self.balls_left() {
            0 => EXHAUSTED_REQUIRED_RATE,
            balls => self.runs_left() as f64 * 6.0 / f64::from(balls),
        }
    }

    /// City part of a `"Ground, City"` venue string.
    pub fn city(&self) -> &str {
        self.venue
            .rsplit_once(',')
            .map(|(_, city)| city.trim())
            .unwrap_or_else(|| self.venue.trim())
    }

    pub fn features(&self) -> FeatureVector {
        let mut f = FeatureVector::new();
        f.set_category("batting_team", &normalize_team(&self.batting_team))
            .set_category("bowling_team", &normalize_team(&self.bowling_team))
            .set_category("city", self.city())
            .set("runs_left", self.runs_left() as f64)
            .set("balls_left", f64::from(self.balls_left()))
            .set("wickets", f64::from(self.wickets_in_hand()))
            .set("total_runs_x", f64::from(self.target))
            .set("crr", self.current_run_rate())
            .set("rrr", self.required_run_rate());
        f
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LivePrediction {
    pub batting_team: String,
    pub bowling_team: String,
    pub venue: String,
    pub target: u32,
    pub current_situation: String,
    pub runs_needed: i64,
    pub balls_remaining: u32,
    pub wickets_in_hand: u32,
    pub current_run_rate: f64,
    pub required_run_rate: f64,
    pub win_probability: f64,
    pub lose_probability: f64,
    pub analysis: String,
}

/// One-line reading of a batting-side win probability (percent).
pub fn match_analysis(win_probability: f64, batting_team: &str, bowling_team: &str) -> String {
    if win_probability > 80.0 {
        format!("{} is in a very strong position to win.", batting_team)
    } else if win_probability > 60.0 {
        format!(
            "{} has the advantage, but the match is still competitive.",
            batting_team
        )
    } else if win_probability > 40.0 {
        "The match is evenly balanced, could go either way.".to_string()
    } else if win_probability > 20.0 {
        format!(
            "{} has the advantage, but {} still has a chance.",
            bowling_team, batting_team
        )
    } else {
        format!("{} is in a very strong position to win.", bowling_team)
    }
}

pub fn predict_live(model: &dyn WinProbabilityModel, situation: &LiveSituation) -> Result<LivePrediction> {
    situation.validate()?;
    let [_, p_win] = model.predict_probability(&situation.features())?;
    let win = p_win * 100.0;
    let batting_team = normalize_team(&situation.batting_team);
    let bowling_team = normalize_team(&situation.bowling_team);

    Ok(LivePrediction {
        current_situation: format!(
            "{}/{} in {:.1} overs",
            situation.current_score,
            situation.wickets_fallen,
            f64::from(situation.balls_played) / 6.0
        ),
        runs_needed: situation.runs_left(),
        balls_remaining: situation.balls_left(),
        wickets_in_hand: situation.wickets_in_hand(),
        current_run_rate: round2(situation.current_run_rate()),
        required_run_rate: round2(situation.required_run_rate()),
        win_probability: round2(win),
        lose_probability: round2(100.0 - win),
        analysis: match_analysis(win, &batting_team, &bowling_team),
        batting_team,
        bowling_team,
        venue: situation.venue.clone(),
        target: situation.target,
    })
}
