//! Pre-match outcome prediction from historical form.

use crate::analysis::corpus::{MatchCorpus, MatchRecord};
use crate::analysis::model::{FeatureVector, WinProbabilityModel};
use crate::analysis::round2;
use crate::analysis::teams::resolve_team;
use crate::error::{IplError, Result};
use crate::TossDecision;
use serde::Serialize;

/// Number of most recent results used for form.
pub const FORM_WINDOW: usize = 5;

/// A fixture as entered by the user, before name resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSetup {
    pub team1: String,
    pub team2: String,
    pub venue: String,
    pub toss_winner: String,
    pub toss_decision: TossDecision,
}

/// Per-side rates, all on a 0-1 scale.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SideFeatures {
    pub team: String,
    pub win_rate: f64,
    pub last_5_form: f64,
    pub venue_win_rate: f64,
    pub toss_win_rate: f64,
    pub win_after_toss_win_rate: f64,
    pub h2h_win_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchFeatures {
    pub team1: SideFeatures,
    pub team2: SideFeatures,
    pub venue: String,
    pub toss_winner: String,
    pub toss_decision: TossDecision,
    pub win_rate_diff: f64,
    pub form_diff: f64,
    pub venue_win_rate_diff: f64,
    pub h2h_win_rate_diff: f64,
    pub toss_winner_win_rate: f64,
}

impl MatchFeatures {
    pub fn to_vector(&self) -> FeatureVector {
        let mut f = FeatureVector::new();
        for (prefix, side) in [("team1", &self.team1), ("team2", &self.team2)] {
            f.set(&format!("{}_win_rate", prefix), side.win_rate)
                .set(&format!("{}_last_5_form", prefix), side.last_5_form)
                .set(&format!("{}_venue_win_rate", prefix), side.venue_win_rate)
                .set(&format!("{}_toss_win_rate", prefix), side.toss_win_rate)
                .set(
                    &format!("{}_win_after_toss_win_rate", prefix),
                    side.win_after_toss_win_rate,
                )
                .set(&format!("{}_h2h_win_rate", prefix), side.h2h_win_rate)
                .set_category(prefix, &side.team);
        }
        f.set("win_rate_diff", self.win_rate_diff)
            .set("form_diff", self.form_diff)
            .set("venue_win_rate_diff", self.venue_win_rate_diff)
            .set("h2h_win_rate_diff", self.h2h_win_rate_diff)
            .set("toss_win_match_win", 1.0)
            .set("toss_winner_win_rate", self.toss_winner_win_rate)
            .set_category("venue", &self.venue)
            .set_category("toss_winner", &self.toss_winner)
            .set_category("toss_decision", &self.toss_decision.to_string());
        f
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyFactors {
    pub win_rate_diff: f64,
    pub form_diff: f64,
    pub venue_advantage: f64,
    pub h2h_advantage: f64,
    pub toss_advantage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchPrediction {
    pub team1: String,
    pub team2: String,
    pub venue: String,
    pub toss_winner: String,
    pub toss_decision: TossDecision,
    /// Win percentages, rounded to two decimals.
    pub team1_win_probability: f64,
    pub team2_win_probability: f64,
    pub favourite: String,
    pub key_factors: KeyFactors,
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

fn side_features(corpus: &MatchCorpus, team: &str, opponent: &str, venue: &str) -> SideFeatures {
    let decided: Vec<&MatchRecord> = corpus.matches_for(team).filter(|m| m.is_decided()).collect();
    let wins = decided.iter().filter(|m| m.won_by(team)).count();

    // Corpus order is historical then current season; sort by season so the
    // tail really is the most recent run.
    let mut by_season = decided.clone();
    by_season.sort_by_key(|m| m.season);
    let recent = &by_season[by_season.len().saturating_sub(FORM_WINDOW)..];
    let recent_wins = recent.iter().filter(|m| m.won_by(team)).count();

    let at_venue: Vec<&&MatchRecord> = decided
        .iter()
        .filter(|m| {
            m.venue
                .as_deref()
                .is_some_and(|v| v.eq_ignore_ascii_case(venue.trim()))
        })
        .collect();
    let venue_wins = at_venue.iter().filter(|m| m.won_by(team)).count();

    let with_toss: Vec<&MatchRecord> = corpus
        .matches_for(team)
        .filter(|m| m.toss_winner.is_some())
        .collect();
    let tosses_won: Vec<&&MatchRecord> = with_toss
        .iter()
        .filter(|m| m.toss_winner.as_deref() == Some(team))
        .collect();
    let wins_after_toss = tosses_won
        .iter()
        .filter(|m| m.is_decided() && m.won_by(team))
        .count();

    let h2h: Vec<&&MatchRecord> = decided
        .iter()
        .filter(|m| m.opponent_of(team) == Some(opponent))
        .collect();
    let h2h_wins = h2h.iter().filter(|m| m.won_by(team)).count();

    SideFeatures {
        team: team.to_string(),
        win_rate: ratio(wins, decided.len()),
        last_5_form: ratio(recent_wins, recent.len()),
        venue_win_rate: ratio(venue_wins, at_venue.len()),
        toss_win_rate: ratio(tosses_won.len(), with_toss.len()),
        win_after_toss_win_rate: ratio(wins_after_toss, tosses_won.len()),
        h2h_win_rate: ratio(h2h_wins, h2h.len()),
    }
}

/// Resolve the fixture against the corpus and compute model inputs.
pub fn prepare_features(corpus: &MatchCorpus, setup: &MatchSetup) -> Result<MatchFeatures> {
    let known = corpus.teams();
    let resolve = |name: &str| {
        resolve_team(name, &known).ok_or_else(|| IplError::TeamNotFound {
            name: name.to_string(),
            available: known.clone(),
        })
    };
    let team1 = resolve(&setup.team1)?;
    let team2 = resolve(&setup.team2)?;
    if team1 == team2 {
        return Err(IplError::InvalidArgument {
            message: format!("a team cannot play itself ({})", team1),
        });
    }
    let toss_winner = resolve(&setup.toss_winner)?;
    if toss_winner != team1 && toss_winner != team2 {
        return Err(IplError::InvalidArgument {
            message: format!("toss winner '{}' is not playing this match", toss_winner),
        });
    }

    let venue = setup.venue.trim().to_string();
    let side1 = side_features(corpus, &team1, &team2, &venue);
    let side2 = side_features(corpus, &team2, &team1, &venue);
    let toss_winner_win_rate = if toss_winner == team1 {
        side1.win_after_toss_win_rate
    } else {
        side2.win_after_toss_win_rate
    };

    Ok(MatchFeatures {
        win_rate_diff: side1.win_rate - side2.win_rate,
        form_diff: side1.last_5_form - side2.last_5_form,
        venue_win_rate_diff: side1.venue_win_rate - side2.venue_win_rate,
        h2h_win_rate_diff: side1.h2h_win_rate - side2.h2h_win_rate,
        toss_winner_win_rate,
        team1: side1,
        team2: side2,
        venue,
        toss_winner,
        toss_decision: setup.toss_decision,
    })
}

/// Run the classifier; its positive class is a `team1` win.
pub fn predict_outcome(model: &dyn WinProbabilityModel, features: &MatchFeatures) -> Result<MatchPrediction> {
    let [p_team2, p_team1] = model.predict_probability(&features.to_vector())?;
    let favourite = if p_team1 >= p_team2 {
        features.team1.team.clone()
    } else {
        features.team2.team.clone()
    };

    Ok(MatchPrediction {
        team1: features.team1.team.clone(),
        team2: features.team2.team.clone(),
        venue: features.venue.clone(),
        toss_winner: features.toss_winner.clone(),
        toss_decision: features.toss_decision,
        team1_win_probability: round2(p_team1 * 100.0),
        team2_win_probability: round2(p_team2 * 100.0),
        favourite,
        key_factors: KeyFactors {
            win_rate_diff: features.win_rate_diff,
            form_diff: features.form_diff,
            venue_advantage: features.venue_win_rate_diff,
            h2h_advantage: features.h2h_win_rate_diff,
            toss_advantage: features.toss_winner_win_rate,
        },
    })
}
