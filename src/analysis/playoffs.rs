//! Playoff strength scoring.
//!
//! Each franchise gets a composite score from its last three seasons:
//! weighted recent form, batting-first/chasing balance, and how often it
//! finished a season strongly. A per-team adjustment factor is applied on
//! top. When a points table snapshot is available the score is blended
//! with live standings and the ranking follows the table.

use crate::analysis::corpus::MatchCorpus;
use crate::analysis::teams::{normalize_team, CURRENT_FRANCHISES};
use crate::analysis::{percentage, round2};
use crate::error::{IplError, Result};
use crate::storage::points_table::PointsRow;
use crate::Season;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Weights for the three seasons before the target, oldest first.
pub const RECENT_SEASON_WEIGHTS: [f64; 3] = [0.2, 0.3, 0.5];

pub const FORM_WEIGHT: f64 = 0.5;
pub const BALANCE_WEIGHT: f64 = 0.25;
pub const EXPERIENCE_WEIGHT: f64 = 0.25;

pub const HISTORICAL_BLEND: f64 = 0.3;
pub const CURRENT_FORM_BLEND: f64 = 0.5;
pub const POSITION_BLEND: f64 = 0.2;

/// Season win rate (percent) above which a season counts as playoff
/// experience.
pub const EXPERIENCE_WIN_RATE: f64 = 55.0;

pub const QUALIFIER_COUNT: usize = 4;
pub const POINTS_PER_WIN: u32 = 2;
pub const DEFAULT_SEASON_MATCHES: u32 = 14;

/// Manual per-team multipliers applied to the composite score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustmentTable(BTreeMap<String, f64>);

impl Default for AdjustmentTable {
    fn default() -> Self {
        let factors = [
            ("Mumbai Indians", 1.05),
            ("Chennai Super Kings", 1.02),
            ("Royal Challengers Bengaluru", 1.03),
            ("Kolkata Knight Riders", 1.06),
            ("Delhi Capitals", 0.98),
            ("Punjab Kings", 0.99),
            ("Rajasthan Royals", 1.04),
            ("Sunrisers Hyderabad", 1.01),
            ("Gujarat Titans", 0.97),
            ("Lucknow Super Giants", 1.0),
        ];
        Self(
            factors
                .into_iter()
                .map(|(team, factor)| (team.to_string(), factor))
                .collect(),
        )
    }
}

impl AdjustmentTable {
    /// Build from `(team, factor)` pairs; names are normalised.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut table = BTreeMap::new();
        for (team, factor) in pairs {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(IplError::InvalidArgument {
                    message: format!(
                        "adjustment factor for '{}' must be positive, got {}",
                        team.as_ref(),
                        factor
                    ),
                });
            }
            table.insert(normalize_team(team.as_ref()), factor);
        }
        Ok(Self(table))
    }

    /// Load a `{"team": factor}` JSON object.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let map: BTreeMap<String, f64> = serde_json::from_str(&raw)?;
        let table = Self::from_pairs(map)?;
        debug!(path = %path.display(), teams = table.0.len(), "loaded adjustment table");
        Ok(table)
    }

    /// Factor for `team`, 1.0 when not listed.
    pub fn factor(&self, team: &str) -> f64 {
        self.0.get(team).copied().unwrap_or(1.0)
    }
}

/// Inputs that are fixed for a prediction run.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub target_season: Season,
    pub roster: Vec<String>,
    pub adjustments: AdjustmentTable,
    pub season_matches: u32,
}

impl ScoringConfig {
    pub fn new(target_season: Season) -> Self {
        Self {
            target_season,
            roster: CURRENT_FRANCHISES.iter().map(|t| t.to_string()).collect(),
            adjustments: AdjustmentTable::default(),
            season_matches: DEFAULT_SEASON_MATCHES,
        }
    }

    pub fn with_adjustments(mut self, adjustments: AdjustmentTable) -> Self {
        self.adjustments = adjustments;
        self
    }
}

/// Live standings data for one team, present only with a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub current_points: u32,
    pub max_possible_points: u32,
    pub nrr: f64,
    pub remaining_matches: u32,
    pub current_form: f64,
    pub position_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStrength {
    pub team: String,
    pub win_rate: f64,
    pub recent_form: f64,
    pub batting_first_win_rate: f64,
    pub chasing_win_rate: f64,
    pub balanced_ability: f64,
    pub playoff_appearances: usize,
    pub playoff_experience: f64,
    pub adjustment_factor: f64,
    pub strength_score: f64,
    #[serde(flatten)]
    pub standing: Option<Standing>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionMethod {
    Historical,
    PointsTable,
}

/// Qualification outlook derived from the points table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Scenario {
    AlreadyQualified,
    NeedsHelp,
    NeedsWins { wins: u32, remaining: u32 },
    MathematicallyEliminated,
    VirtuallyEliminated,
    NeedsAllRemaining { remaining: u32 },
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scenario::AlreadyQualified => write!(f, "has already qualified for the playoffs"),
            Scenario::NeedsHelp => {
                write!(f, "needs favourable results from other matches to qualify safely")
            }
            Scenario::NeedsWins { wins, remaining } => write!(
                f,
                "needs approximately {} wins from {} remaining matches to safely qualify",
                wins, remaining
            ),
            Scenario::MathematicallyEliminated => {
                write!(f, "is mathematically eliminated from playoff contention")
            }
            Scenario::VirtuallyEliminated => write!(
                f,
                "is virtually eliminated (needs more wins than matches remaining)"
            ),
            Scenario::NeedsAllRemaining { remaining } => write!(
                f,
                "needs to win all {} remaining matches and a favourable NRR to have a chance",
                remaining
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamScenario {
    pub team: String,
    #[serde(flatten)]
    pub scenario: Scenario,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayoffPrediction {
    pub target_season: Season,
    pub method: PredictionMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub qualifiers: Vec<String>,
    pub eliminated: Vec<String>,
    pub metrics: Vec<TeamStrength>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_points: Option<u32>,
    pub scenarios: Vec<TeamScenario>,
}

/// Historical components for one team before any snapshot blending.
struct HistoricalScore {
    win_rate: f64,
    recent_form: f64,
    batting_first_win_rate: f64,
    chasing_win_rate: f64,
    balanced_ability: f64,
    playoff_appearances: usize,
    playoff_experience: f64,
    adjustment_factor: f64,
    composite: f64,
}

fn historical_score(corpus: &MatchCorpus, team: &str, config: &ScoringConfig) -> HistoricalScore {
    let seasons = config.target_season.preceding(RECENT_SEASON_WEIGHTS.len() as u16);

    let mut decided = 0;
    let mut wins = 0;
    let mut per_season: BTreeMap<Season, (usize, usize)> = BTreeMap::new();
    let (mut bat_first, mut bat_first_wins) = (0, 0);
    let (mut chasing, mut chasing_wins) = (0, 0);

    for m in corpus
        .matches_for(team)
        .filter(|m| seasons.contains(&m.season) && m.is_decided())
    {
        let won = usize::from(m.won_by(team));
        decided += 1;
        wins += won;
        let entry = per_season.entry(m.season).or_default();
        entry.0 += 1;
        entry.1 += won;

        match m.batted_first(team) {
            Some(true) => {
                bat_first += 1;
                bat_first_wins += won;
            }
            Some(false) => {
                chasing += 1;
                chasing_wins += won;
            }
            None => {}
        }
    }

    let season_rates: Vec<f64> = seasons
        .iter()
        .map(|s| {
            per_season
                .get(s)
                .map(|(played, won)| percentage(*won, *played))
                .unwrap_or(0.0)
        })
        .collect();

    let recent_form: f64 = season_rates
        .iter()
        .zip(RECENT_SEASON_WEIGHTS)
        .map(|(rate, weight)| rate * weight)
        .sum();

    let playoff_appearances = season_rates
        .iter()
        .filter(|rate| **rate > EXPERIENCE_WIN_RATE)
        .count();
    let playoff_experience = percentage(playoff_appearances, RECENT_SEASON_WEIGHTS.len());

    let batting_first_win_rate = percentage(bat_first_wins, bat_first);
    let chasing_win_rate = percentage(chasing_wins, chasing);
    let balanced_ability = (batting_first_win_rate + chasing_win_rate) / 2.0;

    let adjustment_factor = config.adjustments.factor(team);
    let composite = (FORM_WEIGHT * recent_form
        + BALANCE_WEIGHT * balanced_ability
        + EXPERIENCE_WEIGHT * playoff_experience)
        * adjustment_factor;

    HistoricalScore {
        win_rate: percentage(wins, decided),
        recent_form,
        batting_first_win_rate,
        chasing_win_rate,
        balanced_ability,
        playoff_appearances,
        playoff_experience,
        adjustment_factor,
        composite,
    }
}

/// Rank the roster and split it into qualifiers and eliminated sides.
///
/// An empty or absent snapshot falls back to the historical ranking.
pub fn predict(
    corpus: &MatchCorpus,
    snapshot: Option<&[PointsRow]>,
    config: &ScoringConfig,
) -> PlayoffPrediction {
    let snapshot = snapshot.filter(|rows| !rows.is_empty());

    // Rank within the snapshot by points then NRR.
    let standings: Vec<PointsRow> = snapshot
        .map(|rows| {
            let mut rows: Vec<PointsRow> = rows
                .iter()
                .cloned()
                .map(|mut r| {
                    r.team = normalize_team(&r.team);
                    r
                })
                .collect();
            rows.sort_by(|a, b| b.points.cmp(&a.points).then(b.nrr.total_cmp(&a.nrr)));
            rows
        })
        .unwrap_or_default();
    let table_size = standings.len();

    let mut ranked: Vec<(TeamStrength, f64)> = config
        .roster
        .iter()
        .map(|team| {
            let hist = historical_score(corpus, team, config);
            let standing_row = standings
                .iter()
                .position(|r| r.team == *team)
                .map(|idx| (idx + 1, &standings[idx]));

            let (score, standing) = match standing_row {
                Some((position, row)) => {
                    let remaining = config.season_matches.saturating_sub(row.played);
                    let current_form = percentage(row.won as usize, row.played as usize);
                    let position_score =
                        100.0 - (position - 1) as f64 / table_size as f64 * 100.0;
                    let blended = HISTORICAL_BLEND * hist.composite
                        + CURRENT_FORM_BLEND * current_form
                        + POSITION_BLEND * position_score;
                    (
                        blended,
                        Some(Standing {
                            current_points: row.points,
                            max_possible_points: row.points + POINTS_PER_WIN * remaining,
                            nrr: row.nrr,
                            remaining_matches: remaining,
                            current_form: round2(current_form),
                            position_score: round2(position_score),
                        }),
                    )
                }
                None => (hist.composite, None),
            };

            let strength = TeamStrength {
                team: team.clone(),
                win_rate: round2(hist.win_rate),
                recent_form: round2(hist.recent_form),
                batting_first_win_rate: round2(hist.batting_first_win_rate),
                chasing_win_rate: round2(hist.chasing_win_rate),
                balanced_ability: round2(hist.balanced_ability),
                playoff_appearances: hist.playoff_appearances,
                playoff_experience: round2(hist.playoff_experience),
                adjustment_factor: hist.adjustment_factor,
                strength_score: round2(score),
                standing,
            };
            (strength, score)
        })
        .collect();

    ranked.sort_by(|(a, a_score), (b, b_score)| rank_order(a, *a_score, b, *b_score));

    let method = if snapshot.is_some() {
        PredictionMethod::PointsTable
    } else {
        PredictionMethod::Historical
    };
    let metrics: Vec<TeamStrength> = ranked.into_iter().map(|(s, _)| s).collect();
    let qualifiers: Vec<String> = metrics
        .iter()
        .take(QUALIFIER_COUNT)
        .map(|s| s.team.clone())
        .collect();
    let eliminated: Vec<String> = metrics
        .iter()
        .skip(QUALIFIER_COUNT)
        .map(|s| s.team.clone())
        .collect();

    let threshold_points = metrics
        .get(QUALIFIER_COUNT)
        .and_then(|fifth| fifth.standing.as_ref())
        .map(|s| s.max_possible_points);
    let scenarios = threshold_points
        .map(|threshold| scenarios(&metrics, threshold))
        .unwrap_or_default();

    info!(
        season = %config.target_season,
        method = ?method,
        qualifiers = ?qualifiers,
        "playoff prediction complete"
    );

    PlayoffPrediction {
        target_season: config.target_season,
        method,
        note: None,
        qualifiers,
        eliminated,
        metrics,
        threshold_points,
        scenarios,
    }
}

/// Predict from a snapshot lookup that may have failed. A missing or
/// unreadable table degrades to the historical ranking with a note.
pub fn predict_with_fallback(
    corpus: &MatchCorpus,
    snapshot: Result<Option<Vec<PointsRow>>>,
    config: &ScoringConfig,
) -> PlayoffPrediction {
    let season = config.target_season;
    let (rows, note) = match snapshot {
        Ok(Some(rows)) if !rows.is_empty() => (Some(rows), None),
        Ok(Some(_)) => {
            warn!(season = %season, "points table is empty; using historical ranking");
            (None, Some(format!("Points table for {} is empty", season)))
        }
        Ok(None) => {
            warn!(season = %season, "no points table; using historical ranking");
            (None, Some(format!("No points table cached for {}", season)))
        }
        Err(e) => {
            warn!(season = %season, error = %e, "points table unreadable; using historical ranking");
            (None, Some(format!("Points table for {} could not be read: {}", season, e)))
        }
    };

    let mut prediction = predict(corpus, rows.as_deref(), config);
    prediction.note = note.map(|n| format!("{}; ranking uses historical performance only", n));
    prediction
}

/// Teams in the table first by points, NRR and score; the rest by score.
fn rank_order(a: &TeamStrength, a_score: f64, b: &TeamStrength, b_score: f64) -> Ordering {
    match (&a.standing, &b.standing) {
        (Some(sa), Some(sb)) => sb
            .current_points
            .cmp(&sa.current_points)
            .then(sb.nrr.total_cmp(&sa.nrr))
            .then(b_score.total_cmp(&a_score)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b_score.total_cmp(&a_score),
    }
}

fn wins_needed(points: u32, threshold: u32) -> u32 {
    threshold.saturating_sub(points).div_ceil(POINTS_PER_WIN)
}

fn scenarios(metrics: &[TeamStrength], threshold: u32) -> Vec<TeamScenario> {
    metrics
        .iter()
        .enumerate()
        .filter_map(|(idx, team)| {
            let standing = team.standing.as_ref()?;
            let points = standing.current_points;
            let remaining = standing.remaining_matches;
            let scenario = if idx < QUALIFIER_COUNT {
                if points >= threshold {
                    Scenario::AlreadyQualified
                } else {
                    let wins = wins_needed(points, threshold);
                    if wins > remaining {
                        Scenario::NeedsHelp
                    } else {
                        Scenario::NeedsWins { wins, remaining }
                    }
                }
            } else if standing.max_possible_points < threshold {
                Scenario::MathematicallyEliminated
            } else if wins_needed(points, threshold) > remaining {
                Scenario::VirtuallyEliminated
            } else {
                Scenario::NeedsAllRemaining { remaining }
            };
            Some(TeamScenario {
                team: team.team.clone(),
                summary: format!("{} {}", team.team, scenario),
                scenario,
            })
        })
        .collect()
}
