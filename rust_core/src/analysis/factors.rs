//! Factor analysis for a single matchup.
//!
//! A fixed pipeline of evaluators turns a [`Matchup`] into signed, weighted
//! [`Factor`]s. Positive values favor the home side. Each factor is folded into
//! a [`FactorAnalysis`], which derives the predicted winner and a confidence
//! compressed into `[0.5, 0.95]`.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::{ParlayError, Result};
use crate::league_config::{home_advantage_for, weather_affects};
use crate::models::Matchup;

/// Lowest confidence an analysis can report.
pub const MIN_CONFIDENCE: f64 = 0.5;
/// Highest confidence an analysis can report; no pick is ever certain.
pub const MAX_CONFIDENCE: f64 = 0.95;
/// Share of the [0.5, 1.0] dominance range mapped onto confidence.
const CONFIDENCE_SCALE: f64 = 0.8;

/// Number of factors surfaced as "key" by default.
pub const DEFAULT_KEY_FACTORS: usize = 3;

/// Streak length at which recent form saturates.
const MAX_STREAK: f64 = 5.0;

// ============================================================================
// Factor kinds & weights
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    TeamRecord,
    HeadToHead,
    Injuries,
    HomeAdvantage,
    Weather,
    RecentForm,
    RestDays,
    MatchupSpecific,
}

impl FactorKind {
    pub const ALL: [FactorKind; 8] = [
        FactorKind::TeamRecord,
        FactorKind::HeadToHead,
        FactorKind::Injuries,
        FactorKind::HomeAdvantage,
        FactorKind::Weather,
        FactorKind::RecentForm,
        FactorKind::RestDays,
        FactorKind::MatchupSpecific,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FactorKind::TeamRecord => "team_record",
            FactorKind::HeadToHead => "head_to_head",
            FactorKind::Injuries => "injuries",
            FactorKind::HomeAdvantage => "home_advantage",
            FactorKind::Weather => "weather",
            FactorKind::RecentForm => "recent_form",
            FactorKind::RestDays => "rest_days",
            FactorKind::MatchupSpecific => "matchup_specific",
        }
    }
}

impl fmt::Display for FactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category weights. `rest_days` and `matchup_specific` have no evaluator
/// yet but keep their slot in the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorWeights {
    pub team_record: f64,
    pub head_to_head: f64,
    pub injuries: f64,
    pub home_advantage: f64,
    pub weather: f64,
    pub recent_form: f64,
    pub rest_days: f64,
    pub matchup_specific: f64,
}

pub const DEFAULT_FACTOR_WEIGHTS: FactorWeights = FactorWeights {
    team_record: 0.20,
    head_to_head: 0.10,
    injuries: 0.15,
    home_advantage: 0.10,
    weather: 0.10,
    recent_form: 0.15,
    rest_days: 0.10,
    matchup_specific: 0.10,
};

impl Default for FactorWeights {
    fn default() -> Self {
        DEFAULT_FACTOR_WEIGHTS
    }
}

impl FactorWeights {
    pub fn weight(&self, kind: FactorKind) -> f64 {
        match kind {
            FactorKind::TeamRecord => self.team_record,
            FactorKind::HeadToHead => self.head_to_head,
            FactorKind::Injuries => self.injuries,
            FactorKind::HomeAdvantage => self.home_advantage,
            FactorKind::Weather => self.weather,
            FactorKind::RecentForm => self.recent_form,
            FactorKind::RestDays => self.rest_days,
            FactorKind::MatchupSpecific => self.matchup_specific,
        }
    }

    pub fn set(&mut self, kind: FactorKind, value: f64) {
        let slot = match kind {
            FactorKind::TeamRecord => &mut self.team_record,
            FactorKind::HeadToHead => &mut self.head_to_head,
            FactorKind::Injuries => &mut self.injuries,
            FactorKind::HomeAdvantage => &mut self.home_advantage,
            FactorKind::Weather => &mut self.weather,
            FactorKind::RecentForm => &mut self.recent_form,
            FactorKind::RestDays => &mut self.rest_days,
            FactorKind::MatchupSpecific => &mut self.matchup_specific,
        };
        *slot = value;
    }

    pub fn total(&self) -> f64 {
        FactorKind::ALL.iter().map(|k| self.weight(*k)).sum()
    }

    /// Every weight must be finite and within [0, 1].
    pub fn validate(&self) -> Result<()> {
        for kind in FactorKind::ALL {
            let value = self.weight(kind);
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ParlayError::InvalidWeight {
                    name: kind.as_str().to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Parse a (possibly partial) weight table; missing categories keep their
    /// default weight.
    pub fn from_json(raw: &str) -> Result<Self> {
        let weights: FactorWeights = serde_json::from_str(raw)?;
        weights.validate()?;
        Ok(weights)
    }
}

// ============================================================================
// Factor & FactorAnalysis
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub name: String,
    /// Signed magnitude (positive favors home)
    pub value: f64,
    /// Importance weight (0-1)
    pub weight: f64,
    pub description: String,
}

impl Factor {
    pub fn new(name: &str, value: f64, weight: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value,
            weight,
            description: description.into(),
        }
    }

    #[inline]
    pub fn weighted_value(&self) -> f64 {
        self.value * self.weight
    }
}

/// Scored factors for one matchup.
///
/// Side scores only grow, and only through [`FactorAnalysis::add_factor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorAnalysis {
    matchup_id: String,
    factors: Vec<Factor>,
    home_score: f64,
    away_score: f64,
    predicted_winner: Option<String>,
    confidence: f64,
}

impl FactorAnalysis {
    pub fn new(matchup_id: &str) -> Self {
        Self {
            matchup_id: matchup_id.to_string(),
            factors: Vec::new(),
            home_score: 0.0,
            away_score: 0.0,
            predicted_winner: None,
            confidence: MIN_CONFIDENCE,
        }
    }

    /// Append a factor. A strictly positive weighted value scores for home;
    /// anything else (including zero) scores its magnitude for away.
    pub fn add_factor(&mut self, factor: Factor) {
        let weighted = factor.weighted_value();
        if weighted > 0.0 {
            self.home_score += weighted;
        } else {
            self.away_score += weighted.abs();
        }
        self.factors.push(factor);
    }

    /// Fix the predicted winner and confidence from the accumulated scores.
    /// Ties go to the away side.
    pub fn finalize(&mut self, home_team_id: &str, away_team_id: &str) {
        self.confidence = calibrate_confidence(self.home_score, self.away_score);
        self.predicted_winner = Some(if self.favors_home() {
            home_team_id.to_string()
        } else {
            away_team_id.to_string()
        });
    }

    pub fn matchup_id(&self) -> &str {
        &self.matchup_id
    }

    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    pub fn factor(&self, name: &str) -> Option<&Factor> {
        self.factors.iter().find(|f| f.name == name)
    }

    pub fn home_score(&self) -> f64 {
        self.home_score
    }

    pub fn away_score(&self) -> f64 {
        self.away_score
    }

    pub fn total_score(&self) -> f64 {
        self.home_score + self.away_score
    }

    pub fn favors_home(&self) -> bool {
        self.home_score > self.away_score
    }

    pub fn predicted_winner(&self) -> Option<&str> {
        self.predicted_winner.as_deref()
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

/// Map side scores onto [0.5, 0.95].
///
/// `ratio = max / total` lies in [0.5, 1.0]; it is compressed by 0.8 and
/// clamped. Zero total yields exactly 0.5.
pub fn calibrate_confidence(home_score: f64, away_score: f64) -> f64 {
    let total = home_score + away_score;
    if total == 0.0 {
        return MIN_CONFIDENCE;
    }
    let ratio = home_score.max(away_score) / total;
    let confidence = MIN_CONFIDENCE + (ratio - 0.5) * CONFIDENCE_SCALE;
    confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

// ============================================================================
// Evaluators
// ============================================================================

/// One step of the analysis pipeline. `None` means the factor does not apply
/// to this matchup and contributes nothing.
pub type FactorEvaluator = fn(&Matchup, &FactorWeights) -> Option<Factor>;

/// Evaluation order is significant: it breaks ties in key-factor ranking.
pub const DEFAULT_EVALUATORS: &[FactorEvaluator] = &[
    evaluate_team_record,
    evaluate_head_to_head,
    evaluate_injuries,
    evaluate_home_advantage,
    evaluate_weather,
    evaluate_recent_form,
];

fn pct(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

pub fn evaluate_team_record(matchup: &Matchup, weights: &FactorWeights) -> Option<Factor> {
    let home_pct = matchup.home_team.stats.win_percentage();
    let away_pct = matchup.away_team.stats.win_percentage();
    let diff = home_pct - away_pct;

    let description = if diff > 0.2 {
        format!(
            "Home team ({}) significantly better record than away ({})",
            pct(home_pct),
            pct(away_pct)
        )
    } else if diff < -0.2 {
        format!(
            "Away team ({}) significantly better record than home ({})",
            pct(away_pct),
            pct(home_pct)
        )
    } else {
        format!("Similar records: Home {} vs Away {}", pct(home_pct), pct(away_pct))
    };

    let kind = FactorKind::TeamRecord;
    Some(Factor::new(kind.as_str(), diff, weights.weight(kind), description))
}

pub fn evaluate_head_to_head(matchup: &Matchup, weights: &FactorWeights) -> Option<Factor> {
    let kind = FactorKind::HeadToHead;
    let h2h = &matchup.head_to_head;
    let total = h2h.total_games();

    if total == 0 {
        return Some(Factor::new(
            kind.as_str(),
            0.0,
            weights.weight(kind),
            "No head-to-head history",
        ));
    }

    let home_pct = h2h.home_wins as f64 / total as f64;
    let away_pct = h2h.away_wins as f64 / total as f64;

    // Halved to damp series history
    Some(Factor::new(
        kind.as_str(),
        (home_pct - away_pct) * 0.5,
        weights.weight(kind),
        format!("H2H record: Home {}-{} Away", h2h.home_wins, h2h.away_wins),
    ))
}

pub fn evaluate_injuries(matchup: &Matchup, weights: &FactorWeights) -> Option<Factor> {
    let diff = matchup.injury_differential();

    let description = if diff > 0.3 {
        "Away team significantly more impacted by injuries"
    } else if diff < -0.3 {
        "Home team significantly more impacted by injuries"
    } else {
        "Similar injury situations for both teams"
    };

    let kind = FactorKind::Injuries;
    Some(Factor::new(kind.as_str(), diff, weights.weight(kind), description))
}

pub fn evaluate_home_advantage(matchup: &Matchup, weights: &FactorWeights) -> Option<Factor> {
    let kind = FactorKind::HomeAdvantage;

    if matchup.is_neutral_site {
        return Some(Factor::new(
            kind.as_str(),
            0.0,
            weights.weight(kind),
            "Neutral site - no home advantage",
        ));
    }

    Some(Factor::new(
        kind.as_str(),
        home_advantage_for(matchup.sport),
        weights.weight(kind),
        format!("Home field advantage for {}", matchup.home_team.full_name()),
    ))
}

/// Informational only: weather is scored as neutral between the two sides.
pub fn evaluate_weather(matchup: &Matchup, weights: &FactorWeights) -> Option<Factor> {
    let weather = matchup.weather.as_ref()?;
    let kind = FactorKind::Weather;

    let description = if weather.is_dome {
        "Indoor game - no weather impact".to_string()
    } else if !weather_affects(matchup.sport) {
        format!("Weather not a factor for {}", matchup.sport)
    } else {
        format!(
            "Weather impact: {}, {:.1}°F, wind {:.1}mph",
            weather.conditions, weather.temperature, weather.wind_speed
        )
    };

    Some(Factor::new(kind.as_str(), 0.0, weights.weight(kind), description))
}

fn streak_text(side: &str, streak: i32) -> String {
    if streak > 0 {
        format!("{} on {}W streak", side, streak)
    } else {
        format!("{} on {}L streak", side, streak.unsigned_abs())
    }
}

pub fn evaluate_recent_form(matchup: &Matchup, weights: &FactorWeights) -> Option<Factor> {
    let home_streak = matchup.home_team.stats.streak;
    let away_streak = matchup.away_team.stats.streak;

    let home_form = (home_streak as f64 / MAX_STREAK).clamp(-1.0, 1.0);
    let away_form = (away_streak as f64 / MAX_STREAK).clamp(-1.0, 1.0);

    let kind = FactorKind::RecentForm;
    Some(Factor::new(
        kind.as_str(),
        (home_form - away_form) * 0.5,
        weights.weight(kind),
        format!(
            "{}, {}",
            streak_text("Home", home_streak),
            streak_text("Away", away_streak)
        ),
    ))
}

// ============================================================================
// Analyzer
// ============================================================================

/// Runs the evaluator pipeline with a fixed weight table.
#[derive(Debug, Clone)]
pub struct FactorAnalyzer {
    weights: FactorWeights,
    evaluators: Vec<FactorEvaluator>,
}

impl Default for FactorAnalyzer {
    fn default() -> Self {
        Self::with_valid_weights(DEFAULT_FACTOR_WEIGHTS)
    }
}

impl FactorAnalyzer {
    /// Build an analyzer over `weights`. Any weight outside [0, 1] is
    /// rejected; a negative weight would flip the side a factor favors.
    pub fn new(weights: FactorWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self::with_valid_weights(weights))
    }

    fn with_valid_weights(weights: FactorWeights) -> Self {
        Self {
            weights,
            evaluators: DEFAULT_EVALUATORS.to_vec(),
        }
    }

    /// Append an evaluator after the default pipeline.
    pub fn with_evaluator(mut self, evaluator: FactorEvaluator) -> Self {
        self.evaluators.push(evaluator);
        self
    }

    pub fn weights(&self) -> &FactorWeights {
        &self.weights
    }

    pub fn analyze(&self, matchup: &Matchup) -> FactorAnalysis {
        let mut analysis = FactorAnalysis::new(&matchup.id);

        for evaluate in &self.evaluators {
            if let Some(factor) = evaluate(matchup, &self.weights) {
                analysis.add_factor(factor);
            }
        }

        analysis.finalize(&matchup.home_team.id, &matchup.away_team.id);

        debug!(
            matchup_id = %matchup.id,
            home_score = analysis.home_score(),
            away_score = analysis.away_score(),
            confidence = analysis.confidence(),
            "analyzed matchup"
        );

        analysis
    }

    /// Analyze many matchups in parallel. Output order matches input order.
    pub fn analyze_batch(&self, matchups: &[Matchup]) -> Vec<FactorAnalysis> {
        matchups.par_iter().map(|m| self.analyze(m)).collect()
    }

    /// The `top_n` factors with the largest absolute weighted value,
    /// descending. Equal magnitudes keep evaluation order.
    pub fn get_key_factors(analysis: &FactorAnalysis, top_n: usize) -> Vec<&Factor> {
        let mut ranked: Vec<&Factor> = analysis.factors().iter().collect();
        ranked.sort_by(|a, b| b.weighted_value().abs().total_cmp(&a.weighted_value().abs()));
        ranked.truncate(top_n);
        ranked
    }
}
