//! Pick generation and parlay assembly.
//!
//! Every `predict_*` call is a pure function of a matchup and its analysis.
//! [`ParlayPredictor::generate_parlay`] ranks matchups by analysis confidence
//! and keeps the strongest allowed bet for each of the top `num_legs`.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, info};

use super::factors::{FactorAnalysis, FactorAnalyzer, DEFAULT_KEY_FACTORS};
use crate::error::ParlayError;
use crate::models::{BetType, Matchup, Parlay, ParlayLeg, PickConfidence, Sport};

/// Spread beyond which the chosen side is already a large market favorite.
const LARGE_FAVORITE_SPREAD: f64 = 7.0;
/// Dampener applied when backing a large favorite against the spread.
const LARGE_FAVORITE_DAMPENER: f64 = 0.9;
/// Totals are scored below side bets.
const TOTAL_CONFIDENCE_FACTOR: f64 = 0.85;
/// Season points-for above which an offense counts toward the over.
const HIGH_SCORING_POINTS_FOR: u32 = 25 * 17;
/// Season points-against above which a defense counts toward the over.
const LEAKY_DEFENSE_POINTS_AGAINST: u32 = 23 * 17;
/// Net indicator count needed to take the over.
const OVER_INDICATOR_THRESHOLD: i32 = 2;

pub const MIXED_SPORT_LABEL: &str = "mixed";

// ============================================================================
// Policy
// ============================================================================

/// How many legs to build, which markets to use and the confidence bar a
/// matchup must clear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParlayPolicy {
    pub num_legs: usize,
    pub bet_types: Vec<BetType>,
    pub min_confidence: f64,
}

impl ParlayPolicy {
    /// Two high-confidence side bets.
    pub fn safe() -> Self {
        Self {
            num_legs: 2,
            bet_types: vec![BetType::Spread, BetType::Moneyline],
            min_confidence: 0.60,
        }
    }

    pub fn normal() -> Self {
        Self {
            num_legs: 3,
            bet_types: vec![BetType::Spread, BetType::Moneyline],
            min_confidence: 0.50,
        }
    }

    /// Five legs across sides and totals with a low bar.
    pub fn aggressive() -> Self {
        Self {
            num_legs: 5,
            bet_types: vec![
                BetType::Spread,
                BetType::Moneyline,
                BetType::Over,
                BetType::Under,
            ],
            min_confidence: 0.45,
        }
    }

    pub fn allows(&self, bet_type: BetType) -> bool {
        self.bet_types.contains(&bet_type)
    }
}

impl Default for ParlayPolicy {
    fn default() -> Self {
        Self::normal()
    }
}

impl FromStr for ParlayPolicy {
    type Err = ParlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "safe" | "conservative" => Ok(Self::safe()),
            "normal" => Ok(Self::normal()),
            "aggressive" => Ok(Self::aggressive()),
            _ => Err(ParlayError::UnknownPolicy(s.to_string())),
        }
    }
}

// ============================================================================
// Predictor
// ============================================================================

#[derive(Debug, Clone)]
pub struct ParlayPredictor {
    analyzer: FactorAnalyzer,
    key_factor_count: usize,
}

impl Default for ParlayPredictor {
    fn default() -> Self {
        Self::new(FactorAnalyzer::default())
    }
}

impl ParlayPredictor {
    pub fn new(analyzer: FactorAnalyzer) -> Self {
        Self {
            analyzer,
            key_factor_count: DEFAULT_KEY_FACTORS,
        }
    }

    pub fn with_key_factor_count(mut self, count: usize) -> Self {
        self.key_factor_count = count;
        self
    }

    pub fn analyzer(&self) -> &FactorAnalyzer {
        &self.analyzer
    }

    pub fn analyze_matchup(&self, matchup: &Matchup) -> FactorAnalysis {
        self.analyzer.analyze(matchup)
    }

    pub fn confidence_tier(score: f64) -> PickConfidence {
        PickConfidence::from_score(score)
    }

    pub fn predict_spread(&self, matchup: &Matchup, analysis: &FactorAnalysis) -> ParlayLeg {
        let spread = matchup.odds.spread;
        let take_home = analysis.favors_home();

        let mut confidence_score = analysis.confidence();
        let large_favorite = (take_home && spread < -LARGE_FAVORITE_SPREAD)
            || (!take_home && spread > LARGE_FAVORITE_SPREAD);
        if large_favorite {
            confidence_score *= LARGE_FAVORITE_DAMPENER;
        }

        let (team, line) = if take_home {
            (&matchup.home_team, spread)
        } else {
            (&matchup.away_team, -spread)
        };

        ParlayLeg {
            matchup_id: matchup.id.clone(),
            team_id: Some(team.id.clone()),
            bet_type: BetType::Spread,
            pick: format!("{} {}", team.abbreviation, signed_line(line)),
            odds: matchup.odds.spread_odds,
            confidence: Self::confidence_tier(confidence_score),
            confidence_score,
            reasoning: self.side_reasoning(analysis, BetType::Spread, take_home),
            key_factors: self.key_factor_descriptions(analysis),
        }
    }

    pub fn predict_moneyline(&self, matchup: &Matchup, analysis: &FactorAnalysis) -> ParlayLeg {
        let take_home = analysis.favors_home();
        let confidence_score = analysis.confidence();

        let (team, odds) = if take_home {
            (&matchup.home_team, matchup.odds.moneyline_home)
        } else {
            (&matchup.away_team, matchup.odds.moneyline_away)
        };

        ParlayLeg {
            matchup_id: matchup.id.clone(),
            team_id: Some(team.id.clone()),
            bet_type: BetType::Moneyline,
            pick: format!("{} ML", team.abbreviation),
            odds,
            confidence: Self::confidence_tier(confidence_score),
            confidence_score,
            reasoning: self.side_reasoning(analysis, BetType::Moneyline, take_home),
            key_factors: self.key_factor_descriptions(analysis),
        }
    }

    pub fn predict_total(&self, matchup: &Matchup, analysis: &FactorAnalysis) -> ParlayLeg {
        let take_over = predicts_over(matchup);
        let confidence_score = analysis.confidence() * TOTAL_CONFIDENCE_FACTOR;
        let line = matchup.odds.over_under;

        let (bet_type, pick, odds) = if take_over {
            (BetType::Over, format!("OVER {:.1}", line), matchup.odds.over_odds)
        } else {
            (BetType::Under, format!("UNDER {:.1}", line), matchup.odds.under_odds)
        };

        ParlayLeg {
            matchup_id: matchup.id.clone(),
            team_id: None,
            bet_type,
            pick,
            odds,
            confidence: Self::confidence_tier(confidence_score),
            confidence_score,
            reasoning: format!(
                "Expecting game to go {} based on team scoring trends",
                if take_over { "over" } else { "under" }
            ),
            key_factors: total_factors(matchup),
        }
    }

    /// Highest-confidence leg among the allowed bet types, generated in the
    /// order spread, moneyline, total. Equal scores keep the earlier leg.
    pub fn choose_best_bet(
        &self,
        matchup: &Matchup,
        analysis: &FactorAnalysis,
        allowed: &[BetType],
    ) -> Option<ParlayLeg> {
        let mut candidates = Vec::with_capacity(3);

        if allowed.contains(&BetType::Spread) {
            candidates.push(self.predict_spread(matchup, analysis));
        }
        if allowed.contains(&BetType::Moneyline) {
            candidates.push(self.predict_moneyline(matchup, analysis));
        }
        if allowed.contains(&BetType::Over) || allowed.contains(&BetType::Under) {
            let total = self.predict_total(matchup, analysis);
            if allowed.contains(&total.bet_type) {
                candidates.push(total);
            }
        }

        candidates.into_iter().fold(None, |best, leg| match best {
            Some(current) if current.confidence_score >= leg.confidence_score => Some(current),
            _ => Some(leg),
        })
    }

    pub fn generate_parlay(
        &self,
        matchups: &[Matchup],
        policy: &ParlayPolicy,
        stake: f64,
    ) -> Parlay {
        let mut ranked: Vec<(&Matchup, FactorAnalysis)> = matchups
            .iter()
            .map(|m| (m, self.analyze_matchup(m)))
            .filter(|(m, analysis)| {
                let clears = analysis.confidence() >= policy.min_confidence;
                if !clears {
                    debug!(
                        matchup_id = %m.id,
                        confidence = analysis.confidence(),
                        min_confidence = policy.min_confidence,
                        "matchup below confidence bar"
                    );
                }
                clears
            })
            .collect();

        // Stable: equal confidence keeps input order
        ranked.sort_by(|a, b| b.1.confidence().total_cmp(&a.1.confidence()));
        ranked.truncate(policy.num_legs);

        let legs: Vec<ParlayLeg> = ranked
            .iter()
            .filter_map(|(matchup, analysis)| {
                let leg = self.choose_best_bet(matchup, analysis, &policy.bet_types);
                if leg.is_none() {
                    debug!(matchup_id = %matchup.id, "no eligible bet type, skipping");
                }
                leg
            })
            .collect();

        let sport = sport_label(ranked.iter().map(|(m, _)| m.sport));
        let name = format!("Auto Parlay - {}", Utc::now().format("%Y-%m-%d"));
        let parlay = Parlay::new(legs, stake, &sport, &name);

        info!(
            parlay_id = %parlay.id,
            legs = parlay.num_legs(),
            requested = policy.num_legs,
            american_odds = parlay.american_odds(),
            "generated parlay"
        );

        parlay
    }

    pub fn generate_safe_parlay(&self, matchups: &[Matchup], stake: f64) -> Parlay {
        self.generate_parlay(matchups, &ParlayPolicy::safe(), stake)
    }

    pub fn generate_aggressive_parlay(&self, matchups: &[Matchup], stake: f64) -> Parlay {
        self.generate_parlay(matchups, &ParlayPolicy::aggressive(), stake)
    }

    fn key_factor_descriptions(&self, analysis: &FactorAnalysis) -> Vec<String> {
        FactorAnalyzer::get_key_factors(analysis, self.key_factor_count)
            .into_iter()
            .map(|f| f.description.clone())
            .collect()
    }

    fn side_reasoning(
        &self,
        analysis: &FactorAnalysis,
        bet_type: BetType,
        take_home: bool,
    ) -> String {
        let side = if take_home { "home team" } else { "away team" };
        let reasons: Vec<&str> = FactorAnalyzer::get_key_factors(analysis, self.key_factor_count)
            .into_iter()
            .map(|f| f.description.as_str())
            .filter(|d| !d.is_empty())
            .collect();
        let reason_text = if reasons.is_empty() {
            "Balanced analysis".to_string()
        } else {
            reasons.join("; ")
        };
        format!("Taking {} on {}: {}", side, bet_type, reason_text)
    }
}

/// Spread line with explicit sign; never renders "-0.0".
fn signed_line(line: f64) -> String {
    let line = if line == 0.0 { 0.0 } else { line };
    format!("{:+.1}", line)
}

/// Over iff strong offenses plus leaky defenses, less disruptive weather,
/// net at least two.
fn predicts_over(matchup: &Matchup) -> bool {
    let home = &matchup.home_team.stats;
    let away = &matchup.away_team.stats;

    let mut indicators = 0i32;
    for stats in [home, away] {
        if stats.points_for > HIGH_SCORING_POINTS_FOR {
            indicators += 1;
        }
        if stats.points_against > LEAKY_DEFENSE_POINTS_AGAINST {
            indicators += 1;
        }
    }
    if matchup.has_disruptive_weather() {
        indicators -= 1;
    }

    indicators >= OVER_INDICATOR_THRESHOLD
}

fn total_factors(matchup: &Matchup) -> Vec<String> {
    let mut factors = vec![
        format!(
            "Home team averaging {:.1} points per game",
            matchup.home_team.stats.points_per_game()
        ),
        format!(
            "Away team averaging {:.1} points per game",
            matchup.away_team.stats.points_per_game()
        ),
    ];

    if let Some(weather) = matchup.weather.as_ref().filter(|_| matchup.has_disruptive_weather()) {
        factors.push(format!("Weather may impact scoring: {}", weather.conditions));
    }

    factors
}

fn sport_label(sports: impl Iterator<Item = Sport>) -> String {
    let mut distinct: Vec<Sport> = Vec::new();
    for sport in sports {
        if !distinct.contains(&sport) {
            distinct.push(sport);
        }
    }
    match distinct.as_slice() {
        [single] => single.as_str().to_string(),
        _ => MIXED_SPORT_LABEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Odds, Team, TeamStats, Weather};

    fn team(id: &str, wins: u32, losses: u32, points_for: u32, points_against: u32) -> Team {
        Team::new(id, id, &id.to_uppercase(), "City", Sport::NFL).with_stats(TeamStats {
            wins,
            losses,
            points_for,
            points_against,
            ..Default::default()
        })
    }

    fn matchup(id: &str, home: Team, away: Team, spread: f64) -> Matchup {
        let mut m = Matchup::new(id, Sport::NFL, home, away);
        m.odds = Odds {
            spread,
            spread_odds: -110,
            moneyline_home: -150,
            moneyline_away: 130,
            over_under: 47.5,
            over_odds: -105,
            under_odds: -115,
        };
        m
    }

    fn home_favored(id: &str, spread: f64) -> Matchup {
        matchup(id, team("kc", 8, 2, 300, 200), team("buf", 3, 7, 300, 200), spread)
    }

    #[test]
    fn test_spread_pick_and_dampener() {
        let predictor = ParlayPredictor::default();

        let m = home_favored("g1", -3.5);
        let analysis = predictor.analyze_matchup(&m);
        let leg = predictor.predict_spread(&m, &analysis);
        assert_eq!(leg.pick, "KC -3.5");
        assert_eq!(leg.team_id.as_deref(), Some("kc"));
        assert_eq!(leg.odds, -110);
        assert!((leg.confidence_score - analysis.confidence()).abs() < 1e-12);

        let m = home_favored("g2", -10.0);
        let analysis = predictor.analyze_matchup(&m);
        let leg = predictor.predict_spread(&m, &analysis);
        assert_eq!(leg.pick, "KC -10.0");
        assert!((leg.confidence_score - analysis.confidence() * 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_spread_away_side_flips_line() {
        let predictor = ParlayPredictor::default();
        let m = matchup("g1", team("kc", 2, 8, 300, 200), team("buf", 9, 1, 300, 200), 3.0);
        let analysis = predictor.analyze_matchup(&m);
        let leg = predictor.predict_spread(&m, &analysis);
        assert_eq!(leg.pick, "BUF -3.0");
        assert!(leg.reasoning.starts_with("Taking away team on spread: "));

        let m = matchup("g2", team("kc", 2, 8, 300, 200), team("buf", 9, 1, 300, 200), 0.0);
        let analysis = predictor.analyze_matchup(&m);
        assert_eq!(predictor.predict_spread(&m, &analysis).pick, "BUF +0.0");
    }

    #[test]
    fn test_moneyline_uses_side_price() {
        let predictor = ParlayPredictor::default();
        let m = home_favored("g1", -3.5);
        let analysis = predictor.analyze_matchup(&m);
        let leg = predictor.predict_moneyline(&m, &analysis);
        assert_eq!(leg.pick, "KC ML");
        assert_eq!(leg.odds, -150);
        assert_eq!(leg.confidence_score, analysis.confidence());
        assert_eq!(leg.key_factors.len(), 3);
    }

    #[test]
    fn test_total_direction() {
        let predictor = ParlayPredictor::default();

        // Two strong offenses -> over
        let m = matchup("g1", team("kc", 5, 5, 450, 300), team("buf", 5, 5, 430, 300), 0.0);
        let analysis = predictor.analyze_matchup(&m);
        let leg = predictor.predict_total(&m, &analysis);
        assert_eq!(leg.bet_type, BetType::Over);
        assert_eq!(leg.pick, "OVER 47.5");
        assert_eq!(leg.odds, -105);
        assert!((leg.confidence_score - analysis.confidence() * 0.85).abs() < 1e-12);
        assert!(leg.team_id.is_none());

        // Disruptive weather knocks it back under
        let mut m = m;
        m.weather = Some(Weather {
            is_dome: false,
            wind_speed: 22.0,
            conditions: "Windy".to_string(),
            ..Weather::dome()
        });
        let leg = predictor.predict_total(&m, &analysis);
        assert_eq!(leg.bet_type, BetType::Under);
        assert_eq!(leg.odds, -115);
        assert!(leg
            .key_factors
            .contains(&"Weather may impact scoring: Windy".to_string()));
    }

    #[test]
    fn test_choose_best_bet_tie_keeps_spread() {
        let predictor = ParlayPredictor::default();
        let m = home_favored("g1", -3.5);
        let analysis = predictor.analyze_matchup(&m);
        let leg = predictor
            .choose_best_bet(&m, &analysis, &[BetType::Spread, BetType::Moneyline])
            .unwrap();
        assert_eq!(leg.bet_type, BetType::Spread);
    }

    #[test]
    fn test_choose_best_bet_respects_allowed_types() {
        let predictor = ParlayPredictor::default();
        let m = home_favored("g1", -3.5);
        let analysis = predictor.analyze_matchup(&m);

        // Model leans under here; only over allowed -> nothing eligible
        assert!(predictor
            .choose_best_bet(&m, &analysis, &[BetType::Over])
            .is_none());
        assert!(predictor.choose_best_bet(&m, &analysis, &[]).is_none());

        let leg = predictor
            .choose_best_bet(&m, &analysis, &[BetType::Under])
            .unwrap();
        assert_eq!(leg.bet_type, BetType::Under);
    }

    #[test]
    fn test_policy_presets_and_parse() {
        let safe: ParlayPolicy = "safe".parse().unwrap();
        assert_eq!(safe, ParlayPolicy::safe());
        assert_eq!(safe.num_legs, 2);
        assert_eq!(safe.min_confidence, 0.60);

        let aggressive: ParlayPolicy = "Aggressive".parse().unwrap();
        assert_eq!(aggressive.num_legs, 5);
        assert!(aggressive.allows(BetType::Under));
        assert!(!ParlayPolicy::normal().allows(BetType::Over));

        assert!("yolo".parse::<ParlayPolicy>().is_err());
    }

    #[test]
    fn test_sport_label() {
        assert_eq!(sport_label([Sport::NBA, Sport::NBA].into_iter()), "NBA");
        assert_eq!(sport_label([Sport::NBA, Sport::NHL].into_iter()), "mixed");
        assert_eq!(sport_label(std::iter::empty()), "mixed");
    }

    #[test]
    fn test_generate_parlay_filters_and_ranks() {
        let predictor = ParlayPredictor::default();
        // Record favors home, form favors away -> lower confidence
        let strong = home_favored("strong", -3.5);
        let mut split = matchup(
            "split",
            team("h", 6, 4, 300, 200),
            team("a", 4, 6, 300, 200),
            -1.0,
        );
        split.away_team.stats.streak = 5;

        let parlay = predictor.generate_parlay(
            &[split.clone(), strong.clone()],
            &ParlayPolicy::normal(),
            10.0,
        );
        assert_eq!(parlay.num_legs(), 2);
        assert_eq!(parlay.legs()[0].matchup_id, "strong");
        assert_eq!(parlay.sport, "NFL");

        let split_conf = predictor.analyze_matchup(&split).confidence();
        let strong_conf = predictor.analyze_matchup(&strong).confidence();
        assert!(split_conf < strong_conf);

        let bar = ParlayPolicy {
            num_legs: 5,
            bet_types: vec![BetType::Moneyline],
            min_confidence: (split_conf + strong_conf) / 2.0,
        };
        let parlay = predictor.generate_parlay(&[split, strong], &bar, 10.0);
        assert_eq!(parlay.num_legs(), 1);
        assert_eq!(parlay.legs()[0].bet_type, BetType::Moneyline);
    }
}
