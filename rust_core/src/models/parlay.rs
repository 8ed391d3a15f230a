use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::utils::money::Money;
use crate::utils::odds::{self, AmericanPriced};

// ============================================================================
// Bet Types & Confidence Tiers
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetType {
    Spread,
    Moneyline,
    Over,
    Under,
    Prop,
}

impl BetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BetType::Spread => "spread",
            BetType::Moneyline => "moneyline",
            BetType::Over => "over",
            BetType::Under => "under",
            BetType::Prop => "prop",
        }
    }
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickConfidence {
    Low,
    Medium,
    High,
    VeryHigh,
}

/// Tier thresholds, highest first. The first threshold the score reaches wins.
pub const CONFIDENCE_TIERS: [(f64, PickConfidence); 4] = [
    (0.70, PickConfidence::VeryHigh),
    (0.60, PickConfidence::High),
    (0.50, PickConfidence::Medium),
    (0.0, PickConfidence::Low),
];

impl PickConfidence {
    pub fn from_score(score: f64) -> Self {
        CONFIDENCE_TIERS
            .iter()
            .find(|(threshold, _)| score >= *threshold)
            .map(|(_, tier)| *tier)
            .unwrap_or(PickConfidence::Low)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PickConfidence::Low => "low",
            PickConfidence::Medium => "medium",
            PickConfidence::High => "high",
            PickConfidence::VeryHigh => "very_high",
        }
    }
}

impl fmt::Display for PickConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Parlay Leg
// ============================================================================

/// One recommended bet. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParlayLeg {
    pub matchup_id: String,
    pub team_id: Option<String>,
    pub bet_type: BetType,
    /// e.g. "KC -3.5", "OVER 48.5"
    pub pick: String,
    /// American odds
    pub odds: i32,
    pub confidence: PickConfidence,
    pub confidence_score: f64,
    pub reasoning: String,
    pub key_factors: Vec<String>,
}

impl ParlayLeg {
    pub fn implied_probability(&self) -> f64 {
        odds::implied_probability(self.odds)
    }

    pub fn decimal_odds(&self) -> f64 {
        odds::american_to_decimal(self.odds)
    }
}

impl AmericanPriced for ParlayLeg {
    fn american_odds(&self) -> i32 {
        self.odds
    }
}

/// Serialized view of a leg including its derived prices.
#[derive(Debug, Clone, Serialize)]
pub struct LegReport {
    #[serde(flatten)]
    pub leg: ParlayLeg,
    pub implied_probability: f64,
    pub decimal_odds: f64,
}

impl From<&ParlayLeg> for LegReport {
    fn from(leg: &ParlayLeg) -> Self {
        Self {
            leg: leg.clone(),
            implied_probability: leg.implied_probability(),
            decimal_odds: leg.decimal_odds(),
        }
    }
}

// ============================================================================
// Parlay
// ============================================================================

/// A multi-leg wager.
///
/// Aggregates (odds, payout, probability) are computed from `legs` and `stake`
/// on every call; nothing derived is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parlay {
    pub id: String,
    legs: Vec<ParlayLeg>,
    stake: f64,
    /// Common sport code of the legs, or "mixed"
    pub sport: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Parlay {
    pub fn new(legs: Vec<ParlayLeg>, stake: f64, sport: &str, name: &str) -> Self {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(8);
        Self {
            id,
            legs,
            stake: stake.max(0.0),
            sport: sport.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn legs(&self) -> &[ParlayLeg] {
        &self.legs
    }

    pub fn stake(&self) -> f64 {
        self.stake
    }

    pub fn num_legs(&self) -> usize {
        self.legs.len()
    }

    /// Product of every leg's decimal odds (0.0 with no legs).
    pub fn total_odds(&self) -> f64 {
        odds::combine(&self.legs).decimal_odds
    }

    pub fn american_odds(&self) -> i32 {
        odds::combine(&self.legs).american_odds
    }

    pub fn potential_payout(&self) -> f64 {
        odds::payout(self.stake, &self.legs).total_payout
    }

    pub fn potential_profit(&self) -> f64 {
        odds::payout(self.stake, &self.legs).profit
    }

    pub fn average_confidence(&self) -> f64 {
        if self.legs.is_empty() {
            return 0.0;
        }
        self.legs.iter().map(|l| l.confidence_score).sum::<f64>() / self.legs.len() as f64
    }

    /// Product of leg confidence scores.
    ///
    /// NOTE: confidence scores are calibrated certainty values, not outcome
    /// probabilities, and legs are treated as independent. Kept multiplicative
    /// for compatibility with existing consumers.
    pub fn implied_win_probability(&self) -> f64 {
        if self.legs.is_empty() {
            return 0.0;
        }
        self.legs.iter().map(|l| l.confidence_score).product()
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("{} ({} legs)", self.name, self.num_legs()),
            format!("   Stake: {}", Money::from_dollars(self.stake)),
            format!("   Odds: {:+}", self.american_odds()),
            format!(
                "   Potential Payout: {}",
                Money::from_dollars(self.potential_payout())
            ),
            format!("   Avg Confidence: {:.1}%", self.average_confidence() * 100.0),
            String::new(),
            "   Legs:".to_string(),
        ];

        for (i, leg) in self.legs.iter().enumerate() {
            let marker = if leg.confidence_score >= 0.6 {
                "[+]"
            } else if leg.confidence_score >= 0.4 {
                "[~]"
            } else {
                "[-]"
            };
            lines.push(format!(
                "   {}. {} {} ({:+}) - {}",
                i + 1,
                marker,
                leg.pick,
                leg.odds,
                leg.confidence
            ));
        }

        lines.join("\n")
    }

    pub fn report(&self) -> ParlayReport {
        ParlayReport {
            id: self.id.clone(),
            name: self.name.clone(),
            sport: self.sport.clone(),
            num_legs: self.num_legs(),
            stake: self.stake,
            total_odds: self.total_odds(),
            american_odds: self.american_odds(),
            potential_payout: self.potential_payout(),
            potential_profit: self.potential_profit(),
            average_confidence: self.average_confidence(),
            implied_win_probability: self.implied_win_probability(),
            created_at: self.created_at,
            legs: self.legs.iter().map(LegReport::from).collect(),
        }
    }
}

/// Point-in-time snapshot of a parlay and its derived metrics.
#[derive(Debug, Clone, Serialize)]
pub struct ParlayReport {
    pub id: String,
    pub name: String,
    pub sport: String,
    pub num_legs: usize,
    pub stake: f64,
    pub total_odds: f64,
    pub american_odds: i32,
    pub potential_payout: f64,
    pub potential_profit: f64,
    pub average_confidence: f64,
    pub implied_win_probability: f64,
    pub created_at: DateTime<Utc>,
    pub legs: Vec<LegReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(odds: i32, confidence_score: f64) -> ParlayLeg {
        ParlayLeg {
            matchup_id: "g1".to_string(),
            team_id: Some("kc".to_string()),
            bet_type: BetType::Spread,
            pick: "KC -3.5".to_string(),
            odds,
            confidence: PickConfidence::from_score(confidence_score),
            confidence_score,
            reasoning: String::new(),
            key_factors: Vec::new(),
        }
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(PickConfidence::from_score(0.95), PickConfidence::VeryHigh);
        assert_eq!(PickConfidence::from_score(0.70), PickConfidence::VeryHigh);
        assert_eq!(PickConfidence::from_score(0.6999), PickConfidence::High);
        assert_eq!(PickConfidence::from_score(0.60), PickConfidence::High);
        assert_eq!(PickConfidence::from_score(0.50), PickConfidence::Medium);
        assert_eq!(PickConfidence::from_score(0.45), PickConfidence::Low);
        assert_eq!(PickConfidence::from_score(-1.0), PickConfidence::Low);
    }

    #[test]
    fn test_leg_derived_prices() {
        let l = leg(150, 0.6);
        assert!((l.decimal_odds() - 2.5).abs() < 1e-9);
        assert!((l.implied_probability() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_parlay_aggregates() {
        let parlay = Parlay::new(vec![leg(-110, 0.6), leg(-110, 0.7)], 10.0, "NFL", "Test");
        assert_eq!(parlay.num_legs(), 2);
        assert!((parlay.total_odds() - 3.6446).abs() < 0.001);
        assert_eq!(parlay.american_odds(), 264);
        assert!((parlay.potential_payout() - 36.45).abs() < 1e-9);
        assert!((parlay.potential_profit() - 26.45).abs() < 1e-9);
        assert!((parlay.average_confidence() - 0.65).abs() < 1e-9);
        assert!((parlay.implied_win_probability() - 0.42).abs() < 1e-9);
        assert_eq!(parlay.id.len(), 8);
    }

    #[test]
    fn test_empty_parlay_is_all_zero() {
        let parlay = Parlay::new(Vec::new(), 10.0, "mixed", "Empty");
        assert_eq!(parlay.total_odds(), 0.0);
        assert_eq!(parlay.american_odds(), 0);
        assert_eq!(parlay.potential_payout(), 0.0);
        assert_eq!(parlay.potential_profit(), 0.0);
        assert_eq!(parlay.average_confidence(), 0.0);
        assert_eq!(parlay.implied_win_probability(), 0.0);
    }

    #[test]
    fn test_negative_stake_clamped() {
        let parlay = Parlay::new(vec![leg(-110, 0.6)], -5.0, "NFL", "Test");
        assert_eq!(parlay.stake(), 0.0);
        assert_eq!(parlay.potential_payout(), 0.0);
    }

    #[test]
    fn test_single_leg_payout() {
        let parlay = Parlay::new(vec![leg(-110, 0.6)], 100.0, "NFL", "Test");
        assert!((parlay.potential_payout() - 190.91).abs() < 1e-9);
        assert!((parlay.potential_profit() - 90.91).abs() < 1e-9);

        let parlay = Parlay::new(vec![leg(150, 0.6)], 100.0, "NFL", "Test");
        assert!((parlay.potential_payout() - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_lists_legs() {
        let parlay = Parlay::new(vec![leg(-110, 0.65), leg(120, 0.45)], 10.0, "NFL", "Sunday");
        let summary = parlay.summary();
        assert!(summary.starts_with("Sunday (2 legs)"));
        assert!(summary.contains("Stake: $10.00"));
        assert!(summary.contains("1. [+] KC -3.5 (-110) - high"));
        assert!(summary.contains("2. [~] KC -3.5 (+120) - low"));
    }

    #[test]
    fn test_report_serializes_derived_fields() {
        let parlay = Parlay::new(vec![leg(-110, 0.6)], 10.0, "NFL", "Test");
        let json = serde_json::to_value(parlay.report()).unwrap();
        assert_eq!(json["num_legs"], 1);
        assert_eq!(json["american_odds"], -110);
        assert_eq!(json["legs"][0]["bet_type"], "spread");
        assert_eq!(json["legs"][0]["confidence"], "high");
        assert!(json["legs"][0]["implied_probability"].as_f64().unwrap() > 0.5);
    }
}
