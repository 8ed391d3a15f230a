//! Manual parlay calculator and value-bet suggestions.
//!
//! This module provides:
//! - `BetSelection` / `BetSlip` for building a parlay by hand
//! - `BetSlipReport` with combined odds, probability and payout
//! - Odds-feed types and `suggest_value_bets` for shortlisting outcomes

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::error::{ParlayError, Result};
use crate::utils::money::{round2, Money};
use crate::utils::odds::{self, AmericanPriced};

// ============================================================================
// Selections
// ============================================================================

/// One outcome picked from a bookmaker market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetSelection {
    pub game_id: String,
    pub game_description: String,
    pub selection_name: String,
    /// Market key, e.g. `h2h`, `spreads`, `totals`
    pub market: String,
    /// American odds
    pub odds: i32,
    /// Line for spreads and totals
    pub point: Option<f64>,
}

impl BetSelection {
    pub fn new(
        game_id: &str,
        game_description: &str,
        selection_name: &str,
        market: &str,
        odds: i32,
        point: Option<f64>,
    ) -> Self {
        Self {
            game_id: game_id.to_string(),
            game_description: game_description.to_string(),
            selection_name: selection_name.to_string(),
            market: market.to_string(),
            odds,
            point,
        }
    }

    pub fn implied_probability(&self) -> f64 {
        odds::implied_probability(self.odds)
    }
}

impl AmericanPriced for BetSelection {
    fn american_odds(&self) -> i32 {
        self.odds
    }
}

impl fmt::Display for BetSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.point {
            Some(point) => write!(
                f,
                "{} ({} {:+.1}) @ {:+}",
                self.selection_name, self.market, point, self.odds
            ),
            None => write!(f, "{} ({}) @ {:+}", self.selection_name, self.market, self.odds),
        }
    }
}

// ============================================================================
// Bet slip
// ============================================================================

/// A hand-built parlay: at most one selection per game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BetSlip {
    selections: Vec<BetSelection>,
    stake: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetSlipReport {
    pub num_legs: usize,
    pub stake: f64,
    pub combined_decimal_odds: f64,
    pub combined_american_odds: i32,
    pub implied_probability_percent: f64,
    pub potential_payout: f64,
    pub potential_profit: f64,
    pub selections: Vec<String>,
}

impl BetSlip {
    pub fn new(stake: f64) -> Self {
        Self {
            selections: Vec::new(),
            stake: stake.max(0.0),
        }
    }

    pub fn selections(&self) -> &[BetSelection] {
        &self.selections
    }

    pub fn stake(&self) -> f64 {
        self.stake
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Add a selection. A second selection on the same game is rejected.
    pub fn add_selection(&mut self, selection: BetSelection) -> Result<()> {
        if self.selections.iter().any(|s| s.game_id == selection.game_id) {
            warn!(game_id = %selection.game_id, "game already in parlay, not adding");
            return Err(ParlayError::DuplicateGame(selection.game_id));
        }
        self.selections.push(selection);
        Ok(())
    }

    /// Remove by position. Returns false for an out-of-range index.
    pub fn remove_selection(&mut self, index: usize) -> bool {
        if index < self.selections.len() {
            self.selections.remove(index);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }

    /// Negative stakes clamp to zero.
    pub fn set_stake(&mut self, stake: f64) {
        self.stake = stake.max(0.0);
    }

    pub fn analyze(&self) -> BetSlipReport {
        let combined = odds::combine(&self.selections);
        let payout = odds::payout(self.stake, &self.selections);

        BetSlipReport {
            num_legs: self.selections.len(),
            stake: self.stake,
            combined_decimal_odds: round2(combined.decimal_odds),
            combined_american_odds: combined.american_odds,
            implied_probability_percent: round2(combined.implied_probability),
            potential_payout: payout.total_payout,
            potential_profit: payout.profit,
            selections: self.selections.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn format_summary(&self) -> String {
        if self.selections.is_empty() {
            return "No selections in parlay.".to_string();
        }

        let report = self.analyze();
        let rule = "=".repeat(50);
        let mut lines = vec![
            rule.clone(),
            "PARLAY SUMMARY".to_string(),
            rule.clone(),
            format!("Number of Legs: {}", report.num_legs),
            String::new(),
            "Selections:".to_string(),
        ];

        for (i, selection) in report.selections.iter().enumerate() {
            lines.push(format!("  {}. {}", i + 1, selection));
        }

        lines.extend([
            String::new(),
            format!(
                "Combined Odds: {:+} (Decimal: {})",
                report.combined_american_odds, report.combined_decimal_odds
            ),
            format!(
                "Implied Win Probability: {:.2}%",
                report.implied_probability_percent
            ),
            String::new(),
            format!("Stake: {}", Money::from_dollars(report.stake)),
            format!("Potential Payout: {}", Money::from_dollars(report.potential_payout)),
            format!("Potential Profit: {}", Money::from_dollars(report.potential_profit)),
            rule,
        ]);

        lines.join("\n")
    }
}

// ============================================================================
// Odds feed
// ============================================================================

/// A game as delivered by the odds feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OddsFeedGame {
    pub id: String,
    pub sport_key: String,
    pub home_team: String,
    pub away_team: String,
    pub commence_time: Option<String>,
    pub bookmakers: Vec<Bookmaker>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bookmaker {
    pub key: String,
    pub title: String,
    pub markets: Vec<Market>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Market {
    pub key: String,
    pub outcomes: Vec<Outcome>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Outcome {
    pub name: String,
    /// American odds; `0` marks a missing price
    pub price: i32,
    pub point: Option<f64>,
}

impl OddsFeedGame {
    pub fn description(&self) -> String {
        format!("{} @ {}", self.away_team, self.home_team)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueBet {
    pub selection: BetSelection,
    /// Percent, rounded to 2 dp
    pub implied_probability: f64,
}

/// Outcomes from each game's first bookmaker whose implied probability is at
/// least `min_implied_prob` (0-1), highest probability first. Zero prices are
/// skipped; equal probabilities keep feed order.
pub fn suggest_value_bets(games: &[OddsFeedGame], min_implied_prob: f64) -> Vec<ValueBet> {
    let mut suggestions = Vec::new();

    for game in games {
        let Some(bookmaker) = game.bookmakers.first() else {
            continue;
        };
        let description = game.description();

        for market in &bookmaker.markets {
            for outcome in market.outcomes.iter().filter(|o| o.price != 0) {
                let implied = odds::implied_probability(outcome.price);
                if implied < min_implied_prob {
                    continue;
                }
                suggestions.push(ValueBet {
                    selection: BetSelection::new(
                        &game.id,
                        &description,
                        &outcome.name,
                        &market.key,
                        outcome.price,
                        outcome.point,
                    ),
                    implied_probability: round2(implied * 100.0),
                });
            }
        }
    }

    suggestions.sort_by(|a, b| b.implied_probability.total_cmp(&a.implied_probability));
    suggestions
}
