//! Parlay Core - Matchup scoring, pick generation and parlay odds.
//!
//! This module provides:
//! - Factor analysis of a matchup into weighted, signed factors
//! - Calibrated confidence and predicted winner per matchup
//! - Spread, moneyline and total picks with reasoning
//! - Multi-leg parlay assembly under a policy (safe / normal / aggressive)
//! - American/decimal odds conversion, implied probability and payouts
//! - A manual bet slip calculator and value-bet suggestions
//! - Batch analysis via rayon
//!
//! ```rust
//! use parlay_core::{Matchup, ParlayPolicy, ParlayPredictor, Sport, Team};
//!
//! let home = Team::new("kc", "Chiefs", "KC", "Kansas City", Sport::NFL);
//! let away = Team::new("buf", "Bills", "BUF", "Buffalo", Sport::NFL);
//! let matchups = vec![Matchup::new("g1", Sport::NFL, home, away)];
//!
//! let predictor = ParlayPredictor::default();
//! let parlay = predictor.generate_parlay(&matchups, &ParlayPolicy::normal(), 10.0);
//! assert!(parlay.num_legs() <= 3);
//! ```

pub mod analysis;
pub mod betslip;
pub mod config;
pub mod error;
pub mod league_config;
pub mod models;
pub mod utils;

pub use analysis::{
    Factor, FactorAnalysis, FactorAnalyzer, FactorKind, FactorWeights, ParlayPolicy,
    ParlayPredictor, DEFAULT_FACTOR_WEIGHTS,
};
pub use betslip::{suggest_value_bets, BetSelection, BetSlip, BetSlipReport, OddsFeedGame};
pub use config::EngineConfig;
pub use error::{ParlayError, Result};
pub use models::{
    BetType, Matchup, Parlay, ParlayLeg, ParlayReport, PickConfidence, Sport, Team, TeamStats,
};
