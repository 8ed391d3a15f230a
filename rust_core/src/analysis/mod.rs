//! Matchup analysis and pick generation.

pub mod factors;
pub mod predictor;

pub use factors::{
    calibrate_confidence, Factor, FactorAnalysis, FactorAnalyzer, FactorEvaluator, FactorKind,
    FactorWeights, DEFAULT_FACTOR_WEIGHTS,
};
pub use predictor::{ParlayPolicy, ParlayPredictor};
