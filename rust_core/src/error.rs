use thiserror::Error;

/// Errors raised at the fallible edges of the engine.
///
/// Scoring, odds arithmetic and parlay aggregation never fail; these variants
/// only come from validating caller-supplied configuration or bet slips.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParlayError {
    #[error("Unknown sport: {0}")]
    UnknownSport(String),

    #[error("Unknown parlay policy: {0} (expected safe, normal or aggressive)")]
    UnknownPolicy(String),

    #[error("Invalid weight for {name}: {value} (must be within 0.0..=1.0)")]
    InvalidWeight { name: String, value: f64 },

    #[error("Invalid weight table: {0}")]
    InvalidWeightTable(String),

    #[error("Game {0} already in parlay")]
    DuplicateGame(String),
}

impl From<serde_json::Error> for ParlayError {
    fn from(err: serde_json::Error) -> Self {
        ParlayError::InvalidWeightTable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ParlayError>;
