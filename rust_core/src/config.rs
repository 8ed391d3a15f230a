//! Runtime configuration for the parlay engine.
//!
//! Loaded from environment variables (optionally via `.env`):
//! - `PARLAY_WEIGHTS_JSON`: full or partial factor weight table as JSON
//! - `PARLAY_WEIGHT_<FACTOR>`: per-factor override, e.g. `PARLAY_WEIGHT_TEAM_RECORD`
//! - `PARLAY_DEFAULT_STAKE`: stake for generated parlays (default 10.0)
//! - `PARLAY_KEY_FACTORS`: key factors attached to each leg (default 3)
//! - `PARLAY_POLICY`: `safe` | `normal` | `aggressive` (default `normal`)

use anyhow::{anyhow, Context, Result};
use std::env;

use crate::analysis::factors::{FactorAnalyzer, FactorKind, FactorWeights, DEFAULT_KEY_FACTORS};
use crate::analysis::predictor::{ParlayPolicy, ParlayPredictor};

pub const DEFAULT_STAKE: f64 = 10.0;

const WEIGHTS_JSON_KEY: &str = "PARLAY_WEIGHTS_JSON";
const WEIGHT_KEY_PREFIX: &str = "PARLAY_WEIGHT_";

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub weights: FactorWeights,
    pub default_stake: f64,
    pub key_factor_count: usize,
    pub policy: ParlayPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: FactorWeights::default(),
            default_stake: DEFAULT_STAKE,
            key_factor_count: DEFAULT_KEY_FACTORS,
            policy: ParlayPolicy::normal(),
        }
    }
}

impl EngineConfig {
    /// Read `.env` if present, then the process environment.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys take defaults; set but
    /// malformed keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut weights = match lookup(WEIGHTS_JSON_KEY) {
            Some(raw) => FactorWeights::from_json(&raw).context(WEIGHTS_JSON_KEY)?,
            None => FactorWeights::default(),
        };

        for kind in FactorKind::ALL {
            let key = format!("{}{}", WEIGHT_KEY_PREFIX, kind.as_str().to_uppercase());
            if let Some(raw) = lookup(&key) {
                let value = raw
                    .trim()
                    .parse::<f64>()
                    .with_context(|| format!("Invalid {key}: {raw} (expected number)"))?;
                weights.set(kind, value);
            }
        }
        weights.validate().context("factor weights")?;

        let default_stake = match lookup("PARLAY_DEFAULT_STAKE") {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid PARLAY_DEFAULT_STAKE: {raw} (expected number)"))?,
            None => DEFAULT_STAKE,
        };
        if !default_stake.is_finite() || default_stake < 0.0 {
            return Err(anyhow!(
                "Invalid PARLAY_DEFAULT_STAKE: {default_stake} (must be >= 0)"
            ));
        }

        let key_factor_count = match lookup("PARLAY_KEY_FACTORS") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("Invalid PARLAY_KEY_FACTORS: {raw} (expected integer)"))?,
            None => DEFAULT_KEY_FACTORS,
        };

        let policy = match lookup("PARLAY_POLICY") {
            Some(raw) => raw.parse::<ParlayPolicy>().context("PARLAY_POLICY")?,
            None => ParlayPolicy::normal(),
        };

        Ok(Self {
            weights,
            default_stake,
            key_factor_count,
            policy,
        })
    }

    pub fn predictor(&self) -> Result<ParlayPredictor> {
        let analyzer = FactorAnalyzer::new(self.weights).context("factor weights")?;
        Ok(ParlayPredictor::new(analyzer).with_key_factor_count(self.key_factor_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<EngineConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.default_stake, 10.0);
        assert_eq!(config.key_factor_count, 3);
        assert_eq!(config.policy, ParlayPolicy::normal());
    }

    #[test]
    fn test_weight_overrides() {
        let config = config_from(&[
            ("PARLAY_WEIGHTS_JSON", r#"{"injuries": 0.3}"#),
            ("PARLAY_WEIGHT_TEAM_RECORD", "0.5"),
        ])
        .unwrap();
        assert_eq!(config.weights.injuries, 0.3);
        assert_eq!(config.weights.team_record, 0.5);
        assert_eq!(config.weights.weather, 0.10);
    }

    #[test]
    fn test_per_factor_override_wins_over_json() {
        let config = config_from(&[
            ("PARLAY_WEIGHTS_JSON", r#"{"recent_form": 0.9}"#),
            ("PARLAY_WEIGHT_RECENT_FORM", "0.05"),
        ])
        .unwrap();
        assert_eq!(config.weights.recent_form, 0.05);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(config_from(&[("PARLAY_WEIGHT_INJURIES", "lots")]).is_err());
        assert!(config_from(&[("PARLAY_WEIGHT_INJURIES", "1.5")]).is_err());
        assert!(config_from(&[("PARLAY_WEIGHTS_JSON", "{")]).is_err());
        assert!(config_from(&[("PARLAY_DEFAULT_STAKE", "-1")]).is_err());
        assert!(config_from(&[("PARLAY_KEY_FACTORS", "three")]).is_err());

        let err = config_from(&[("PARLAY_POLICY", "yolo")]).unwrap_err();
        assert!(format!("{err:#}").contains("Unknown parlay policy: yolo"));
    }

    #[test]
    fn test_policy_and_predictor() {
        let config = config_from(&[
            ("PARLAY_POLICY", "aggressive"),
            ("PARLAY_KEY_FACTORS", "2"),
            ("PARLAY_DEFAULT_STAKE", "25"),
        ])
        .unwrap();
        assert_eq!(config.policy.num_legs, 5);
        assert_eq!(config.default_stake, 25.0);

        let predictor = config.predictor().unwrap();
        assert_eq!(predictor.analyzer().weights(), &config.weights);

        let mut tampered = config;
        tampered.weights.injuries = -0.2;
        assert!(tampered.predictor().is_err());
    }
}
