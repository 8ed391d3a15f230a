mod config;

use anyhow::{Context, Result};
use config::Config;
use parlay_core::{EngineConfig, Matchup};
use std::env;
use std::fs;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Reads .env before the log filter is built
    let engine = EngineConfig::load().context("Failed to load engine configuration")?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env(engine, env::args().nth(1));
    info!(
        path = %config.matchups_path.display(),
        legs = config.engine.policy.num_legs,
        min_confidence = config.engine.policy.min_confidence,
        stake = config.engine.default_stake,
        "Starting parlay runner"
    );

    let raw = fs::read_to_string(&config.matchups_path)
        .with_context(|| format!("Failed to read {}", config.matchups_path.display()))?;
    let matchups: Vec<Matchup> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid matchups JSON in {}", config.matchups_path.display()))?;

    if matchups.is_empty() {
        warn!("No matchups to analyze");
    }

    let engine = &config.engine;
    let predictor = engine.predictor()?;
    let parlay = predictor.generate_parlay(&matchups, &engine.policy, engine.default_stake);

    if parlay.num_legs() < engine.policy.num_legs {
        warn!(
            built = parlay.num_legs(),
            requested = engine.policy.num_legs,
            "Fewer matchups cleared the confidence bar than legs requested"
        );
    }

    println!("{}", parlay.summary());

    if config.print_json {
        let report = serde_json::to_string_pretty(&parlay.report())
            .context("Failed to serialize parlay report")?;
        println!();
        println!("{}", report);
    }

    Ok(())
}
