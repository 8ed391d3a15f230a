//! Configuration for the parlay runner.

use parlay_core::EngineConfig;
use std::env;
use std::path::PathBuf;

/// Default matchups file, relative to the working directory
pub const DEFAULT_MATCHUPS_PATH: &str = "data/sample_matchups.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub engine: EngineConfig,
    pub matchups_path: PathBuf,
    /// Print the JSON report after the text summary
    pub print_json: bool,
}

impl Config {
    /// A path given on the command line wins over `PARLAY_MATCHUPS_PATH`.
    pub fn from_env(engine: EngineConfig, cli_path: Option<String>) -> Self {
        let matchups_path = cli_path
            .or_else(|| env::var("PARLAY_MATCHUPS_PATH").ok())
            .unwrap_or_else(|| DEFAULT_MATCHUPS_PATH.to_string())
            .into();

        let print_json = parse_bool_env("PARLAY_PRINT_JSON", true);

        Self {
            engine,
            matchups_path,
            print_json,
        }
    }
}

fn parse_bool_env(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "y" | "on"))
        .unwrap_or(default)
}
