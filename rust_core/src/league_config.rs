//! League configuration for supported sports.
//!
//! This module provides:
//! - Static per-league constants used by factor analysis
//! - Lookup by league code or by [`Sport`]

use crate::models::Sport;

/// Home advantage factor value for leagues without a tuned edge.
pub const DEFAULT_HOME_ADVANTAGE: f64 = 0.05;

/// Configuration for a single league.
#[derive(Debug, Clone)]
pub struct LeagueConfig {
    pub sport: Sport,
    /// League code (e.g., "nfl", "ncaab")
    pub league_code: &'static str,
    pub display_name: &'static str,
    /// Value of the home_advantage factor at a non-neutral site
    pub home_advantage: f64,
    /// Whether outdoor weather materially changes games in this league
    pub weather_affects: bool,
}

/// Static configuration for all supported leagues.
pub static LEAGUE_CONFIGS: &[LeagueConfig] = &[
    // Football
    LeagueConfig {
        sport: Sport::NFL,
        league_code: "nfl",
        display_name: "National Football League",
        home_advantage: 0.08,
        weather_affects: true,
    },
    LeagueConfig {
        sport: Sport::NCAAF,
        league_code: "ncaaf",
        display_name: "NCAA Football",
        home_advantage: 0.10,
        weather_affects: true,
    },
    // Basketball
    LeagueConfig {
        sport: Sport::NBA,
        league_code: "nba",
        display_name: "National Basketball Association",
        home_advantage: 0.06,
        weather_affects: false,
    },
    LeagueConfig {
        sport: Sport::NCAAB,
        league_code: "ncaab",
        display_name: "NCAA Basketball",
        home_advantage: 0.08,
        weather_affects: false,
    },
    // Hockey
    LeagueConfig {
        sport: Sport::NHL,
        league_code: "nhl",
        display_name: "National Hockey League",
        home_advantage: 0.05,
        weather_affects: false,
    },
    // Baseball
    LeagueConfig {
        sport: Sport::MLB,
        league_code: "mlb",
        display_name: "Major League Baseball",
        home_advantage: 0.04,
        weather_affects: true,
    },
    // Soccer
    LeagueConfig {
        sport: Sport::MLS,
        league_code: "mls",
        display_name: "Major League Soccer",
        home_advantage: DEFAULT_HOME_ADVANTAGE,
        weather_affects: true,
    },
    LeagueConfig {
        sport: Sport::Soccer,
        league_code: "soccer",
        display_name: "Soccer",
        home_advantage: DEFAULT_HOME_ADVANTAGE,
        weather_affects: true,
    },
];

/// Get league configuration by code.
pub fn get_league_config(league: &str) -> Option<&'static LeagueConfig> {
    LEAGUE_CONFIGS
        .iter()
        .find(|c| c.league_code.eq_ignore_ascii_case(league))
}

pub fn league_config_for(sport: Sport) -> Option<&'static LeagueConfig> {
    LEAGUE_CONFIGS.iter().find(|c| c.sport == sport)
}

/// Home advantage factor value, falling back to [`DEFAULT_HOME_ADVANTAGE`].
pub fn home_advantage_for(sport: Sport) -> f64 {
    league_config_for(sport)
        .map(|c| c.home_advantage)
        .unwrap_or(DEFAULT_HOME_ADVANTAGE)
}

/// Whether outdoor conditions matter for `sport`; unknown sports say no.
pub fn weather_affects(sport: Sport) -> bool {
    league_config_for(sport)
        .map(|c| c.weather_affects)
        .unwrap_or(false)
}

/// Get list of all league codes.
pub fn get_all_league_codes() -> Vec<&'static str> {
    LEAGUE_CONFIGS.iter().map(|c| c.league_code).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_league_config() {
        let nfl = get_league_config("nfl").unwrap();
        assert_eq!(nfl.sport, Sport::NFL);
        assert_eq!(nfl.home_advantage, 0.08);
    }

    #[test]
    fn test_case_insensitivity() {
        assert!(get_league_config("NCAAF").is_some());
        assert!(get_league_config("ncaaf").is_some());
        assert!(get_league_config("Ncaaf").is_some());
    }

    #[test]
    fn test_missing_league() {
        assert!(get_league_config("nonexistent").is_none());
    }

    #[test]
    fn test_home_advantage_table() {
        assert_eq!(home_advantage_for(Sport::NFL), 0.08);
        assert_eq!(home_advantage_for(Sport::NBA), 0.06);
        assert_eq!(home_advantage_for(Sport::MLB), 0.04);
        assert_eq!(home_advantage_for(Sport::NHL), 0.05);
        assert_eq!(home_advantage_for(Sport::NCAAF), 0.10);
        assert_eq!(home_advantage_for(Sport::NCAAB), 0.08);
        assert_eq!(home_advantage_for(Sport::Soccer), DEFAULT_HOME_ADVANTAGE);
        assert_eq!(home_advantage_for(Sport::MLS), DEFAULT_HOME_ADVANTAGE);
    }

    #[test]
    fn test_every_sport_has_an_entry() {
        for sport in Sport::ALL {
            assert!(league_config_for(sport).is_some(), "missing {}", sport);
        }
        assert_eq!(get_league_config("MLS").unwrap().sport, Sport::MLS);
    }

    #[test]
    fn test_weather_sensitivity() {
        assert!(weather_affects(Sport::NFL));
        assert!(weather_affects(Sport::Soccer));
        assert!(weather_affects(Sport::MLS));
        assert!(!weather_affects(Sport::NBA));
        assert!(!weather_affects(Sport::NHL));
    }

    #[test]
    fn test_all_league_codes() {
        let codes = get_all_league_codes();
        assert_eq!(codes.len(), 8);
        assert!(codes.contains(&"nhl"));
        assert!(codes.contains(&"soccer"));
    }
}
