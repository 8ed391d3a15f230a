use serde::{Deserialize, Serialize};

/// Game-time weather conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    /// Fahrenheit
    pub temperature: f64,
    pub feels_like: f64,
    /// Percent
    pub humidity: f64,
    /// MPH
    pub wind_speed: f64,
    pub wind_direction: String,
    /// Chance of precipitation (0-100)
    pub precipitation_chance: f64,
    pub conditions: String,
    /// Miles
    #[serde(default = "default_visibility")]
    pub visibility: f64,
    #[serde(default)]
    pub is_dome: bool,
}

fn default_visibility() -> f64 {
    10.0
}

impl Weather {
    /// Neutral indoor conditions.
    pub fn dome() -> Self {
        Self {
            temperature: 72.0,
            feels_like: 72.0,
            humidity: 50.0,
            wind_speed: 0.0,
            wind_direction: "N/A".to_string(),
            precipitation_chance: 0.0,
            conditions: "Indoor".to_string(),
            visibility: default_visibility(),
            is_dome: true,
        }
    }

    pub fn is_severe(&self) -> bool {
        if self.is_dome {
            return false;
        }
        self.wind_speed > 25.0
            || self.temperature < 20.0
            || self.temperature > 100.0
            || self.precipitation_chance > 70.0
    }

    pub fn affects_gameplay(&self) -> bool {
        if self.is_dome {
            return false;
        }
        self.wind_speed > 15.0
            || self.temperature < 32.0
            || self.temperature > 90.0
            || self.precipitation_chance > 50.0
    }

    /// Weather impact in [0, 1], higher = more disruptive.
    pub fn impact_score(&self) -> f64 {
        if self.is_dome {
            return 0.0;
        }

        let mut score = 0.0;

        if self.wind_speed > 10.0 {
            score += ((self.wind_speed - 10.0) / 30.0).min(0.3);
        }

        if self.temperature < 32.0 {
            score += ((32.0 - self.temperature) / 50.0).min(0.25);
        } else if self.temperature > 85.0 {
            score += ((self.temperature - 85.0) / 30.0).min(0.25);
        }

        if self.precipitation_chance > 30.0 {
            score += ((self.precipitation_chance - 30.0) / 100.0).min(0.3);
        }

        if self.humidity > 70.0 {
            score += ((self.humidity - 70.0) / 60.0).min(0.15);
        }

        score.min(1.0)
    }
}
