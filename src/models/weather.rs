//! Weather data models: current conditions and forecast interval readings

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One forecast data point for a fixed 3-hour slot
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IntervalReading {
    /// Start of the slot
    pub timestamp: DateTime<Utc>,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Condition label from the provider, e.g. "Clouds" (may be empty)
    pub condition_main: String,
}

impl IntervalReading {
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, temperature: f64, condition_main: impl Into<String>) -> Self {
        Self {
            timestamp,
            temperature,
            condition_main: condition_main.into(),
        }
    }

    /// UTC calendar day this reading falls on
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// Current weather conditions for a place
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Place name as resolved by the provider
    pub place: String,
    /// Country code (ISO 3166-1 alpha-2)
    pub country_code: Option<String>,
    /// Human-readable description, e.g. "broken clouds"
    pub description: String,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Perceived temperature in Celsius
    pub feels_like: f64,
    /// Relative humidity in percent
    pub humidity: u8,
    /// Condition label, e.g. "Clouds"
    pub condition_main: String,
}

impl CurrentConditions {
    /// Place with the country code appended when known
    #[must_use]
    pub fn format_place(&self) -> String {
        match &self.country_code {
            Some(code) if !code.is_empty() => format!("{}, {}", self.place, code),
            _ => self.place.clone(),
        }
    }

    /// Format temperature with unit, rounded to whole degrees
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{}°C", round_degrees(self.temperature))
    }

    /// Format perceived temperature with unit, rounded to whole degrees
    #[must_use]
    pub fn format_feels_like(&self) -> String {
        format!("{}°C", round_degrees(self.feels_like))
    }
}

/// Round to whole degrees, half away from zero
#[must_use]
pub fn round_degrees(value: f64) -> i32 {
    value.round() as i32
}
