//! Location models: geographic positions and weather lookup queries

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Result, WidgetError};

/// A point on the globe, as reported by a geolocation source
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Position {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Position {
    /// Create a position, rejecting coordinates outside the valid ranges
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(WidgetError::validation(format!(
                "Latitude must be between -90 and 90, got: {latitude}"
            )));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(WidgetError::validation(format!(
                "Longitude must be between -180 and 180, got: {longitude}"
            )));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Format position as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// What to look up: a free-text place name or a coordinate pair
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    /// Place name (city, region, etc.)
    Place(String),
    /// Latitude/longitude pair
    Coordinates { latitude: f64, longitude: f64 },
}

impl WeatherQuery {
    /// Parse user input. Text of the form `lat,lon` or `lat lon` with in-range
    /// values becomes a coordinate query, anything else a place name.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(WidgetError::validation("Location cannot be empty"));
        }

        if let Some(position) = Self::parse_coordinates(input) {
            return Ok(position.into());
        }

        Ok(Self::Place(input.to_string()))
    }

    fn parse_coordinates(input: &str) -> Option<Position> {
        let parts: Vec<&str> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        if parts.len() != 2 {
            return None;
        }

        let lat = parts[0].parse::<f64>().ok()?;
        let lon = parts[1].parse::<f64>().ok()?;
        Position::new(lat, lon).ok()
    }

    /// Query string parameters identifying the location, already URL-encoded
    #[must_use]
    pub fn to_query_params(&self) -> String {
        match self {
            WeatherQuery::Place(name) => format!("q={}", urlencoding::encode(name)),
            WeatherQuery::Coordinates {
                latitude,
                longitude,
            } => format!("lat={latitude}&lon={longitude}"),
        }
    }
}

impl From<Position> for WeatherQuery {
    fn from(position: Position) -> Self {
        WeatherQuery::Coordinates {
            latitude: position.latitude,
            longitude: position.longitude,
        }
    }
}

impl fmt::Display for WeatherQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherQuery::Place(name) => write!(f, "{name}"),
            WeatherQuery::Coordinates {
                latitude,
                longitude,
            } => write!(f, "{latitude:.4}, {longitude:.4}"),
        }
    }
}
