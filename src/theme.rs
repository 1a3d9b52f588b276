//! Condition classification for presentational theming

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display category derived from a raw condition label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConditionCategory {
    #[default]
    Sunny,
    Rainy,
    Cloudy,
    Snow,
}

impl ConditionCategory {
    /// Classify a condition label such as "Clouds" or "light rain".
    ///
    /// Matching is case-insensitive on substrings, checked in priority order:
    /// precipitation and storms first, then overcast and low visibility, then
    /// snow. Anything else, including an empty label, is sunny.
    #[must_use]
    pub fn classify(condition_main: &str) -> Self {
        let label = condition_main.to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| label.contains(n));

        if has(&["rain", "drizzle", "thunder"]) {
            Self::Rainy
        } else if has(&["cloud", "mist", "fog"]) {
            Self::Cloudy
        } else if has(&["snow"]) {
            Self::Snow
        } else {
            Self::Sunny
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Rainy => "rainy",
            Self::Cloudy => "cloudy",
            Self::Snow => "snow",
        }
    }

    #[must_use]
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Sunny => "☀️",
            Self::Rainy => "🌧️",
            Self::Cloudy => "☁️",
            Self::Snow => "❄️",
        }
    }
}

impl fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("light rain", ConditionCategory::Rainy)]
    #[case("Drizzle", ConditionCategory::Rainy)]
    #[case("Thunderstorm", ConditionCategory::Rainy)]
    #[case("BROKEN CLOUDS", ConditionCategory::Cloudy)]
    #[case("Mist", ConditionCategory::Cloudy)]
    #[case("Fog", ConditionCategory::Cloudy)]
    #[case("Snow", ConditionCategory::Snow)]
    #[case("Clear", ConditionCategory::Sunny)]
    #[case("Haze", ConditionCategory::Sunny)]
    #[case("", ConditionCategory::Sunny)]
    fn test_classify(#[case] label: &str, #[case] expected: ConditionCategory) {
        assert_eq!(ConditionCategory::classify(label), expected);
    }

    #[test]
    fn test_priority_order() {
        // rain beats cloud, cloud beats snow
        assert_eq!(
            ConditionCategory::classify("rain and clouds"),
            ConditionCategory::Rainy
        );
        assert_eq!(
            ConditionCategory::classify("snow fog"),
            ConditionCategory::Cloudy
        );
        assert_eq!(
            ConditionCategory::classify("thundersnow"),
            ConditionCategory::Rainy
        );
    }

    #[test]
    fn test_classify_is_deterministic() {
        for label in ["Rain", "Clouds", "Snow", "Clear", "", "Ω unknown"] {
            assert_eq!(
                ConditionCategory::classify(label),
                ConditionCategory::classify(label)
            );
        }
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&ConditionCategory::Cloudy).unwrap();
        assert_eq!(json, "\"cloudy\"");
        assert_eq!(ConditionCategory::Snow.to_string(), "snow");
    }
}
