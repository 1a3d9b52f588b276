//! Daily forecast condensation
//!
//! Turns the provider's 3-hour interval readings into a handful of daily
//! summaries: min/max temperature and the dominant condition per UTC day.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::models::weather::round_degrees;
use crate::models::{DailySummary, IntervalReading};

/// Number of future days kept in the outlook
pub const FORECAST_DAYS: usize = 3;

/// Readings collected for one calendar day
#[derive(Debug, Default)]
struct DayBucket {
    temperatures: Vec<f64>,
    /// Condition counts in order of first appearance
    conditions: Vec<(String, usize)>,
}

impl DayBucket {
    fn add(&mut self, reading: &IntervalReading) {
        self.temperatures.push(reading.temperature);

        match self
            .conditions
            .iter_mut()
            .find(|(label, _)| *label == reading.condition_main)
        {
            Some((_, count)) => *count += 1,
            None => self.conditions.push((reading.condition_main.clone(), 1)),
        }
    }

    fn summarize(&self, date: NaiveDate) -> DailySummary {
        let min = self.temperatures.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self
            .temperatures
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);

        DailySummary {
            date,
            min_temp: round_degrees(min),
            max_temp: round_degrees(max),
            dominant_condition: self.dominant_condition(),
        }
    }

    /// Most frequent label; the earliest seen wins a tie
    fn dominant_condition(&self) -> String {
        let mut best: Option<&(String, usize)> = None;
        for entry in &self.conditions {
            if best.is_none_or(|(_, count)| entry.1 > *count) {
                best = Some(entry);
            }
        }
        best.map(|(label, _)| label.clone()).unwrap_or_default()
    }
}

/// Condense interval readings into summaries for the days after `today`.
///
/// At most [`FORECAST_DAYS`] summaries are returned, in ascending date order.
/// Readings with a non-finite temperature are skipped.
#[must_use]
pub fn aggregate(readings: &[IntervalReading], today: NaiveDate) -> Vec<DailySummary> {
    let mut by_day: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();

    for reading in readings {
        if !reading.temperature.is_finite() {
            warn!(
                "Skipping reading at {} with unusable temperature {}",
                reading.timestamp, reading.temperature
            );
            continue;
        }
        by_day.entry(reading.date()).or_default().add(reading);
    }

    let summaries: Vec<DailySummary> = by_day
        .iter()
        .filter(|(date, _)| **date > today)
        .take(FORECAST_DAYS)
        .map(|(date, bucket)| bucket.summarize(*date))
        .collect();

    debug!(
        "Condensed {} readings over {} days into {} summaries",
        readings.len(),
        by_day.len(),
        summaries.len()
    );

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, n).unwrap()
    }

    fn reading(date: NaiveDate, hour: u32, temperature: f64, condition: &str) -> IntervalReading {
        let timestamp = Utc.from_utc_datetime(&date.and_hms_opt(hour, 0, 0).unwrap());
        IntervalReading::new(timestamp, temperature, condition)
    }

    #[test]
    fn test_empty_readings() {
        assert!(aggregate(&[], day(1)).is_empty());
    }

    #[test]
    fn test_two_day_scenario() {
        let readings = vec![
            reading(day(2), 9, 10.0, "Clear"),
            reading(day(2), 15, 20.0, "Clouds"),
            reading(day(3), 12, 5.0, "Snow"),
        ];

        let summaries = aggregate(&readings, day(1));

        assert_eq!(
            summaries,
            vec![
                DailySummary {
                    date: day(2),
                    min_temp: 10,
                    max_temp: 20,
                    dominant_condition: "Clear".to_string(),
                },
                DailySummary {
                    date: day(3),
                    min_temp: 5,
                    max_temp: 5,
                    dominant_condition: "Snow".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_today_and_past_are_dropped() {
        let readings = vec![
            reading(day(1), 0, 11.0, "Rain"),
            reading(day(2), 0, 12.0, "Rain"),
            reading(day(3), 0, 13.0, "Rain"),
        ];

        assert!(aggregate(&readings, day(3)).is_empty());
        assert!(aggregate(&readings, day(10)).is_empty());

        let summaries = aggregate(&readings, day(2));
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].date, day(3));
    }

    #[test]
    fn test_caps_at_three_days_in_order() {
        // Out-of-order input spanning five future days
        let readings: Vec<IntervalReading> = [6, 3, 5, 2, 4]
            .into_iter()
            .map(|n| reading(day(n), 12, f64::from(n), "Clear"))
            .collect();

        let summaries = aggregate(&readings, day(1));
        let dates: Vec<NaiveDate> = summaries.iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![day(2), day(3), day(4)]);
    }

    #[test]
    fn test_groups_by_utc_day_regardless_of_time() {
        let start = Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap();
        let readings: Vec<IntervalReading> = (0..8)
            .map(|slot| {
                IntervalReading::new(start + Duration::hours(3 * slot), 10.0 + slot as f64, "Clouds")
            })
            .collect();

        let summaries = aggregate(&readings, day(1));
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].min_temp, 10);
        assert_eq!(summaries[0].max_temp, 17);
    }

    #[test]
    fn test_dominant_condition_by_count_then_first_seen() {
        let readings = vec![
            reading(day(2), 0, 1.0, "Clouds"),
            reading(day(2), 3, 1.0, "Rain"),
            reading(day(2), 6, 1.0, "Rain"),
            reading(day(2), 9, 1.0, "Clouds"),
            reading(day(2), 12, 1.0, "Clear"),
            reading(day(3), 0, 1.0, "Clouds"),
            reading(day(3), 3, 1.0, "Rain"),
            reading(day(3), 6, 1.0, "Rain"),
        ];

        let summaries = aggregate(&readings, day(1));
        // tie between Clouds and Rain: Clouds appeared first
        assert_eq!(summaries[0].dominant_condition, "Clouds");
        assert_eq!(summaries[1].dominant_condition, "Rain");
    }

    #[test]
    fn test_empty_condition_can_dominate() {
        let readings = vec![
            reading(day(2), 0, 1.0, ""),
            reading(day(2), 3, 1.0, ""),
            reading(day(2), 6, 1.0, "Clear"),
        ];

        let summaries = aggregate(&readings, day(1));
        assert_eq!(summaries[0].dominant_condition, "");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        let readings = vec![
            reading(day(2), 0, -2.5, "Snow"),
            reading(day(2), 3, 7.5, "Snow"),
        ];

        let summaries = aggregate(&readings, day(1));
        assert_eq!(summaries[0].min_temp, -3);
        assert_eq!(summaries[0].max_temp, 8);
    }

    #[test]
    fn test_non_finite_temperatures_are_skipped() {
        let readings = vec![
            reading(day(2), 0, f64::NAN, "Rain"),
            reading(day(2), 3, 4.0, "Clear"),
            reading(day(2), 6, 9.0, "Clear"),
            reading(day(3), 0, f64::INFINITY, "Snow"),
            reading(day(4), 0, 2.0, "Mist"),
        ];

        let summaries = aggregate(&readings, day(1));
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].min_temp, 4);
        assert_eq!(summaries[0].max_temp, 9);
        assert_eq!(summaries[0].dominant_condition, "Clear");
        assert_eq!(summaries[1].date, day(4));
    }

    #[test]
    fn test_min_never_exceeds_max_and_output_is_stable() {
        let readings: Vec<IntervalReading> = (0..40)
            .map(|i| {
                let date = day(1 + (i / 8) as u32);
                let temp = ((i * 37) % 23) as f64 - 11.3;
                reading(date, (i % 8) as u32 * 3, temp, ["Rain", "Clear", "Clouds"][i % 3])
            })
            .collect();

        let first = aggregate(&readings, day(1));
        let second = aggregate(&readings, day(1));
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert!(first.windows(2).all(|w| w[0].date < w[1].date));
        assert!(first.iter().all(|s| s.min_temp <= s.max_temp));
    }
}
