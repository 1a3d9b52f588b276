//! Text rendering of the widget for terminals

use crate::forecast::FORECAST_DAYS;
use crate::widget::WidgetState;

const TITLE: &str = "Weather Forecast";
const EMPTY_HINT: &str = "Type a city and press Search";
const FOOTER: &str = "Data from OpenWeatherMap";

/// Render the whole widget card
#[must_use]
pub fn render(state: &WidgetState) -> String {
    let theme = state.theme();
    let mut lines = vec![format!("{} {}  [{}]", theme.emoji(), TITLE, theme), String::new()];

    if let Some(error) = &state.error {
        lines.push(format!("⚠️  {error}"));
        lines.push(String::new());
    }

    if state.loading {
        lines.push("Searching...".to_string());
    } else if state.shows_empty_hint() {
        lines.push(EMPTY_HINT.to_string());
    }

    if let Some(current) = &state.current {
        lines.push(format!("📍 {}", current.format_place()));
        if !current.description.is_empty() {
            lines.push(format!("   {}", current.description));
        }
        lines.push(format!("   🌡️ {}", current.format_temperature()));
        lines.push(format!("   Humidity: {}%", current.humidity));
        lines.push(format!("   Feels: {}", current.format_feels_like()));
    }

    let days = state.forecast_days();
    if !days.is_empty() {
        lines.push(String::new());
        lines.push(format!("Next {FORECAST_DAYS} Days"));
        lines.extend(days.iter().map(|day| {
            format!(
                "   {} {:<12} {:<14} {}",
                day.category().emoji(),
                day.format_date(),
                day.dominant_condition,
                day.format_range()
            )
        }));
    }

    lines.push(String::new());
    lines.push(FOOTER.to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrentConditions, DailySummary};
    use crate::theme::ConditionCategory;
    use chrono::NaiveDate;

    fn state_with_results() -> WidgetState {
        WidgetState {
            city: "Delhi".to_string(),
            loading: false,
            error: None,
            current: Some(CurrentConditions {
                place: "Delhi".to_string(),
                country_code: Some("IN".to_string()),
                description: "overcast clouds".to_string(),
                temperature: 29.5,
                feels_like: 33.4,
                humidity: 70,
                condition_main: "Clouds".to_string(),
            }),
            forecast: Some(vec![DailySummary {
                date: NaiveDate::from_ymd_opt(2025, 10, 19).unwrap(),
                min_temp: 24,
                max_temp: 31,
                dominant_condition: "Rain".to_string(),
            }]),
        }
    }

    #[test]
    fn test_render_empty_state() {
        let text = render(&WidgetState::default());
        assert!(text.contains(TITLE));
        assert!(text.contains(EMPTY_HINT));
        assert!(text.contains("[sunny]"));
        assert!(text.ends_with(FOOTER));
    }

    #[test]
    fn test_render_current_and_forecast() {
        let text = render(&state_with_results());
        assert!(text.contains("[cloudy]"));
        assert!(text.contains("Delhi, IN"));
        assert!(text.contains("overcast clouds"));
        assert!(text.contains("30°C"));
        assert!(text.contains("Humidity: 70%"));
        assert!(text.contains("Feels: 33°C"));
        assert!(text.contains("Next 3 Days"));
        assert!(text.contains("Sun, Oct 19"));
        assert!(text.contains("24° / 31°"));
        assert!(!text.contains(EMPTY_HINT));
    }

    #[test]
    fn test_render_error_banner_without_forecast() {
        let state = WidgetState {
            error: Some("city not found".to_string()),
            ..WidgetState::default()
        };

        let text = render(&state);
        assert!(text.contains("city not found"));
        assert!(!text.contains(EMPTY_HINT));
        assert!(!text.contains("Next"));
    }

    #[test]
    fn test_render_layout() {
        let text = render(&state_with_results());
        let lines: Vec<&str> = text.lines().collect();

        let title = format!("{} Weather Forecast  [cloudy]", ConditionCategory::Cloudy.emoji());
        assert_eq!(lines[0], title);
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "📍 Delhi, IN");
        assert_eq!(lines.last(), Some(&FOOTER));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_render_loading() {
        let state = WidgetState {
            loading: true,
            ..WidgetState::default()
        };
        assert!(render(&state).contains("Searching..."));
    }
}
