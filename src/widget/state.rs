//! Widget state and its transitions
//!
//! The state is a plain value. Every transition produces a new value through
//! [`reduce`]; nothing mutates a state in place.

use serde::{Deserialize, Serialize};

use crate::models::{CurrentConditions, DailySummary};
use crate::theme::ConditionCategory;

/// Everything the view shows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetState {
    /// Text in the city input
    pub city: String,
    /// A search is in flight
    pub loading: bool,
    /// Error banner text
    pub error: Option<String>,
    /// Current conditions panel
    pub current: Option<CurrentConditions>,
    /// Daily outlook; `None` when unavailable
    pub forecast: Option<Vec<DailySummary>>,
}

/// State transitions
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The city input changed
    CityChanged(String),
    /// A search began: clears the banner and any previous results
    SearchStarted,
    CurrentLoaded(CurrentConditions),
    ForecastLoaded(Vec<DailySummary>),
    /// The forecast could not be fetched; shown as "no forecast"
    ForecastUnavailable,
    /// The flow failed with a user-visible message
    Failed(String),
    SearchFinished,
}

/// Apply an action, returning the next state
#[must_use]
pub fn reduce(state: &WidgetState, action: Action) -> WidgetState {
    match action {
        Action::CityChanged(city) => WidgetState {
            city,
            ..state.clone()
        },
        Action::SearchStarted => WidgetState {
            city: state.city.clone(),
            loading: true,
            error: None,
            current: None,
            forecast: None,
        },
        Action::CurrentLoaded(current) => WidgetState {
            current: Some(current),
            ..state.clone()
        },
        Action::ForecastLoaded(days) => WidgetState {
            forecast: Some(days),
            ..state.clone()
        },
        Action::ForecastUnavailable => WidgetState {
            forecast: None,
            ..state.clone()
        },
        Action::Failed(message) => WidgetState {
            error: Some(message),
            ..state.clone()
        },
        Action::SearchFinished => WidgetState {
            loading: false,
            ..state.clone()
        },
    }
}

impl WidgetState {
    /// Start from a city name typed by the user
    #[must_use]
    pub fn with_city(city: impl Into<String>) -> Self {
        reduce(&Self::default(), Action::CityChanged(city.into()))
    }

    /// Theme of the current conditions; sunny when nothing is shown
    #[must_use]
    pub fn theme(&self) -> ConditionCategory {
        ConditionCategory::classify(
            self.current
                .as_ref()
                .map_or("", |current| current.condition_main.as_str()),
        )
    }

    /// Nothing to show yet and nothing going on
    #[must_use]
    pub fn shows_empty_hint(&self) -> bool {
        self.current.is_none() && !self.loading && self.error.is_none()
    }

    /// Forecast days worth rendering, if any
    #[must_use]
    pub fn forecast_days(&self) -> &[DailySummary] {
        self.forecast.as_deref().unwrap_or_default()
    }
}
