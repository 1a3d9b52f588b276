//! Search flows
//!
//! Both the manual search and the "use my location" flow fetch current
//! conditions first, then the forecast. A failed current-conditions fetch ends
//! the flow with an error banner; a failed forecast fetch only means there is
//! no outlook to show.

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, instrument, warn};

use super::state::{Action, WidgetState, reduce};
use crate::WidgetError;
use crate::forecast::aggregate;
use crate::geolocation::GeolocationSource;
use crate::models::WeatherQuery;
use crate::weather::WeatherProvider;

const SEARCH_FAILED: &str = "Error fetching weather";
const LOCATE_FAILED: &str = "Unable to fetch weather data";

/// Runs search flows against a weather provider
#[derive(Debug, Clone)]
pub struct SearchFlow<P> {
    provider: P,
    today: Option<NaiveDate>,
}

impl<P: WeatherProvider> SearchFlow<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            today: None,
        }
    }

    /// Pin the date forecasts are condensed against instead of the UTC clock
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Look up the city held in `state`. A blank city leaves the state as is.
    /// Input like `46.8,8.2` is looked up as coordinates and the provider's
    /// place name replaces it in the city input.
    #[instrument(skip(self, state), fields(city = %state.city))]
    pub async fn search(&self, state: WidgetState) -> WidgetState {
        let query = match WeatherQuery::parse(&state.city) {
            Ok(query) => query,
            Err(e) => {
                debug!("Ignoring search: {}", e);
                return state;
            }
        };

        let adopt_place = matches!(query, WeatherQuery::Coordinates { .. });
        self.run(state, &query, adopt_place, SEARCH_FAILED).await
    }

    /// Look up the weather where the user is
    #[instrument(skip_all)]
    pub async fn locate<G>(&self, geolocation: &G, state: WidgetState) -> WidgetState
    where
        G: GeolocationSource + ?Sized,
    {
        match geolocation.current_position().await {
            Ok(position) => {
                info!("Using position {}", position.format_coordinates());
                self.run(state, &position.into(), true, LOCATE_FAILED).await
            }
            Err(e) => {
                warn!("Geolocation failed: {}", e);
                reduce(&state, Action::Failed(e.user_message()))
            }
        }
    }

    /// Fetch current conditions, then the forecast.
    /// `adopt_place` copies the provider's place name into the city input and
    /// `fallback` is the banner for failures without a provider message.
    async fn run(
        &self,
        state: WidgetState,
        query: &WeatherQuery,
        adopt_place: bool,
        fallback: &str,
    ) -> WidgetState {
        let mut state = reduce(&state, Action::SearchStarted);

        let current = match self.provider.current(query).await {
            Ok(current) => current,
            Err(e) => {
                warn!("Current conditions for {} failed: {}", query, e);
                state = reduce(&state, Action::Failed(failure_message(&e, fallback)));
                return reduce(&state, Action::SearchFinished);
            }
        };

        if adopt_place {
            state = reduce(&state, Action::CityChanged(current.place.clone()));
        }
        state = reduce(&state, Action::CurrentLoaded(current));

        state = match self.provider.forecast_intervals(query).await {
            Ok(readings) => {
                let days = aggregate(&readings, self.today());
                reduce(&state, Action::ForecastLoaded(days))
            }
            Err(e) => {
                warn!("Forecast fetch failed, showing current conditions only: {}", e);
                reduce(&state, Action::ForecastUnavailable)
            }
        };

        reduce(&state, Action::SearchFinished)
    }
}

fn failure_message(error: &WidgetError, fallback: &str) -> String {
    match error {
        WidgetError::Provider { message } if !message.is_empty() => message.clone(),
        _ => fallback.to_string(),
    }
}
