//! Weather provider abstraction
//!
//! The widget only needs two things from a weather service: the current
//! conditions for a query and the raw interval readings of its forecast.

use async_trait::async_trait;

use crate::Result;
use crate::models::{CurrentConditions, IntervalReading, WeatherQuery};

pub mod open_weather;

pub use open_weather::OpenWeatherClient;

/// Source of current conditions and forecast readings
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions for a place or coordinate pair
    async fn current(&self, query: &WeatherQuery) -> Result<CurrentConditions>;

    /// Forecast readings in 3-hour slots, several days ahead
    async fn forecast_intervals(&self, query: &WeatherQuery) -> Result<Vec<IntervalReading>>;
}

#[async_trait]
impl<P: WeatherProvider + ?Sized> WeatherProvider for std::sync::Arc<P> {
    async fn current(&self, query: &WeatherQuery) -> Result<CurrentConditions> {
        (**self).current(query).await
    }

    async fn forecast_intervals(&self, query: &WeatherQuery) -> Result<Vec<IntervalReading>> {
        (**self).forecast_intervals(query).await
    }
}
