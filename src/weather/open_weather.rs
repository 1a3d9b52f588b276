//! OpenWeatherMap client
//!
//! Talks to the `/weather` and `/forecast` endpoints (metric units) and turns
//! their loosely shaped JSON into the widget's models. Missing optional fields
//! are defaulted here so the rest of the crate never deals with them.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use super::WeatherProvider;
use crate::config::WeatherConfig;
use crate::models::{CurrentConditions, IntervalReading, WeatherQuery};
use crate::{Result, WidgetError};

const CURRENT_FAILED: &str = "Failed to fetch";
const FORECAST_FAILED: &str = "Failed to fetch forecast";

/// HTTP client for the OpenWeatherMap API
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    /// Create a new client from the weather configuration
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                WidgetError::config(
                    "An OpenWeatherMap API key is required (weather.api_key or WEATHERWIDGET_WEATHER__API_KEY)",
                )
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("WeatherWidget/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WidgetError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint_url(&self, endpoint: &str, query: &WeatherQuery) -> String {
        format!(
            "{}/{}?{}&units=metric&appid={}",
            self.base_url,
            endpoint,
            query.to_query_params(),
            urlencoding::encode(&self.api_key)
        )
    }

    /// GET an endpoint and decode its JSON body.
    ///
    /// The body is decoded before the status is looked at, since error
    /// responses carry their reason in a `message` field.
    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &WeatherQuery,
        fallback_message: &str,
    ) -> Result<T> {
        let url = self.endpoint_url(endpoint, query);
        debug!("Requesting /{} for {}", endpoint, query);
        let start_time = Instant::now();

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("Request to /{} failed: {}", endpoint, e);
            WidgetError::provider(format!("Unable to reach the weather service: {e}"))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            WidgetError::provider(format!("Failed to read weather response: {e}"))
        })?;
        let parsed: std::result::Result<serde_json::Value, _> = serde_json::from_str(&body);

        debug!(
            "HTTP {} from /{} in {:.3}s",
            status,
            endpoint,
            start_time.elapsed().as_secs_f64()
        );

        if !status.is_success() {
            let message = parsed
                .ok()
                .and_then(|value| {
                    value
                        .get("message")
                        .and_then(serde_json::Value::as_str)
                        .map(str::to_string)
                })
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| fallback_message.to_string());
            warn!("Provider answered {} on /{}: {}", status, endpoint, message);
            return Err(WidgetError::provider(message));
        }

        let value = parsed.map_err(|e| {
            warn!("Unparseable body from /{}: {}", endpoint, e);
            WidgetError::provider("Invalid weather data received from provider")
        })?;

        serde_json::from_value(value).map_err(|e| {
            warn!("Unexpected payload shape from /{}: {}", endpoint, e);
            WidgetError::provider("Invalid weather data received from provider")
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    #[instrument(skip(self), fields(query = %query))]
    async fn current(&self, query: &WeatherQuery) -> Result<CurrentConditions> {
        let response: wire::CurrentResponse = self.fetch("weather", query, CURRENT_FAILED).await?;
        let current = response.into_current()?;

        info!(
            "Current conditions for {}: {:.1}°C, {}",
            current.format_place(),
            current.temperature,
            current.condition_main
        );
        Ok(current)
    }

    #[instrument(skip(self), fields(query = %query))]
    async fn forecast_intervals(&self, query: &WeatherQuery) -> Result<Vec<IntervalReading>> {
        let response: wire::ForecastResponse =
            self.fetch("forecast", query, FORECAST_FAILED).await?;
        let readings = response.into_readings();

        info!("Received {} forecast readings", readings.len());
        Ok(readings)
    }
}

/// OpenWeatherMap response structures and conversion to models
mod wire {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct Condition {
        pub main: Option<String>,
        pub description: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct MainBlock {
        pub temp: Option<f64>,
        pub feels_like: Option<f64>,
        pub humidity: Option<f64>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Sys {
        pub country: Option<String>,
    }

    /// Response of `/weather`
    #[derive(Debug, Deserialize)]
    pub struct CurrentResponse {
        pub name: Option<String>,
        pub sys: Option<Sys>,
        #[serde(default)]
        pub weather: Vec<Condition>,
        pub main: Option<MainBlock>,
    }

    /// One entry of the `/forecast` list
    #[derive(Debug, Deserialize)]
    pub struct ForecastEntry {
        pub dt: Option<i64>,
        pub main: Option<MainBlock>,
        #[serde(default)]
        pub weather: Vec<Condition>,
    }

    /// Response of `/forecast`
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        #[serde(default)]
        pub list: Vec<ForecastEntry>,
    }

    fn first_main(weather: &[Condition]) -> String {
        weather
            .first()
            .and_then(|c| c.main.clone())
            .unwrap_or_default()
    }

    impl CurrentResponse {
        pub fn into_current(self) -> Result<CurrentConditions> {
            let main = self
                .main
                .ok_or_else(|| WidgetError::provider("Weather data is missing temperatures"))?;
            let (temperature, feels_like) = match (main.temp, main.feels_like) {
                (Some(temp), Some(feels)) => (temp, feels),
                _ => return Err(WidgetError::provider("Weather data is missing temperatures")),
            };

            Ok(CurrentConditions {
                place: self.name.unwrap_or_default(),
                country_code: self.sys.and_then(|s| s.country),
                description: self
                    .weather
                    .first()
                    .and_then(|c| c.description.clone())
                    .unwrap_or_default(),
                temperature,
                feels_like,
                humidity: main.humidity.unwrap_or(0.0).clamp(0.0, 100.0).round() as u8,
                condition_main: first_main(&self.weather),
            })
        }
    }

    impl ForecastResponse {
        pub fn into_readings(self) -> Vec<IntervalReading> {
            self.list
                .into_iter()
                .filter_map(|entry| {
                    let Some(timestamp) = entry.dt.and_then(|dt| DateTime::from_timestamp(dt, 0))
                    else {
                        warn!("Dropping forecast entry without a usable timestamp");
                        return None;
                    };
                    let Some(temperature) = entry.main.as_ref().and_then(|m| m.temp) else {
                        warn!("Dropping forecast entry at {} without temperature", timestamp);
                        return None;
                    };
                    Some(IntervalReading::new(
                        timestamp,
                        temperature,
                        first_main(&entry.weather),
                    ))
                })
                .collect()
        }
    }
}
