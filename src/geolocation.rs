//! Current-position lookup
//!
//! A single-shot "where am I" operation. It either yields a position or fails
//! with one of the named geolocation errors (`PermissionDenied`,
//! `UnsupportedEnvironment`, `LocationUnavailable`).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::config::GeolocationConfig;
use crate::models::Position;
use crate::{Result, WidgetError};

/// Something that can tell where the user is
#[async_trait]
pub trait GeolocationSource: Send + Sync {
    async fn current_position(&self) -> Result<Position>;
}

/// Approximate position from the public IP address
#[derive(Debug, Clone)]
pub struct IpGeolocation {
    client: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    status: Option<String>,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
}

impl IpGeolocation {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("WeatherWidget/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WidgetError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl GeolocationSource for IpGeolocation {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn current_position(&self) -> Result<Position> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            debug!("IP lookup request failed: {}", e);
            WidgetError::location_unavailable(e.to_string())
        })?;

        if !response.status().is_success() {
            return Err(WidgetError::location_unavailable(format!(
                "lookup service returned {}",
                response.status()
            )));
        }

        let body: IpLookupResponse = response.json().await.map_err(|e| {
            warn!("IP lookup returned an unreadable body: {}", e);
            WidgetError::location_unavailable("unreadable lookup response")
        })?;

        if body.status.as_deref().is_some_and(|s| s != "success") {
            return Err(WidgetError::location_unavailable(
                body.message.unwrap_or_else(|| "lookup failed".to_string()),
            ));
        }

        let (Some(lat), Some(lon)) = (body.lat, body.lon) else {
            return Err(WidgetError::location_unavailable(
                "lookup response has no coordinates",
            ));
        };

        let position = Position::new(lat, lon)
            .map_err(|e| WidgetError::location_unavailable(e.to_string()))?;
        info!(
            "Located near {} ({})",
            body.city.as_deref().unwrap_or("unknown place"),
            position.format_coordinates()
        );
        Ok(position)
    }
}

/// Geolocation chosen by configuration
#[derive(Debug, Clone)]
pub enum ConfiguredGeolocation {
    /// Always report this position
    Fixed(Position),
    /// Ask an IP geolocation service
    IpLookup(IpGeolocation),
    /// The user turned location sharing off
    Denied,
    /// No way to find a position
    Unsupported,
}

impl ConfiguredGeolocation {
    pub fn from_config(config: &GeolocationConfig) -> Result<Self> {
        if !config.enabled {
            return Ok(Self::Denied);
        }

        if let (Some(lat), Some(lon)) = (config.latitude, config.longitude) {
            return Ok(Self::Fixed(Position::new(lat, lon)?));
        }

        if config.lookup_url.is_empty() {
            return Ok(Self::Unsupported);
        }

        let timeout = Duration::from_secs(config.timeout_seconds.into());
        Ok(Self::IpLookup(IpGeolocation::new(
            config.lookup_url.clone(),
            timeout,
        )?))
    }
}

#[async_trait]
impl GeolocationSource for ConfiguredGeolocation {
    async fn current_position(&self) -> Result<Position> {
        match self {
            Self::Fixed(position) => Ok(*position),
            Self::IpLookup(lookup) => lookup.current_position().await,
            Self::Denied => Err(WidgetError::PermissionDenied),
            Self::Unsupported => Err(WidgetError::UnsupportedEnvironment),
        }
    }
}
