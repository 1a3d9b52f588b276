//! Configuration management for the weather widget
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::WidgetError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the weather widget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Geolocation configuration
    #[serde(default)]
    pub geolocation: GeolocationConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key
    pub api_key: Option<String>,
    /// Base URL for weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Where the "current position" comes from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationConfig {
    /// When false, every position request is refused
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Fixed latitude, used together with `longitude`
    pub latitude: Option<f64>,
    /// Fixed longitude, used together with `latitude`
    pub longitude: Option<f64>,
    /// IP geolocation endpoint; empty disables the lookup
    #[serde(default = "default_lookup_url")]
    pub lookup_url: String,
    /// Lookup timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// HTTP server settings for `serve`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_lookup_url() -> String {
    "http://ip-api.com/json".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            latitude: None,
            longitude: None,
            lookup_url: default_lookup_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            weather: WeatherConfig::default(),
            geolocation: GeolocationConfig::default(),
            logging: LoggingConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl WidgetConfig {
    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // WEATHERWIDGET_WEATHER__API_KEY overrides weather.api_key
        builder = builder.add_source(
            Environment::with_prefix("WEATHERWIDGET")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WidgetConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weatherwidget").join("config.toml"))
    }

    /// Apply default values to fields left empty
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_timeout();
        }
        if self.geolocation.timeout_seconds == 0 {
            self.geolocation.timeout_seconds = default_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.port == 0 {
            self.server.port = default_port();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_fixed_position()?;
        Ok(())
    }

    /// The key is optional at load time (`theme` needs none) but must look sane if set
    pub fn validate_api_key(&self) -> Result<()> {
        if let Some(api_key) = &self.weather.api_key {
            if api_key.trim().is_empty() {
                return Err(WidgetError::config(
                    "Weather API key cannot be empty if provided. Either remove it or provide a valid key."
                ).into());
            }

            if api_key.len() > 100 {
                return Err(WidgetError::config(
                    "Weather API key appears to be invalid (too long). Please check your API key."
                ).into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(WidgetError::config(
                "Weather API timeout cannot exceed 300 seconds"
            ).into());
        }

        if self.geolocation.timeout_seconds > 300 {
            return Err(WidgetError::config(
                "Geolocation timeout cannot exceed 300 seconds"
            ).into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WidgetError::config(
                format!("Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_log_levels.join(", ")
                )
            ).into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WidgetError::config(
                format!("Invalid log format '{}'. Must be one of: {}",
                    self.logging.format,
                    valid_log_formats.join(", ")
                )
            ).into());
        }

        if !is_http_url(&self.weather.base_url) {
            return Err(WidgetError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL"
            ).into());
        }

        if !self.geolocation.lookup_url.is_empty() && !is_http_url(&self.geolocation.lookup_url) {
            return Err(WidgetError::config(
                "Geolocation lookup URL must be a valid HTTP or HTTPS URL"
            ).into());
        }

        Ok(())
    }

    fn validate_fixed_position(&self) -> Result<()> {
        match (self.geolocation.latitude, self.geolocation.longitude) {
            (None, None) => Ok(()),
            (Some(lat), Some(lon)) => crate::models::Position::new(lat, lon)
                .map(|_| ())
                .map_err(|e| WidgetError::config(format!("Invalid fixed position: {e}")).into()),
            _ => Err(WidgetError::config(
                "Geolocation latitude and longitude must be set together"
            ).into()),
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = WidgetConfig::default();
        assert_eq!(config.weather.base_url, "https://api.openweathermap.org/data/2.5");
        assert_eq!(config.weather.timeout_seconds, 10);
        assert!(config.geolocation.enabled);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.server.port, 3000);
        assert!(config.weather.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_api_key() {
        let mut config = WidgetConfig::default();
        config.weather.api_key = Some("  ".to_string());
        assert!(config.validate_api_key().is_err());

        config.weather.api_key = Some("f4ff124ba7f04dca".to_string());
        assert!(config.validate_api_key().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = WidgetConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = WidgetConfig::default();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_fixed_position() {
        let mut config = WidgetConfig::default();
        config.geolocation.latitude = Some(28.61);
        assert!(config.validate().is_err());

        config.geolocation.longitude = Some(77.21);
        assert!(config.validate().is_ok());

        config.geolocation.latitude = Some(128.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults() {
        let mut config = WidgetConfig::default();
        config.weather.base_url.clear();
        config.logging.format.clear();
        config.server.port = 0;
        config.apply_defaults();
        assert_eq!(config.weather.base_url, "https://api.openweathermap.org/data/2.5");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[weather]
api_key = "0123456789abcdef"

[geolocation]
enabled = false

[logging]
level = "debug"
"#
        )
        .unwrap();

        let config = WidgetConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.weather.api_key.as_deref(), Some("0123456789abcdef"));
        assert!(!config.geolocation.enabled);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.weather.timeout_seconds, 10);
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = WidgetConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("weatherwidget"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
