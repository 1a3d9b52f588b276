//! `WeatherWidget` - current conditions and a short daily outlook
//!
//! This library fetches current weather and 3-hourly forecasts from
//! OpenWeatherMap, condenses the forecast into daily summaries and keeps
//! the widget state that the CLI and the HTTP API render.

pub mod api;
pub mod config;
pub mod error;
pub mod forecast;
pub mod geolocation;
pub mod models;
pub mod render;
pub mod telemetry;
pub mod theme;
pub mod weather;
pub mod web;
pub mod widget;

// Re-export core types for public API
pub use config::WidgetConfig;
pub use error::WidgetError;
pub use forecast::{FORECAST_DAYS, aggregate};
pub use geolocation::{ConfiguredGeolocation, GeolocationSource, IpGeolocation};
pub use models::{CurrentConditions, DailySummary, IntervalReading, Position, WeatherQuery};
pub use render::render;
pub use theme::ConditionCategory;
pub use weather::{OpenWeatherClient, WeatherProvider};
pub use widget::{Action, SearchFlow, WidgetState, reduce};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WidgetError>;
