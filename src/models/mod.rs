//! Data models for the weather widget
//!
//! This module contains the core domain models organized by concern:
//! - Location: coordinates and the query shape sent to the provider
//! - Weather: current conditions and raw interval readings
//! - Forecast: condensed daily summaries

pub mod forecast;
pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use forecast::DailySummary;
pub use location::{Position, WeatherQuery};
pub use weather::{CurrentConditions, IntervalReading};
