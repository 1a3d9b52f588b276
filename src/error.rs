//! Error types and handling for the weather widget

use thiserror::Error;

/// Main error type for the weather widget
#[derive(Error, Debug)]
pub enum WidgetError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The weather provider answered with a failure status or an unreadable payload
    #[error("Provider error: {message}")]
    Provider { message: String },

    /// The user refused to share their location
    #[error("Location permission denied")]
    PermissionDenied,

    /// No way to determine the current position in this environment
    #[error("Geolocation is not supported in this environment")]
    UnsupportedEnvironment,

    /// The position lookup service could not answer
    #[error("Location unavailable: {message}")]
    LocationUnavailable { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl WidgetError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new provider error
    pub fn provider<S: Into<String>>(message: S) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Create a new location lookup error
    pub fn location_unavailable<S: Into<String>>(message: S) -> Self {
        Self::LocationUnavailable {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message, suitable for the error banner
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WidgetError::Config { .. } => {
                "Configuration error. Please check your config file and API key.".to_string()
            }
            WidgetError::Provider { message } if message.is_empty() => {
                "Error fetching weather".to_string()
            }
            WidgetError::Provider { message } => message.clone(),
            WidgetError::PermissionDenied => {
                "Location permission denied. Please allow location access.".to_string()
            }
            WidgetError::UnsupportedEnvironment => {
                "Geolocation not supported by this environment.".to_string()
            }
            WidgetError::LocationUnavailable { message } => {
                format!("Unable to determine your location: {message}")
            }
            WidgetError::Validation { message } => {
                format!("Invalid input: {message}")
            }
        }
    }
}
