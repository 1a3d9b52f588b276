//! WeatherWidget CLI

#![allow(clippy::print_stdout)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use weatherwidget::{
    ConditionCategory, ConfiguredGeolocation, OpenWeatherClient, SearchFlow, WeatherProvider,
    WidgetConfig, WidgetState, render, web,
};

/// Weather widget for the terminal
#[derive(Parser)]
#[command(name = "weatherwidget")]
#[command(author, version, about = "Current weather and a 3-day outlook", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the widget state as JSON instead of the card
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up the weather for a city
    ///
    /// Example: weatherwidget search New York
    Search {
        /// City name, several words are joined with spaces
        #[arg(required = true)]
        city: Vec<String>,
    },

    /// Look up the weather at the current position (the default)
    Locate,

    /// Show which theme a provider condition maps to
    Theme {
        /// Condition label such as "Rain" or "Clouds"
        condition: String,
    },

    /// Serve the widget as a JSON API
    Serve {
        /// Port to listen on (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = WidgetConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    weatherwidget::telemetry::init_tracing(&config.logging, cli.verbose)?;
    debug!("Configuration loaded");

    match cli.command.unwrap_or(Commands::Locate) {
        Commands::Theme { condition } => {
            let category = ConditionCategory::classify(&condition);
            if cli.json {
                let value = serde_json::json!({
                    "category": category,
                    "emoji": category.emoji(),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{} {}", category.emoji(), category);
            }
            Ok(())
        }
        Commands::Serve { port } => {
            let flow = SearchFlow::new(provider(&config)?);
            web::run(port.unwrap_or(config.server.port), flow).await
        }
        Commands::Search { city } => {
            let flow = SearchFlow::new(provider(&config)?);
            let state = flow.search(WidgetState::with_city(city.join(" "))).await;
            finish(&state, cli.json)
        }
        Commands::Locate => {
            let flow = SearchFlow::new(provider(&config)?);
            let geolocation = ConfiguredGeolocation::from_config(&config.geolocation)?;
            let state = flow.locate(&geolocation, WidgetState::default()).await;
            finish(&state, cli.json)
        }
    }
}

fn provider(config: &WidgetConfig) -> Result<Arc<dyn WeatherProvider>> {
    let client = OpenWeatherClient::new(&config.weather)
        .context("Weather lookups need weather.api_key (or WEATHERWIDGET_WEATHER__API_KEY)")?;
    Ok(Arc::new(client))
}

/// Print the final state; an error banner means a failed run
fn finish(state: &WidgetState, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(state)?);
    } else {
        println!("{}", render(state));
    }

    if state.error.is_some() {
        std::process::exit(1);
    }
    Ok(())
}
