use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::{
    geolocation::ConfiguredGeolocation,
    models::Position,
    theme::ConditionCategory,
    weather::WeatherProvider,
    widget::{SearchFlow, WidgetState},
};

pub type SharedFlow = SearchFlow<Arc<dyn WeatherProvider>>;

#[derive(Debug, Default, Deserialize)]
pub struct WeatherParams {
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ThemeParams {
    #[serde(default)]
    pub condition: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ApiTheme {
    pub category: ConditionCategory,
    pub emoji: String,
}

pub fn router(flow: SharedFlow) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .route("/theme", get(get_theme))
        .with_state(flow)
}

/// Runs a search flow from a fresh state. Lookup failures are part of the
/// returned state, only malformed requests are rejected.
async fn get_weather(
    State(flow): State<SharedFlow>,
    Query(params): Query<WeatherParams>,
) -> Result<Json<WidgetState>, (StatusCode, String)> {
    if let Some(city) = params.city.filter(|c| !c.trim().is_empty()) {
        let state = flow.search(WidgetState::with_city(city)).await;
        return Ok(Json(state));
    }

    match (params.lat, params.lon) {
        (Some(lat), Some(lon)) => {
            let position = Position::new(lat, lon)
                .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
            let source = ConfiguredGeolocation::Fixed(position);
            Ok(Json(flow.locate(&source, WidgetState::default()).await))
        }
        _ => Err((
            StatusCode::BAD_REQUEST,
            "Provide either city or both lat and lon".to_string(),
        )),
    }
}

async fn get_theme(Query(params): Query<ThemeParams>) -> Json<ApiTheme> {
    let category = ConditionCategory::classify(&params.condition);
    Json(ApiTheme {
        category,
        emoji: category.emoji().to_string(),
    })
}
