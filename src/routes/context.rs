use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{models::ContextResponse, routes::AppState};

/// Configured location with its current weather
pub async fn context(State(state): State<Arc<AppState>>) -> Json<ContextResponse> {
    let weather = state.weather.current().await;

    Json(ContextResponse {
        location: state.weather.location(),
        weather,
    })
}
