use axum::{extract::Query, Json};
use chrono::{Local, Timelike};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::Theme,
    services::ambiance::{self, Ambiance},
};

#[derive(Debug, Deserialize)]
pub struct AmbianceQuery {
    theme: Option<String>,
    /// Hour of day (0-23); the server's local hour when absent
    hour: Option<u32>,
}

/// Background, sound, and time-of-day data for a theme
pub async fn ambiance(Query(params): Query<AmbianceQuery>) -> AppResult<Json<Ambiance>> {
    let theme = match params.theme.as_deref() {
        Some(name) => name.parse::<Theme>().map_err(AppError::InvalidInput)?,
        None => Theme::default(),
    };

    let hour = match params.hour {
        Some(hour) if hour < 24 => hour,
        Some(hour) => {
            return Err(AppError::InvalidInput(format!(
                "hour must be between 0 and 23, got {}",
                hour
            )))
        }
        None => Local::now().hour(),
    };

    Ok(Json(ambiance::ambiance(theme, hour)))
}
