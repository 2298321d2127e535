use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{error::AppResult, models::PreviewsResponse, routes::AppState};

const DEFAULT_THEME: &str = "ambient";

#[derive(Debug, Deserialize)]
pub struct SoundQuery {
    theme: Option<String>,
    q: Option<String>,
}

impl SoundQuery {
    /// `theme` wins over `q`; empty values count as absent
    fn theme(&self) -> &str {
        [&self.theme, &self.q]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|value| !value.is_empty())
            .unwrap_or(DEFAULT_THEME)
    }
}

/// Ambient sound proxy: preview URLs for a theme
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SoundQuery>,
) -> AppResult<Json<PreviewsResponse>> {
    let theme = params.theme();

    let previews = state.freesound.search_previews(theme).await.inspect_err(|e| {
        tracing::error!(theme = %theme, error = %e, "Freesound proxy error");
    })?;

    Ok(Json(PreviewsResponse { previews }))
}
