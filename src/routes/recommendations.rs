use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{MovieCard, RecommendationRequest, RecommendationResponse},
    routes::AppState,
    services::{aggregator::Recommendations, query_builder::build_search_keywords},
};

const NO_MATCHES_MESSAGE: &str =
    "No movies matched your mood this time. Try another mood or different genres!";

/// Handler for the recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    if request.mood.trim().is_empty() || request.genres.is_empty() {
        return Err(AppError::InvalidInput(
            "Please select your mood and at least one genre!".to_string(),
        ));
    }

    let weather = match request.weather {
        Some(description) => Some(description),
        None => state.weather.current().await.map(|w| w.description),
    };

    let keywords = build_search_keywords(
        &request.mood,
        request.genres.as_slice(),
        weather.as_deref(),
    );

    tracing::info!(
        request_id = %request_id,
        mood = %request.mood,
        genres = request.genres.len(),
        weather = weather.as_deref().unwrap_or("unknown"),
        keywords = ?keywords,
        last_watched = request.last_watched.as_deref().unwrap_or("none"),
        favorite = request.favorite.as_deref().unwrap_or("none"),
        vibe = request.vibe.as_deref().unwrap_or("none"),
        "Processing recommendation request"
    );

    let response = match state.aggregator.recommend(&keywords).await? {
        Recommendations::Matches(movies) => RecommendationResponse::Ok {
            keywords,
            movies: movies.iter().map(MovieCard::from).collect(),
        },
        Recommendations::NoMatches => {
            tracing::info!(request_id = %request_id, "No recommendations matched");
            RecommendationResponse::NoMatches {
                keywords,
                message: NO_MATCHES_MESSAGE.to_string(),
            }
        }
    };

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct KeywordsQuery {
    #[serde(default)]
    mood: String,
    /// Comma-separated genre labels
    #[serde(default)]
    genres: String,
    #[serde(default)]
    weather: Option<String>,
}

/// Shows the keyword list a recommendation request would search with
pub async fn keywords(Query(params): Query<KeywordsQuery>) -> Json<Vec<String>> {
    let genres: Vec<&str> = params
        .genres
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .collect();

    Json(build_search_keywords(
        &params.mood,
        genres.as_slice(),
        params.weather.as_deref(),
    ))
}
