use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{models::Movie, routes::AppState, services::autocomplete::lookup_suggestions};

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    q: String,
}

/// Handler for title suggestions
///
/// Lookup failures answer with an empty list; suggestions are best-effort.
pub async fn suggest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestQuery>,
) -> Json<Vec<Movie>> {
    let suggestions = lookup_suggestions(state.movie_provider.as_ref(), &params.q)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(query = %params.q, error = %e, "Suggestion lookup failed");
            Vec::new()
        });

    Json(suggestions)
}
