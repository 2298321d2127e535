use axum::{http::StatusCode, middleware, routing::get, routing::post, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Config,
    middleware::{make_span_with_request_id, request_id_middleware},
    services::{
        aggregator::{Aggregator, AggregatorSettings},
        freesound::{FreesoundClient, TokenCache},
        providers::{MovieProvider, OmdbProvider},
        weather::WeatherService,
    },
};

pub mod ambiance;
pub mod context;
pub mod freesound;
pub mod recommendations;
pub mod suggestions;

/// Shared handler dependencies
#[derive(Clone)]
pub struct AppState {
    pub movie_provider: Arc<dyn MovieProvider>,
    pub aggregator: Aggregator,
    pub freesound: FreesoundClient,
    pub weather: WeatherService,
}

impl AppState {
    /// Wires the production clients from configuration
    pub fn from_config(config: &Config) -> Self {
        let http_client = reqwest::Client::new();

        let movie_provider: Arc<dyn MovieProvider> = Arc::new(OmdbProvider::new(
            http_client.clone(),
            config.omdb_api_key.clone(),
            config.omdb_api_url.clone(),
        ));

        let settings = AggregatorSettings {
            sample_size: config.recommendation_sample_size,
            min_rating: config.recommendation_min_rating,
            max_results: config.recommendation_max_results,
        };

        Self {
            aggregator: Aggregator::new(movie_provider.clone(), settings),
            movie_provider,
            freesound: FreesoundClient::new(
                http_client.clone(),
                config.freesound_api_url.clone(),
                config.freesound_credentials(),
                TokenCache::new(),
            ),
            weather: WeatherService::new(
                http_client,
                config.openweather_api_key.clone(),
                config.openweather_api_url.clone(),
                config.weather_city.clone(),
            ),
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/freesound", get(freesound::search))
        .nest("/api/v1", api_routes())
        .with_state(Arc::new(state))
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recommendations", post(recommendations::recommend))
        .route("/keywords", get(recommendations::keywords))
        .route("/suggestions", get(suggestions::suggest))
        .route("/ambiance", get(ambiance::ambiance))
        .route("/context", get(context::context))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
