use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mood_movies::{
    routes::{create_router, AppState},
    services::{
        aggregator::{Aggregator, AggregatorSettings},
        freesound::{FreesoundClient, TokenCache},
        providers::{MovieProvider, OmdbProvider},
        weather::WeatherService,
    },
};

/// Test server whose upstream APIs all point at `upstream`
fn create_test_server(upstream: &MockServer, freesound_credentials: bool) -> TestServer {
    let http_client = reqwest::Client::new();

    let movie_provider: Arc<dyn MovieProvider> = Arc::new(OmdbProvider::new(
        http_client.clone(),
        "test_key".to_string(),
        upstream.uri(),
    ));

    let credentials =
        freesound_credentials.then(|| ("client".to_string(), "secret".to_string()));

    let state = AppState {
        aggregator: Aggregator::new(movie_provider.clone(), AggregatorSettings::default()),
        movie_provider,
        freesound: FreesoundClient::new(
            http_client.clone(),
            format!("{}/apiv2", upstream.uri()),
            credentials,
            TokenCache::new(),
        ),
        weather: WeatherService::new(
            http_client,
            None,
            upstream.uri(),
            "Tunis,TN".to_string(),
        ),
    };

    TestServer::new(create_router(state)).unwrap()
}

fn search_hit(id: &str, title: &str) -> Value {
    json!({"Title": title, "Year": "2004", "imdbID": id, "Type": "movie", "Poster": "N/A"})
}

async fn mount_search(upstream: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("type", "movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(upstream)
        .await;
}

async fn mount_detail(upstream: &MockServer, id: &str, title: &str, rating: &str) {
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("i", id))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Title": title,
            "Year": "2004",
            "Genre": "Comedy, Romance",
            "Plot": "N/A",
            "Poster": "N/A",
            "imdbRating": rating,
            "imdbID": id,
            "Response": "True"
        })))
        .mount(upstream)
        .await;
}

#[tokio::test]
async fn test_health_check() {
    let upstream = MockServer::start().await;
    let server = create_test_server(&upstream, false);

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let upstream = MockServer::start().await;
    let server = create_test_server(&upstream, false);

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("trace-me-42"),
        )
        .await;
    assert_eq!(response.header("x-request-id"), "trace-me-42");

    let response = server.get("/health").await;
    assert!(!response.header("x-request-id").is_empty());
}

#[tokio::test]
async fn test_recommendations_ranked_and_deduplicated() {
    let upstream = MockServer::start().await;

    mount_search(
        &upstream,
        json!({
            "Search": [
                search_hit("tt001", "Shaun of the Dead"),
                search_hit("tt002", "Hot Fuzz"),
                search_hit("tt003", "Paul")
            ],
            "totalResults": "3",
            "Response": "True"
        }),
    )
    .await;
    mount_detail(&upstream, "tt001", "Shaun of the Dead", "7.9").await;
    mount_detail(&upstream, "tt002", "Hot Fuzz", "7.8").await;
    mount_detail(&upstream, "tt003", "Paul", "N/A").await;

    let server = create_test_server(&upstream, false);
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "mood": "Happy",
            "genres": ["Comedy"],
            "weather": "light rain"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(
        body["keywords"],
        json!(["comedy", "adventure", "musical", "feel-good", "Comedy", "cozy"])
    );

    let movies = body["movies"].as_array().unwrap();
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0]["title"], "Shaun of the Dead");
    assert_eq!(movies[0]["rating"], "7.9");
    assert_eq!(movies[1]["title"], "Hot Fuzz");
    assert_eq!(movies[1]["plot"], "No description available.");
}

#[tokio::test]
async fn test_recommendations_empty_search_is_no_matches() {
    let upstream = MockServer::start().await;
    mount_search(
        &upstream,
        json!({"Response": "False", "Error": "Movie not found!"}),
    )
    .await;

    let server = create_test_server(&upstream, false);
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({"mood": "Relaxed", "genres": ["Documentary"]}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "no_matches");
    assert!(body["message"].as_str().unwrap().contains("No movies matched"));
    // no weather in the request, so the demo "clear sky" adds "adventure"
    assert_eq!(
        body["keywords"],
        json!(["calm", "peaceful", "slow-burn", "contemplative", "Documentary", "adventure"])
    );
}

#[tokio::test]
async fn test_recommendations_refused_search_is_no_matches() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("s", "Drama"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "Response": "False",
            "Error": "Request limit reached!"
        })))
        .mount(&upstream)
        .await;
    mount_search(
        &upstream,
        json!({"Response": "False", "Error": "Movie not found!"}),
    )
    .await;

    let server = create_test_server(&upstream, false);
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({"mood": "Sad", "genres": ["Drama"]}))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "no_matches");
}

#[tokio::test]
async fn test_recommendations_upstream_failure_is_bad_gateway() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("down"))
        .mount(&upstream)
        .await;

    let server = create_test_server(&upstream, false);
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({"mood": "Sad", "genres": ["Drama"], "weather": "mist"}))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_recommendations_require_mood_and_genre() {
    let upstream = MockServer::start().await;
    let server = create_test_server(&upstream, false);

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({"mood": "Happy", "genres": []}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({"genres": ["Action"]}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Please select your mood and at least one genre!"
    );
}

#[tokio::test]
async fn test_keywords_endpoint() {
    let upstream = MockServer::start().await;
    let server = create_test_server(&upstream, false);

    let response = server
        .get("/api/v1/keywords")
        .add_query_param("mood", "Grumpy")
        .add_query_param("genres", "Horror, Thriller, Action")
        .add_query_param("weather", "heavy snow")
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Vec<String>>(),
        vec!["Horror", "Thriller", "winter"]
    );
}

#[tokio::test]
async fn test_suggestions_short_query_skips_upstream() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Response": "False"})))
        .expect(0)
        .mount(&upstream)
        .await;

    let server = create_test_server(&upstream, false);
    let response = server
        .get("/api/v1/suggestions")
        .add_query_param("q", "I")
        .await;

    response.assert_status_ok();
    assert!(response.json::<Vec<Value>>().is_empty());
}

#[tokio::test]
async fn test_suggestions_lookup() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("s", "Incep"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Search": [search_hit("tt1375666", "Inception")],
            "Response": "True"
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let server = create_test_server(&upstream, false);
    let response = server
        .get("/api/v1/suggestions")
        .add_query_param("q", "Incep")
        .await;

    response.assert_status_ok();
    let suggestions: Vec<Value> = response.json();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0]["Title"], "Inception");
    assert_eq!(suggestions[0]["imdbRating"], "N/A");
    assert_eq!(suggestions[0]["Genre"], "movie");
}

#[tokio::test]
async fn test_suggestions_upstream_failure_is_empty() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&upstream)
        .await;

    let server = create_test_server(&upstream, false);
    let response = server
        .get("/api/v1/suggestions")
        .add_query_param("q", "Heat")
        .await;

    response.assert_status_ok();
    assert!(response.json::<Vec<Value>>().is_empty());
}

#[tokio::test]
async fn test_freesound_without_credentials() {
    let upstream = MockServer::start().await;
    let server = create_test_server(&upstream, false);

    let response = server
        .get("/api/freesound")
        .add_query_param("theme", "forest")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>()["error"],
        "FREESOUND_CLIENT_ID and FREESOUND_CLIENT_SECRET must be set"
    );
}

#[tokio::test]
async fn test_freesound_previews() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/apiv2/oauth2/token/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    Mock::given(method("GET"))
        .and(path("/apiv2/search/text/"))
        .and(query_param("query", "city street ambience"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"previews": {"preview-hq-mp3": "https://cdn/city.mp3"}}]
        })))
        .mount(&upstream)
        .await;

    let server = create_test_server(&upstream, true);

    for _ in 0..2 {
        let response = server.get("/api/freesound").add_query_param("q", "city").await;
        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>(),
            json!({"previews": ["https://cdn/city.mp3"]})
        );
    }
}

#[tokio::test]
async fn test_freesound_search_failure() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/apiv2/oauth2/token/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok"})))
        .mount(&upstream)
        .await;

    Mock::given(method("GET"))
        .and(path("/apiv2/search/text/"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&upstream)
        .await;

    let server = create_test_server(&upstream, true);
    let response = server.get("/api/freesound").await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(
        response.json::<Value>(),
        json!({"error": "Freesound search failed", "details": "maintenance"})
    );
}

#[tokio::test]
async fn test_ambiance() {
    let upstream = MockServer::start().await;
    let server = create_test_server(&upstream, false);

    let response = server
        .get("/api/v1/ambiance")
        .add_query_param("theme", "beach")
        .add_query_param("hour", 7)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["theme"], "beach");
    assert_eq!(body["time_mode"], "day");
    assert_eq!(body["time_of_day"], "Morning");
    assert_eq!(body["background"], "beach-day");
    assert_eq!(body["sound_query"], "ocean waves");

    let response = server
        .get("/api/v1/ambiance")
        .add_query_param("theme", "volcano")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .get("/api/v1/ambiance")
        .add_query_param("hour", 24)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_context_reports_location_and_weather() {
    let upstream = MockServer::start().await;
    let server = create_test_server(&upstream, false);

    let response = server.get("/api/v1/context").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["location"], "Tunis, TN");
    assert_eq!(body["weather"]["description"], "clear sky");
    assert_eq!(body["weather"]["temp"], 22);
}

#[tokio::test]
async fn test_recommendations_accept_suggestion_fields() {
    let upstream = MockServer::start().await;
    mount_search(
        &upstream,
        json!({"Response": "False", "Error": "Movie not found!"}),
    )
    .await;

    let server = create_test_server(&upstream, false);
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "mood": "Thoughtful",
            "genres": ["Mystery"],
            "weather": "overcast clouds",
            "last_watched": "Memento",
            "favorite": "Inception",
            "vibe": "twisty"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "no_matches");
    assert_eq!(
        body["keywords"],
        json!(["drama", "philosophical", "mystery", "indie", "Mystery", "mystery"])
    );
}
