/// OMDb API provider
///
/// API Flow:
/// 1. Search: `/?s={keyword}&type=movie` → list of hits with IMDb IDs
/// 2. Details: `/?i={imdb_id}&plot=short` → full record with rating and plot
use crate::{
    error::{AppError, AppResult},
    models::{Movie, OmdbDetailResponse, OmdbSearchResponse, SearchHit},
    services::providers::MovieProvider,
};
use reqwest::Client as HttpClient;
use serde::{de::DeserializeOwned, Deserialize};

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OmdbProvider {
    pub fn new(http_client: HttpClient, api_key: String, api_url: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Sends a lookup and decodes the body
    ///
    /// OMDb refuses lookups (bad key, request limit) with a non-2xx status and
    /// its usual `{"Response":"False","Error":..}` body. Those decode like any
    /// unsuccessful answer. Other non-2xx bodies are errors.
    async fn get<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> AppResult<T> {
        let url = format!("{}/", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<OmdbRefusal>(&body) {
            Ok(refusal) if refusal.response == "False" => {
                tracing::warn!(
                    status = %status,
                    reason = refusal.error.as_deref().unwrap_or("none"),
                    provider = "omdb",
                    "Lookup refused, treating as no result"
                );
                serde_json::from_str(&body).map_err(|e| {
                    AppError::ExternalApi(format!("Unreadable OMDb response: {}", e))
                })
            }
            _ => Err(AppError::ExternalApi(format!(
                "OMDb API returned status {}: {}",
                status, body
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OmdbRefusal {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

#[async_trait::async_trait]
impl MovieProvider for OmdbProvider {
    async fn search(&self, keyword: &str) -> AppResult<Vec<SearchHit>> {
        let body: OmdbSearchResponse = self.get(&[("s", keyword), ("type", "movie")]).await?;

        let hits = body.search.unwrap_or_default();

        if hits.is_empty() {
            tracing::debug!(
                keyword = %keyword,
                reason = body.error.as_deref().unwrap_or("none"),
                provider = "omdb",
                "Search returned no results"
            );
        } else {
            tracing::debug!(
                keyword = %keyword,
                results = hits.len(),
                provider = "omdb",
                "Search completed"
            );
        }

        Ok(hits)
    }

    async fn fetch_details(&self, imdb_id: &str) -> AppResult<Option<Movie>> {
        let body: OmdbDetailResponse = self.get(&[("i", imdb_id), ("plot", "short")]).await?;

        if body.response != "True" {
            tracing::debug!(
                imdb_id = %imdb_id,
                reason = body.error.as_deref().unwrap_or("none"),
                provider = "omdb",
                "Detail lookup unsuccessful"
            );
        }

        Ok(body.into_movie())
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}
