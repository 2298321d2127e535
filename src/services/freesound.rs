/// Freesound audio search behind client credentials
///
/// API Flow:
/// 1. Token: `POST /oauth2/token/` with the client credentials → bearer token
/// 2. Search: `GET /search/text/` with the bearer token → preview URLs
///
/// The token lives in an explicit [`TokenCache`] shared through application
/// state, so concurrent requests reuse one token and refresh it once.
use crate::{
    error::{AppError, AppResult},
    services::ambiance::sound_query,
};
use chrono::{DateTime, Duration, Utc};
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Tokens are refreshed once they are this close to expiry
const REFRESH_MARGIN_SECS: i64 = 60;
const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;
const MAX_DURATION_SECS: u32 = 120;
const PAGE_SIZE: u32 = 10;
const PREVIEW_FIELDS: &str = "previews,previews.preview-hq-mp3,previews.preview-lq-mp3";

#[derive(Debug, Clone, PartialEq)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at - Duration::seconds(REFRESH_MARGIN_SECS)
    }
}

/// Short-lived bearer token cache
#[derive(Clone, Default)]
pub struct TokenCache {
    inner: Arc<Mutex<Option<CachedToken>>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached token while fresh, otherwise runs `refresh` and caches its result
    ///
    /// The lock is held across the refresh so concurrent callers wait for one
    /// exchange instead of racing their own.
    pub async fn get_or_refresh<F, Fut>(&self, now: DateTime<Utc>, refresh: F) -> AppResult<String>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = AppResult<TokenGrant>>,
    {
        let mut guard = self.inner.lock().await;

        if let Some(token) = guard.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(token.access_token.clone());
        }

        let grant = refresh().await?;
        let ttl = grant.expires_in.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        let token = CachedToken {
            access_token: grant.access_token,
            expires_at: now + Duration::seconds(ttl),
        };

        tracing::info!(expires_at = %token.expires_at, "Freesound token refreshed");

        let access_token = token.access_token.clone();
        *guard = Some(token);
        Ok(access_token)
    }
}

/// OAuth token endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    previews: Option<HashMap<String, String>>,
}

impl SearchResult {
    /// Preferred preview URL: HQ mp3, then LQ mp3, then whatever is offered
    fn preferred_preview(self) -> Option<String> {
        let mut previews = self.previews?;
        previews
            .remove("preview-hq-mp3")
            .or_else(|| previews.remove("preview-lq-mp3"))
            .or_else(|| {
                let mut keys: Vec<String> = previews.keys().cloned().collect();
                keys.sort();
                keys.first().and_then(|key| previews.remove(key))
            })
    }
}

#[derive(Clone)]
pub struct FreesoundClient {
    http_client: HttpClient,
    api_url: String,
    credentials: Option<(String, String)>,
    tokens: TokenCache,
}

impl FreesoundClient {
    pub fn new(
        http_client: HttpClient,
        api_url: String,
        credentials: Option<(String, String)>,
        tokens: TokenCache,
    ) -> Self {
        Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            credentials,
            tokens,
        }
    }

    /// Preview URLs for an ambient theme (or any free-text query)
    pub async fn search_previews(&self, theme: &str) -> AppResult<Vec<String>> {
        let (client_id, client_secret) = self.credentials.as_ref().ok_or_else(|| {
            AppError::MissingCredentials(
                "FREESOUND_CLIENT_ID and FREESOUND_CLIENT_SECRET must be set".to_string(),
            )
        })?;

        let token = self
            .tokens
            .get_or_refresh(Utc::now(), || self.request_token(client_id, client_secret))
            .await?;

        let query = sound_query(theme);
        let url = format!("{}/search/text/", self.api_url);
        let filter = format!("duration:[0 TO {}]", MAX_DURATION_SECS);
        let page_size = PAGE_SIZE.to_string();

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("query", query),
                ("fields", PREVIEW_FIELDS),
                ("filter", filter.as_str()),
                ("page_size", page_size.as_str()),
            ])
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| AppError::Proxy(e.to_string()))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamSearch(body));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::Proxy(e.to_string()))?;

        let previews: Vec<String> = body
            .results
            .into_iter()
            .filter_map(SearchResult::preferred_preview)
            .collect();

        tracing::info!(
            theme = %theme,
            query = %query,
            previews = previews.len(),
            "Freesound search completed"
        );

        Ok(previews)
    }

    async fn request_token(&self, client_id: &str, client_secret: &str) -> AppResult<TokenGrant> {
        let url = format!("{}/oauth2/token/", self.api_url);

        let response = self
            .http_client
            .post(&url)
            .form(&[
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Proxy(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Proxy(format!(
                "Failed to get Freesound token: {} {}",
                status.as_u16(),
                body
            )));
        }

        response
            .json::<TokenGrant>()
            .await
            .map_err(|e| AppError::Proxy(e.to_string()))
    }
}
