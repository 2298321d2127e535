use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    /// Proxy credentials are not configured
    #[error("{0}")]
    MissingCredentials(String),

    /// The upstream audio search answered with a non-success status
    #[error("Freesound search failed: {0}")]
    UpstreamSearch(String),

    /// Any other failure while proxying (token exchange, transport, decoding)
    #[error("Proxy error: {0}")]
    Proxy(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::ExternalApi(msg) => (StatusCode::BAD_GATEWAY, json!({ "error": msg })),
            AppError::HttpClient(_) => {
                (StatusCode::BAD_GATEWAY, json!({ "error": self.to_string() }))
            }
            AppError::MissingCredentials(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
            AppError::UpstreamSearch(details) => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": "Freesound search failed", "details": details }),
            ),
            AppError::Proxy(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "proxy_error", "details": details }),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_invalid_input_is_bad_request() {
        let response = AppError::InvalidInput("mood is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "mood is required");
    }

    #[tokio::test]
    async fn test_upstream_search_passes_details_through() {
        let response = AppError::UpstreamSearch("quota exceeded".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Freesound search failed");
        assert_eq!(body["details"], "quota exceeded");
    }

    #[tokio::test]
    async fn test_proxy_error_is_internal() {
        let response = AppError::Proxy("token exchange failed".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "proxy_error");
        assert_eq!(body["details"], "token exchange failed");
    }

    #[tokio::test]
    async fn test_missing_credentials_has_no_details() {
        let response =
            AppError::MissingCredentials("credentials must be set".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "credentials must be set");
        assert!(body.get("details").is_none());
    }
}
