use serde::{Deserialize, Serialize};

pub mod mood;
pub mod movie;
pub mod theme;

pub use mood::{Mood, GENRE_OPTIONS};
pub use movie::{Movie, MovieCard, SearchHit, NOT_AVAILABLE};
pub use theme::{Theme, TimeMode, TimeOfDay, Weather};

// ============================================================================
// OMDb API Types
// ============================================================================

/// Raw response from an OMDb `?s=` search
///
/// OMDb reports "no results" as `{"Response":"False","Error":"Movie not found!"}`
/// with a 200 status, so `search` is optional rather than an error.
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    pub search: Option<Vec<SearchHit>>,
    #[serde(rename = "Response", default)]
    pub response: String,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

/// Raw response from an OMDb `?i=` detail lookup
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbDetailResponse {
    #[serde(rename = "Response", default)]
    pub response: String,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub movie: Option<Movie>,
}

impl OmdbDetailResponse {
    /// The movie, if OMDb flagged the lookup as successful
    pub fn into_movie(self) -> Option<Movie> {
        if self.response == "True" {
            self.movie
        } else {
            None
        }
    }
}

// ============================================================================
// HTTP API Types
// ============================================================================

/// Request body for the recommendations endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub genres: Vec<String>,
    /// Free-text weather description; the weather service is consulted when absent
    #[serde(default)]
    pub weather: Option<String>,
    /// Suggestion-field values; they add no keywords and are only logged
    #[serde(default)]
    pub last_watched: Option<String>,
    #[serde(default)]
    pub favorite: Option<String>,
    #[serde(default)]
    pub vibe: Option<String>,
}

/// Recommendations endpoint response
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendationResponse {
    Ok {
        keywords: Vec<String>,
        movies: Vec<MovieCard>,
    },
    NoMatches {
        keywords: Vec<String>,
        message: String,
    },
}

/// Location and weather shown next to the recommendation form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContextResponse {
    pub location: String,
    pub weather: Option<Weather>,
}

/// Ambient sound proxy success body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreviewsResponse {
    pub previews: Vec<String>,
}
