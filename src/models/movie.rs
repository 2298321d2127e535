use serde::{Deserialize, Serialize};

/// Value OMDb uses for any missing field
pub const NOT_AVAILABLE: &str = "N/A";

const POSTER_PLACEHOLDER: &str = "https://via.placeholder.com/300x450?text=No+Poster";
const PLOT_PLACEHOLDER: &str = "No description available.";
const MAX_GENRE_BADGES: usize = 3;

/// Full movie record as returned by an OMDb detail lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default = "not_available")]
    pub poster: String,
    /// Rating as reported upstream; may be "N/A"
    #[serde(rename = "imdbRating", default = "not_available")]
    pub rating: String,
    #[serde(rename = "Genre", default)]
    pub genre: String,
    #[serde(rename = "Plot", default)]
    pub plot: String,
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

impl Movie {
    /// Numeric rating, if the upstream value parses as a finite number
    pub fn numeric_rating(&self) -> Option<f32> {
        self.rating
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|rating| rating.is_finite())
    }
}

/// One entry of an OMDb search result array
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(rename = "Poster", default = "not_available")]
    pub poster: String,
}

impl From<SearchHit> for Movie {
    /// Search hits carry no rating or plot, so suggestions fall back to
    /// the result type for the genre line.
    fn from(hit: SearchHit) -> Self {
        Movie {
            imdb_id: hit.imdb_id,
            title: hit.title,
            year: hit.year,
            poster: hit.poster,
            rating: not_available(),
            genre: hit.kind,
            plot: String::new(),
        }
    }
}

/// Card-ready projection of a movie
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MovieCard {
    pub title: String,
    pub year: String,
    pub poster: String,
    /// Omitted when the upstream rating is "N/A"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    pub genres: Vec<String>,
    pub plot: String,
}

impl From<&Movie> for MovieCard {
    fn from(movie: &Movie) -> Self {
        let poster = if movie.poster == NOT_AVAILABLE || movie.poster.is_empty() {
            POSTER_PLACEHOLDER.to_string()
        } else {
            movie.poster.clone()
        };

        let rating = (movie.rating != NOT_AVAILABLE).then(|| movie.rating.clone());

        let genres = movie
            .genre
            .split(", ")
            .filter(|g| !g.is_empty())
            .take(MAX_GENRE_BADGES)
            .map(str::to_string)
            .collect();

        let plot = if movie.plot == NOT_AVAILABLE || movie.plot.is_empty() {
            PLOT_PLACEHOLDER.to_string()
        } else {
            movie.plot.clone()
        };

        Self {
            title: movie.title.clone(),
            year: movie.year.clone(),
            poster,
            rating,
            genres,
            plot,
        }
    }
}
