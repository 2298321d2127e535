use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// OMDb API key. Kept server-side; never echoed to clients.
    pub omdb_api_key: String,

    /// OMDb API base URL
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// Freesound OAuth client ID. The proxy answers 500 when unset.
    #[serde(default)]
    pub freesound_client_id: Option<String>,

    /// Freesound OAuth client secret
    #[serde(default)]
    pub freesound_client_secret: Option<String>,

    /// Freesound API base URL
    #[serde(default = "default_freesound_api_url")]
    pub freesound_api_url: String,

    /// OpenWeatherMap API key. Demo weather is used when unset.
    #[serde(default)]
    pub openweather_api_key: Option<String>,

    /// OpenWeatherMap API base URL
    #[serde(default = "default_openweather_api_url")]
    pub openweather_api_url: String,

    /// City used for the weather lookup, in OpenWeatherMap `q=` form
    #[serde(default = "default_weather_city")]
    pub weather_city: String,

    /// Maximum number of merged search hits that get a detail lookup
    #[serde(default = "default_sample_size")]
    pub recommendation_sample_size: usize,

    /// Minimum numeric rating kept in the ranked output
    #[serde(default = "default_min_rating")]
    pub recommendation_min_rating: f32,

    /// Maximum number of recommendations returned
    #[serde(default = "default_max_results")]
    pub recommendation_max_results: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_omdb_api_url() -> String {
    "https://www.omdbapi.com".to_string()
}

fn default_freesound_api_url() -> String {
    "https://freesound.org/apiv2".to_string()
}

fn default_openweather_api_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_weather_city() -> String {
    "Tunis,TN".to_string()
}

fn default_sample_size() -> usize {
    8
}

fn default_min_rating() -> f32 {
    6.0
}

fn default_max_results() -> usize {
    8
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Both Freesound credentials, if configured and non-empty
    pub fn freesound_credentials(&self) -> Option<(String, String)> {
        match (&self.freesound_client_id, &self.freesound_client_secret) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => {
                Some((id.clone(), secret.clone()))
            }
            _ => None,
        }
    }
}
