use crate::{error::AppResult, models::Weather};
use reqwest::Client as HttpClient;
use serde::Deserialize;

/// Weather reported when no API key is configured or the lookup cannot be made
pub fn demo_weather() -> Weather {
    Weather {
        description: "clear sky".to_string(),
        temp: 22,
    }
}

#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    weather: Vec<OpenWeatherCondition>,
    main: OpenWeatherMain,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherMain {
    temp: f64,
}

/// Current weather for one configured city via OpenWeatherMap
#[derive(Clone)]
pub struct WeatherService {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    city: String,
}

impl WeatherService {
    pub fn new(
        http_client: HttpClient,
        api_key: Option<String>,
        api_url: String,
        city: String,
    ) -> Self {
        Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            city,
        }
    }

    /// Configured city for display, e.g. "Tunis,TN" → "Tunis, TN"
    pub fn location(&self) -> String {
        self.city
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Current weather, if known
    ///
    /// A missing key or a transport failure yields demo weather. A non-success
    /// answer from the API yields `None`: weather is then simply not used.
    pub async fn current(&self) -> Option<Weather> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Some(demo_weather());
        };

        match self.fetch(api_key).await {
            Ok(weather) => weather,
            Err(e) => {
                tracing::info!(error = %e, city = %self.city, "Weather unavailable, using demo data");
                Some(demo_weather())
            }
        }
    }

    async fn fetch(&self, api_key: &str) -> AppResult<Option<Weather>> {
        let url = format!("{}/weather", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("q", self.city.as_str()),
                ("appid", api_key),
                ("units", "metric"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(
                status = %response.status(),
                city = %self.city,
                "Weather API returned non-success status"
            );
            return Ok(None);
        }

        let body: OpenWeatherResponse = response.json().await?;
        let weather = body.weather.into_iter().next().map(|condition| Weather {
            description: condition.description,
            temp: body.main.temp.round() as i32,
        });

        Ok(weather)
    }
}
