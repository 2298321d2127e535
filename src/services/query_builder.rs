use crate::models::Mood;

/// Upper bound on keywords per recommendation request
pub const MAX_KEYWORDS: usize = 6;

/// Upper bound on user-selected genres used as keywords
pub const MAX_GENRE_TERMS: usize = 2;

/// Weather substrings and the keyword each one contributes, checked in order
const WEATHER_KEYWORDS: [(&str, &str); 4] = [
    ("rain", "cozy"),
    ("clear", "adventure"),
    ("clouds", "mystery"),
    ("snow", "winter"),
];

/// Builds the ordered search keyword list for a recommendation request
///
/// Mood keywords come first, then up to two selected genres, then at most one
/// weather-derived keyword. An unrecognised mood contributes nothing.
pub fn build_search_keywords<S: AsRef<str>>(
    mood: &str,
    genres: &[S],
    weather: Option<&str>,
) -> Vec<String> {
    let mut keywords: Vec<String> = mood
        .parse::<Mood>()
        .map(|mood| mood.keywords().iter().map(|k| k.to_string()).collect())
        .unwrap_or_default();

    keywords.extend(
        genres
            .iter()
            .take(MAX_GENRE_TERMS)
            .map(|genre| genre.as_ref().to_string()),
    );

    if let Some(term) = weather.and_then(weather_keyword) {
        keywords.push(term.to_string());
    }

    keywords.truncate(MAX_KEYWORDS);
    keywords
}

/// Keyword for the first known weather condition mentioned in `description`
pub fn weather_keyword(description: &str) -> Option<&'static str> {
    WEATHER_KEYWORDS
        .iter()
        .find(|(condition, _)| description.contains(condition))
        .map(|(_, keyword)| *keyword)
}
