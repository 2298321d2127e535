use crate::models::{Theme, TimeMode, TimeOfDay};
use serde::Serialize;

/// Theme names accepted by the sound proxy and their search queries
const SOUND_QUERIES: [(&str, &str); 5] = [
    ("forest", "forest ambience"),
    ("beach", "ocean waves"),
    ("ruins", "wind ambience ruins"),
    ("city", "city street ambience"),
    ("ambient", "ambient"),
];

/// Day runs from 06:00 up to (not including) 18:00
pub fn time_mode(hour: u32) -> TimeMode {
    if (6..18).contains(&hour) {
        TimeMode::Day
    } else {
        TimeMode::Night
    }
}

pub fn time_of_day(hour: u32) -> TimeOfDay {
    match hour {
        0..=11 => TimeOfDay::Morning,
        12..=17 => TimeOfDay::Afternoon,
        _ => TimeOfDay::Evening,
    }
}

/// Audio search query for a theme name; unknown names are searched verbatim
pub fn sound_query(theme: &str) -> &str {
    SOUND_QUERIES
        .iter()
        .find(|(name, _)| *name == theme)
        .map(|(_, query)| *query)
        .unwrap_or(theme)
}

/// Mood words evoked by each background theme
pub fn theme_moods(theme: Theme) -> &'static [&'static str] {
    match theme {
        Theme::Forest => &["peaceful", "natural", "contemplative", "serene", "organic"],
        Theme::Beach => &["relaxed", "carefree", "breezy", "vacation", "light"],
        Theme::Ruins => &["mysterious", "ancient", "thoughtful", "epic", "historical"],
        Theme::City => &["energetic", "modern", "fast-paced", "urban", "vibrant"],
    }
}

/// Everything a client needs to dress the page for a theme and hour
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Ambiance {
    pub theme: Theme,
    pub time_mode: TimeMode,
    pub time_of_day: TimeOfDay,
    /// Asset key for the background image, e.g. `forest-night`
    pub background: String,
    pub moods: Vec<&'static str>,
    pub sound_query: String,
}

pub fn ambiance(theme: Theme, hour: u32) -> Ambiance {
    let mode = time_mode(hour);
    let suffix = match mode {
        TimeMode::Day => "day",
        TimeMode::Night => "night",
    };

    Ambiance {
        theme,
        time_mode: mode,
        time_of_day: time_of_day(hour),
        background: format!("{}-{}", theme.as_str(), suffix),
        moods: theme_moods(theme).to_vec(),
        sound_query: sound_query(theme.as_str()).to_string(),
    }
}
