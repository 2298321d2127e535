use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Background scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Forest,
    Beach,
    Ruins,
    City,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Forest, Theme::Beach, Theme::Ruins, Theme::City];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Forest => "forest",
            Theme::Beach => "beach",
            Theme::Ruins => "ruins",
            Theme::City => "city",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| format!("Unknown theme: {}", s))
    }
}

/// Day or night variant of a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeMode {
    Day,
    Night,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

/// Current weather at the configured location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Weather {
    pub description: String,
    /// Degrees Celsius, rounded
    pub temp: i32,
}
