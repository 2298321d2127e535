use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Emotional label driving keyword selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Sad,
    Adventurous,
    Romantic,
    Thoughtful,
    Energetic,
    Relaxed,
}

impl Mood {
    pub const ALL: [Mood; 7] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Adventurous,
        Mood::Romantic,
        Mood::Thoughtful,
        Mood::Energetic,
        Mood::Relaxed,
    ];

    /// Search keywords associated with this mood, most relevant first
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Mood::Happy => &["comedy", "adventure", "musical", "feel-good"],
            Mood::Sad => &["drama", "emotional", "meaningful", "touching"],
            Mood::Adventurous => &["adventure", "action", "exploration", "journey"],
            Mood::Romantic => &["romance", "love", "relationship", "romantic"],
            Mood::Thoughtful => &["drama", "philosophical", "mystery", "indie"],
            Mood::Energetic => &["action", "thriller", "fast-paced", "exciting"],
            Mood::Relaxed => &["calm", "peaceful", "slow-burn", "contemplative"],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Adventurous => "Adventurous",
            Mood::Romantic => "Romantic",
            Mood::Thoughtful => "Thoughtful",
            Mood::Energetic => "Energetic",
            Mood::Relaxed => "Relaxed",
        }
    }
}

impl Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|mood| mood.label() == s)
            .ok_or_else(|| format!("Unknown mood: {}", s))
    }
}

/// Genre labels offered to the user
pub const GENRE_OPTIONS: [&str; 10] = [
    "Action",
    "Comedy",
    "Drama",
    "Romance",
    "Thriller",
    "Sci-Fi",
    "Horror",
    "Documentary",
    "Animation",
    "Fantasy",
];
