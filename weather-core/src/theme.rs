use serde::{Deserialize, Serialize};

/// Visual category of a condition label. Purely presentational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Theme {
    Rain,
    Storm,
    Snow,
    Haze,
    Cloudy,
    Sunny,
    #[default]
    None,
}

/// Keyword groups in precedence order; first match wins.
const THEME_KEYWORDS: &[(&[&str], Theme)] = &[
    (&["rain", "drizzle"], Theme::Rain),
    (&["thunder", "storm"], Theme::Storm),
    (&["snow"], Theme::Snow),
    (&["mist", "fog", "haze", "smoke"], Theme::Haze),
    (&["cloud"], Theme::Cloudy),
    (&["clear", "sun"], Theme::Sunny),
];

impl Theme {
    /// Case-insensitive substring match against the condition label.
    pub fn classify(condition: &str) -> Self {
        let condition = condition.to_lowercase();

        THEME_KEYWORDS
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| condition.contains(k)))
            .map(|(_, theme)| *theme)
            .unwrap_or(Theme::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Rain => "rain",
            Theme::Storm => "storm",
            Theme::Snow => "snow",
            Theme::Haze => "haze",
            Theme::Cloudy => "cloudy",
            Theme::Sunny => "sunny",
            Theme::None => "",
        }
    }

    pub const fn all() -> &'static [Theme] {
        &[
            Theme::Rain,
            Theme::Storm,
            Theme::Snow,
            Theme::Haze,
            Theme::Cloudy,
            Theme::Sunny,
            Theme::None,
        ]
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
