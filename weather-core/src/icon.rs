/// Shown when no keyword matches.
pub const DEFAULT_GLYPH: &str = "🌤️";

/// Checked in order; first substring hit wins. Kept apart from the theme
/// keywords, so the two can disagree for labels outside the provider's set.
const ICONS: &[(&str, &str)] = &[
    ("clear", "☀️"),
    ("clouds", "☁️"),
    ("rain", "🌧️"),
    ("drizzle", "🌦️"),
    ("thunderstorm", "⛈️"),
    ("snow", "❄️"),
    ("mist", "🌫️"),
    ("fog", "🌫️"),
    ("haze", "🌫️"),
    ("smoke", "🌫️"),
];

pub fn glyph_for(condition: &str) -> &'static str {
    let condition = condition.to_lowercase();

    ICONS
        .iter()
        .find(|(keyword, _)| condition.contains(keyword))
        .map(|(_, glyph)| *glyph)
        .unwrap_or(DEFAULT_GLYPH)
}
