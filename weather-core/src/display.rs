use crate::{WeatherResult, icon};

/// Text of the success panel, ready to place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherDetails {
    pub name: String,
    pub country: String,
    pub glyph: &'static str,
    /// Rounded, without unit.
    pub temperature: String,
    pub description: String,
    pub humidity: String,
    pub wind_speed: String,
    /// Rounded, without unit.
    pub feels_like: String,
    pub pressure: String,
}

impl From<&WeatherResult> for WeatherDetails {
    fn from(result: &WeatherResult) -> Self {
        Self {
            name: result.name.clone(),
            country: result.country.clone(),
            glyph: icon::glyph_for(&result.condition),
            temperature: round_half_up(result.temperature_c).to_string(),
            description: result.description.clone(),
            humidity: format!("{}%", result.humidity_pct),
            wind_speed: format!("{} m/s", result.wind_speed_mps),
            feels_like: round_half_up(result.feels_like_c).to_string(),
            pressure: format!("{} hPa", result.pressure_hpa),
        }
    }
}

/// Halves round toward positive infinity: 14.5 -> 15, -2.5 -> -2.
pub fn round_half_up(value: f64) -> i64 {
    // `round` sends halves away from zero; only negative halves need moving up.
    let rounded = value.round();
    if value - rounded == 0.5 {
        (rounded + 1.0) as i64
    } else {
        rounded as i64
    }
}
