//! Open-Meteo payloads and the colored one-line report built from them.

use serde::Deserialize;
use serde_json::Number;
use weatherbot_proto::colors::{BOLD, Color, RESET, color_code};

use super::codes;

/// Geocoding search response.
#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    /// Absent when nothing matched.
    #[serde(default)]
    pub results: Vec<Location>,
}

/// One geocoding match.
#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// "Paris, France", or just the name when the service gave no country.
    pub fn label(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

/// Forecast response, current conditions only.
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub current: Current,
}

/// Current conditions.
///
/// Numbers are kept as the service wrote them so the report shows the same
/// precision.
#[derive(Debug, Deserialize)]
pub struct Current {
    pub temperature_2m: Number,
    pub relative_humidity_2m: Number,
    pub wind_speed_10m: Number,
    #[serde(default)]
    pub weather_code: Option<i64>,
}

/// Format the reply line, orange on black with the location in bold.
pub fn format_report(location: &Location, current: &Current) -> String {
    let color = color_code(Color::Orange, Color::Black);
    let description = current
        .weather_code
        .map(codes::describe)
        .unwrap_or("Unknown");

    format!(
        "{color}{BOLD}{label}{RESET} {color}【{description}】 ▸ {temp}°C ❋ {humidity}% ⟳ {wind} km/h{RESET}",
        label = location.label(),
        temp = current.temperature_2m,
        humidity = current.relative_humidity_2m,
        wind = current.wind_speed_10m,
    )
}
