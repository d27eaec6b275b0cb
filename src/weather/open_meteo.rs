//! Open-Meteo client: geocoding search followed by a current-conditions forecast.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::report::{Current, ForecastResponse, GeocodingResponse, Location, format_report};
use super::{WeatherError, WeatherLookup};
use crate::config::WeatherConfig;

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m,weather_code";

/// Weather lookups against the Open-Meteo HTTP API.
pub struct OpenMeteo {
    /// HTTP client with the configured timeout.
    http_client: reqwest::Client,
    geocoding_url: String,
    forecast_url: String,
}

impl OpenMeteo {
    /// Create a client for the configured endpoints.
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http_client,
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
        })
    }

    /// Look up `place` and format the current conditions there.
    pub async fn report(&self, place: &str) -> Result<String, WeatherError> {
        let location = self.geocode(place).await?;
        debug!(
            place = %place,
            name = %location.name,
            latitude = location.latitude,
            longitude = location.longitude,
            "geocoded"
        );
        let current = self.current(place, &location).await?;
        Ok(format_report(&location, &current))
    }

    async fn geocode(&self, place: &str) -> Result<Location, WeatherError> {
        let response = self
            .http_client
            .get(&self.geocoding_url)
            .query(&[
                ("name", place),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "geocoding request rejected");
            return Err(WeatherError::NotFound(place.to_string()));
        }

        let body = response.text().await?;
        let parsed: GeocodingResponse = serde_json::from_str(&body)?;
        parsed
            .results
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::NotFound(place.to_string()))
    }

    async fn current(&self, place: &str, location: &Location) -> Result<Current, WeatherError> {
        let latitude = location.latitude.to_string();
        let longitude = location.longitude.to_string();
        let response = self
            .http_client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", CURRENT_FIELDS),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::ForecastStatus {
                place: place.to_string(),
                status,
            });
        }

        let body = response.text().await?;
        let parsed: ForecastResponse = serde_json::from_str(&body)?;
        Ok(parsed.current)
    }
}

#[async_trait]
impl WeatherLookup for OpenMeteo {
    async fn lookup(&self, place: &str) -> String {
        match self.report(place).await {
            Ok(report) => report,
            Err(e) => {
                warn!(place = %place, error = %e, "weather lookup failed");
                e.user_message()
            }
        }
    }
}
