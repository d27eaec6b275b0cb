//! Weather lookup collaborator.
//!
//! The bot only ever sees [`WeatherLookup::lookup`], which always produces
//! a line of reply text. Failures are turned into sentences here and never
//! reach the connection.

use async_trait::async_trait;
use thiserror::Error;

mod codes;
mod open_meteo;
mod report;

pub use open_meteo::OpenMeteo;

/// Errors raised while talking to the weather service.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Payload(#[from] serde_json::Error),

    #[error("no location matches {0}")]
    NotFound(String),

    #[error("forecast request for {place} returned {status}")]
    ForecastStatus {
        place: String,
        status: reqwest::StatusCode,
    },
}

impl WeatherError {
    /// The sentence shown to the channel for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(place) => format!("Could not find location: {place}"),
            Self::ForecastStatus { place, .. } => {
                format!("Could not fetch weather data for {place}")
            }
            Self::Http(e) => format!("Error fetching weather data: {e}"),
            Self::Payload(e) => format!("Error fetching weather data: {e}"),
        }
    }
}

/// Something that can describe the weather at a place.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    /// Formatted summary for `place`, or a sentence describing the failure.
    async fn lookup(&self, place: &str) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            WeatherError::NotFound("Nowhere".to_string()).user_message(),
            "Could not find location: Nowhere"
        );
        assert_eq!(
            WeatherError::ForecastStatus {
                place: "Paris".to_string(),
                status: reqwest::StatusCode::BAD_GATEWAY,
            }
            .user_message(),
            "Could not fetch weather data for Paris"
        );

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let message = WeatherError::Payload(json_err).user_message();
        assert!(message.starts_with("Error fetching weather data: "));
    }
}
