//! Configuration validation.
//!
//! Validates configuration at load time to catch common errors early.

use super::Config;
use thiserror::Error;
use weatherbot_proto::casemap::irc_position;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.host is required")]
    MissingHost,
    #[error("server.port must not be 0")]
    InvalidPort,
    #[error("identity.nickname is required")]
    MissingNickname,
    #[error("identity.nickname contains invalid characters: '{0}'")]
    InvalidNickname(String),
    #[error("channel names must start with '#' or '&' and contain no spaces, commas or control characters, got '{0}'")]
    InvalidChannel(String),
    #[error("channel listed more than once: {0}")]
    DuplicateChannel(String),
    #[error("weather.timeout_secs must not be 0")]
    InvalidWeatherTimeout,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // Server
    if config.server.host.trim().is_empty() {
        errors.push(ValidationError::MissingHost);
    }
    if config.server.port == 0 {
        errors.push(ValidationError::InvalidPort);
    }

    // Identity
    let nick = &config.identity.nickname;
    if nick.is_empty() {
        errors.push(ValidationError::MissingNickname);
    } else if !is_valid_nickname(nick) {
        errors.push(ValidationError::InvalidNickname(nick.clone()));
    }

    // Channels
    for (i, channel) in config.channels.iter().enumerate() {
        if !is_valid_channel(channel) {
            errors.push(ValidationError::InvalidChannel(channel.clone()));
        } else if irc_position(&config.channels[..i], channel).is_some() {
            errors.push(ValidationError::DuplicateChannel(channel.clone()));
        }
    }

    if config.weather.timeout_secs == 0 {
        errors.push(ValidationError::InvalidWeatherTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_valid_nickname(nick: &str) -> bool {
    !nick.starts_with([':', '#', '&'])
        && !nick.chars().any(|c| c == ' ' || c == ',' || c.is_control())
}

fn is_valid_channel(channel: &str) -> bool {
    channel.len() > 1
        && channel.starts_with(['#', '&'])
        && !channel
            .chars()
            .any(|c| c == ' ' || c == ',' || c.is_control())
}
