//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}

// =============================================================================
// Server Defaults
// =============================================================================

pub fn default_host() -> String {
    "irc.server.com".to_string()
}

pub fn default_port() -> u16 {
    6697
}

// =============================================================================
// Identity Defaults
// =============================================================================

pub fn default_nickname() -> String {
    "WeatherBot".to_string()
}

pub fn default_realname() -> String {
    "MansionNet Weather Information Bot".to_string()
}

pub fn default_channels() -> Vec<String> {
    vec!["#help".to_string(), "#welcome".to_string()]
}

// =============================================================================
// Timing Defaults
// =============================================================================

pub fn default_connect_cooldown() -> u64 {
    30
}

pub fn default_registration_cooldown() -> u64 {
    5
}

pub fn default_active_cooldown() -> u64 {
    30
}

pub fn default_join_delay_ms() -> u64 {
    1000
}

// =============================================================================
// Weather Defaults
// =============================================================================

pub fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

pub fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

pub fn default_weather_timeout() -> u64 {
    10
}
