//! Core configuration types.

use super::defaults::*;
use super::validation::{self, ValidationError};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use weatherbot_proto::{FaultPhase, SessionConfig, TransportConfig};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server to connect to.
    #[serde(default)]
    pub server: ServerConfig,
    /// Nickname and realname to register with.
    #[serde(default)]
    pub identity: IdentityConfig,
    /// Channels to join, in order.
    #[serde(default = "default_channels")]
    pub channels: Vec<String>,
    /// Cooldowns and pacing.
    #[serde(default)]
    pub timing: TimingConfig,
    /// Weather service endpoints.
    #[serde(default)]
    pub weather: WeatherConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            identity: IdentityConfig::default(),
            channels: default_channels(),
            timing: TimingConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        validation::validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Transport settings for each connection attempt.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            host: self.server.host.clone(),
            port: self.server.port,
            tls: self.server.tls,
            verify_cert: self.server.verify_cert,
        }
    }

    /// Session settings shared by every connection attempt.
    pub fn session(&self) -> Arc<SessionConfig> {
        Arc::new(SessionConfig {
            nickname: self.identity.nickname.clone(),
            realname: self.identity.realname.clone(),
            channels: self.channels.clone(),
        })
    }
}

/// Server connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host name or address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port (default: 6697).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Connect over TLS (default: true).
    #[serde(default = "default_true")]
    pub tls: bool,
    /// Verify the server certificate (default: false, any certificate is accepted).
    #[serde(default)]
    pub verify_cert: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            tls: true,
            verify_cert: false,
        }
    }
}

/// Identity the bot registers with.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    #[serde(default = "default_nickname")]
    pub nickname: String,
    #[serde(default = "default_realname")]
    pub realname: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            nickname: default_nickname(),
            realname: default_realname(),
        }
    }
}

/// Reconnect cooldowns and join pacing.
#[derive(Debug, Clone, Deserialize)]
pub struct TimingConfig {
    /// Wait after failing to reach the server (default: 30).
    #[serde(default = "default_connect_cooldown")]
    pub connect_cooldown_secs: u64,
    /// Wait after a fault before registration completed (default: 5).
    #[serde(default = "default_registration_cooldown")]
    pub registration_cooldown_secs: u64,
    /// Wait after a fault once registered (default: 30).
    #[serde(default = "default_active_cooldown")]
    pub active_cooldown_secs: u64,
    /// Delay between consecutive JOINs in milliseconds (default: 1000).
    #[serde(default = "default_join_delay_ms")]
    pub join_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            connect_cooldown_secs: default_connect_cooldown(),
            registration_cooldown_secs: default_registration_cooldown(),
            active_cooldown_secs: default_active_cooldown(),
            join_delay_ms: default_join_delay_ms(),
        }
    }
}

impl TimingConfig {
    /// Cooldown before reconnecting after a fault in `phase`.
    pub fn cooldown(&self, phase: FaultPhase) -> Duration {
        let secs = match phase {
            FaultPhase::Connect => self.connect_cooldown_secs,
            FaultPhase::Registration => self.registration_cooldown_secs,
            FaultPhase::Active => self.active_cooldown_secs,
        };
        Duration::from_secs(secs)
    }

    pub fn join_delay(&self) -> Duration {
        Duration::from_millis(self.join_delay_ms)
    }
}

/// Open-Meteo endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    /// HTTP timeout per request (default: 10).
    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            timeout_secs: default_weather_timeout(),
        }
    }
}

impl WeatherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.server.host, "irc.server.com");
        assert_eq!(config.server.port, 6697);
        assert!(config.server.tls);
        assert!(!config.server.verify_cert);
        assert_eq!(config.identity.nickname, "WeatherBot");
        assert_eq!(config.identity.realname, "MansionNet Weather Information Bot");
        assert_eq!(config.channels, vec!["#help", "#welcome"]);
        assert_eq!(config.timing.registration_cooldown_secs, 5);
        assert_eq!(config.timing.active_cooldown_secs, 30);
        assert_eq!(config.weather.timeout_secs, 10);
    }

    #[test]
    fn test_partial_sections_fall_back() {
        let toml = r##"
channels = ["#weather"]

[server]
host = "127.0.0.1"
port = 6667
tls = false

[timing]
registration_cooldown_secs = 1
"##;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 6667);
        assert!(!config.server.tls);
        assert_eq!(config.channels, vec!["#weather"]);
        assert_eq!(config.timing.registration_cooldown_secs, 1);
        assert_eq!(config.timing.active_cooldown_secs, 30);
        assert_eq!(config.timing.join_delay_ms, 1000);
        assert_eq!(config.identity.nickname, "WeatherBot");
    }

    #[test]
    fn test_default_matches_empty_document() {
        let parsed = Config::from_toml("").unwrap();
        let built = Config::default();
        assert_eq!(parsed.server.host, built.server.host);
        assert_eq!(parsed.channels, built.channels);
        assert_eq!(parsed.weather.forecast_url, built.weather.forecast_url);
    }

    #[test]
    fn test_example_file_matches_defaults() {
        let example = Config::from_toml(include_str!("../../weatherbot.example.toml")).unwrap();
        let defaults = Config::default();
        assert_eq!(example.server.host, defaults.server.host);
        assert_eq!(example.server.port, defaults.server.port);
        assert_eq!(example.channels, defaults.channels);
        assert_eq!(
            example.timing.connect_cooldown_secs,
            defaults.timing.connect_cooldown_secs
        );
        assert_eq!(example.weather.geocoding_url, defaults.weather.geocoding_url);
    }

    #[test]
    fn test_cooldown_by_phase() {
        let timing = TimingConfig::default();
        assert_eq!(timing.cooldown(FaultPhase::Connect), Duration::from_secs(30));
        assert_eq!(timing.cooldown(FaultPhase::Registration), Duration::from_secs(5));
        assert_eq!(timing.cooldown(FaultPhase::Active), Duration::from_secs(30));
        assert_eq!(timing.join_delay(), Duration::from_millis(1000));
    }

    #[test]
    fn test_transport_and_session_views() {
        let config = Config::default();
        let transport = config.transport();
        assert_eq!(transport.addr(), "irc.server.com:6697");
        assert!(transport.tls);

        let session = config.session();
        assert_eq!(session.nickname, "WeatherBot");
        assert_eq!(session.channels, vec!["#help", "#welcome"]);
    }

    #[test]
    fn test_parse_error() {
        let err = Config::from_toml("[server\nhost = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_config_lists_every_error() {
        let toml = r#"
[server]
host = ""
port = 0
"#;
        let err = Config::from_toml(toml).unwrap_err();
        let ConfigError::Invalid(errors) = &err else {
            panic!("expected validation failure, got {err:?}");
        };
        assert_eq!(errors.len(), 2);
        assert!(err.to_string().contains("server.host is required"));
        assert!(err.to_string().contains("server.port must not be 0"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/weatherbot.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
