//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Config struct definitions (Config, ServerConfig, IdentityConfig, TimingConfig, WeatherConfig)
//! - [`defaults`]: serde default value functions
//! - [`validation`]: checks run after every load

mod defaults;
mod types;
mod validation;

pub use types::{Config, ConfigError, TimingConfig, WeatherConfig};
pub use validation::validate;
