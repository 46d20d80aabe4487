//! LaserBox Settings Crate
//!
//! Loads and saves box configurations and applies `key=value` overrides.

pub mod config;
pub mod error;

pub use config::{default_config_path, parse_bool, Config, OutputSettings, SETTING_KEYS};
pub use error::{ConfigError, SettingsError, SettingsResult};
