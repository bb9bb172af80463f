//! HeightCarve Settings Crate
//!
//! Loads and saves carving configuration files.

pub mod config;
pub mod error;

pub use config::{Config, ConfigFormat, OutputSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
