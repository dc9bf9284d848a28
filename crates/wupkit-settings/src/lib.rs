//! WupKit Settings Crate
//!
//! Loads, validates and saves the parser, editor and output configuration.

pub mod config;
pub mod error;

pub use config::{config_dir, default_config_path, Config, OutputSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
