//! Configuration management for WupKit
//!
//! Supports JSON and TOML files. Sections:
//! - Parser options (terminator, tolerances, arc sampling)
//! - Editor options (edit strategy, number precision)
//! - Output preferences for the command-line tool

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use wupkit_editor::EditorOptions;
use wupkit_parser::ParserOptions;

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Name of the application directory under the platform config dir
pub const APP_DIR_NAME: &str = "wupkit";

/// File name of the default configuration
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Output preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Pretty-print JSON output
    pub pretty_json: bool,
    /// List unhandled statements in summaries
    pub show_unhandled: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            pretty_json: false,
            show_unhandled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub parser: ParserOptions,
    pub editor: EditorOptions,
    pub output: OutputSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a `.json` or `.toml` file and validate
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load `path` when it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate and write to a `.json` or `.toml` file
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    pub fn validate(&self) -> SettingsResult<()> {
        self.parser
            .validate()
            .map_err(|reason| SettingsError::InvalidSetting {
                key: "parser".to_string(),
                reason,
            })?;
        self.editor
            .validate()
            .map_err(|reason| SettingsError::InvalidSetting {
                key: "editor".to_string(),
                reason,
            })?;
        Ok(())
    }
}

/// Platform configuration directory for WupKit
pub fn config_dir() -> ConfigResult<PathBuf> {
    let mut path = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or(ConfigError::NoConfigDirectory)?;
    path.push(APP_DIR_NAME);
    Ok(path)
}

/// Default location of the configuration file
pub fn default_config_path() -> ConfigResult<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}
