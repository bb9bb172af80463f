//! Configuration files for HeightCarve
//!
//! A configuration file holds the carving parameters used by default and
//! where generated programs are written. JSON and TOML are supported, chosen
//! by file extension. Missing keys fall back to their defaults, so a file
//! only needs to name the values it changes:
//!
//! ```toml
//! [carving]
//! bit_diameter = 0.125
//! max_carving_depth = 0.25
//! consolidation_mode = "both"
//!
//! [output]
//! extension = "ngc"
//! ```

use crate::error::{ConfigError, SettingsError, SettingsResult};
use heightcarve_core::CarvingParameters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the platform configuration directory
const CONFIG_FILE_NAME: &str = "config.toml";

/// On-disk configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a path's extension
    pub fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(format!(
                "{} (config file must be .json or .toml)",
                other.unwrap_or("no extension")
            ))
            .into()),
        }
    }
}

/// Where and how generated programs are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Extension of generated program files, without the dot
    pub extension: String,
    /// Output directory; programs go next to their image when unset
    pub directory: Option<PathBuf>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            extension: "nc".to_string(),
            directory: None,
        }
    }
}

impl OutputSettings {
    /// Path of the program generated for `image`
    pub fn program_path(&self, image: &Path) -> PathBuf {
        let stem = image
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_else(|| "output".into());
        let file_name = format!("{}.{}", stem, self.extension);

        match (&self.directory, image.parent()) {
            (Some(dir), _) => dir.join(file_name),
            (None, Some(parent)) => parent.join(file_name),
            (None, None) => PathBuf::from(file_name),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Carving parameters
    pub carving: CarvingParameters,
    /// Output settings
    pub output: OutputSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration file in the platform config directory
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("heightcarve").join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Load the default config file, or defaults if it does not exist
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.carving.validate()?;

        let extension = self.output.extension.trim();
        if extension.is_empty() {
            return Err(SettingsError::InvalidSetting {
                key: "output.extension".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if extension.contains(['/', '\\']) || extension.starts_with('.') {
            return Err(ConfigError::ValueOutOfRange {
                key: "output.extension".to_string(),
                value: self.output.extension.clone(),
            }
            .into());
        }

        Ok(())
    }
}
