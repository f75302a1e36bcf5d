//! Configuration file handling for ~/.landgrid/config.ini.
//!
//! Loads and saves user configuration with sensible defaults. A missing
//! file means defaults; a missing key means that key's default; a value
//! that fails to parse is an error rather than a silent fallback.

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default tile service base URL.
pub const DEFAULT_BASE_URL: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile";

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default viewport dimensions in pixels.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1024;
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 768;

/// Default classification grid size in pixels.
pub const DEFAULT_GRID_SIZE: u32 = 64;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

/// Provider configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    /// Tile service base URL
    pub base_url: String,
    /// HTTP timeout in seconds
    pub timeout: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Default viewport configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportSettings {
    /// Zoom level
    pub zoom: u8,
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            zoom: crate::coord::DEFAULT_ZOOM,
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

/// Classification configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationSettings {
    /// Grid cell size in pixels
    pub grid_size: u32,
    /// Optional palette override, `name=#RRGGBB,...` format
    pub classes: Option<String>,
}

impl Default for ClassificationSettings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            classes: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Default log level when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigFile {
    /// Provider settings
    pub provider: ProviderSettings,
    /// Viewport defaults
    pub viewport: ViewportSettings,
    /// Classification settings
    pub classification: ClassificationSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Load configuration from the default path (~/.landgrid/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        let mut config = Self::default();

        if let Some(value) = ini.get_from(Some("provider"), "base_url") {
            config.provider.base_url = value.to_string();
        }
        if let Some(value) = ini.get_from(Some("provider"), "timeout") {
            config.provider.timeout = parse_value("provider", "timeout", value)?;
        }

        if let Some(value) = ini.get_from(Some("viewport"), "zoom") {
            let requested: i64 = parse_value("viewport", "zoom", value)?;
            config.viewport.zoom = crate::coord::normalize_zoom(requested);
        }
        if let Some(value) = ini.get_from(Some("viewport"), "width") {
            config.viewport.width = parse_value("viewport", "width", value)?;
        }
        if let Some(value) = ini.get_from(Some("viewport"), "height") {
            config.viewport.height = parse_value("viewport", "height", value)?;
        }

        if let Some(value) = ini.get_from(Some("classification"), "grid_size") {
            config.classification.grid_size = parse_value("classification", "grid_size", value)?;
        }
        if let Some(value) = ini.get_from(Some("classification"), "classes") {
            config.classification.classes = Some(value.to_string());
        }

        if let Some(value) = ini.get_from(Some("logging"), "level") {
            config.logging.level = value.to_string();
        }

        Ok(config)
    }

    /// Save configuration to the default path (~/.landgrid/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let mut ini = Ini::new();
        ini.with_section(Some("provider"))
            .set("base_url", self.provider.base_url.as_str())
            .set("timeout", self.provider.timeout.to_string());
        ini.with_section(Some("viewport"))
            .set("zoom", self.viewport.zoom.to_string())
            .set("width", self.viewport.width.to_string())
            .set("height", self.viewport.height.to_string());
        {
            let mut section = ini.with_section(Some("classification"));
            section.set("grid_size", self.classification.grid_size.to_string());
            if let Some(classes) = &self.classification.classes {
                section.set("classes", classes.as_str());
            }
        }
        ini.with_section(Some("logging"))
            .set("level", self.logging.level.as_str());

        ini.write_to_file(path)
            .map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }
}

fn parse_value<T: std::str::FromStr>(
    section: &str,
    key: &str,
    value: &str,
) -> Result<T, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: "not a valid number".to_string(),
        })
}

/// Get the path to the config directory (~/.landgrid).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".landgrid")
}

/// Get the path to the config file (~/.landgrid/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigFile::load_from(&dir.path().join("nope.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_defaults() {
        let config = ConfigFile::default();
        assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.provider.timeout, 30);
        assert_eq!(config.viewport.zoom, 15);
        assert_eq!(config.classification.grid_size, 64);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");

        let mut config = ConfigFile::default();
        config.provider.base_url = "http://localhost:9000/tiles".to_string();
        config.provider.timeout = 10;
        config.viewport.zoom = 12;
        config.viewport.width = 640;
        config.viewport.height = 480;
        config.classification.grid_size = 32;
        config.classification.classes = Some("water=#0000ff,land=#00ff00".to_string());
        config.logging.level = "debug".to_string();

        config.save_to(&path).unwrap();
        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[viewport]\nzoom = 8\n").unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.viewport.zoom, 8);
        assert_eq!(config.viewport.width, DEFAULT_VIEWPORT_WIDTH);
        assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_out_of_range_zoom_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[viewport]\nzoom = 42\n").unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.viewport.zoom, crate::coord::DEFAULT_ZOOM);
    }

    #[test]
    fn test_invalid_numeric_value_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[provider]\ntimeout = soon\n").unwrap();

        let result = ConfigFile::load_from(&path);
        assert!(matches!(
            result,
            Err(ConfigFileError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        ConfigFile::default().save_to(&path).unwrap();
        assert!(path.exists());
    }
}
