//! Application configuration
//!
//! INI-backed settings for the provider endpoint, viewport defaults,
//! classification parameters, and logging, stored at
//! `~/.landgrid/config.ini`.

mod file;

pub use file::{
    config_directory, config_file_path, ClassificationSettings, ConfigFile, ConfigFileError,
    LoggingSettings, ProviderSettings, ViewportSettings, DEFAULT_BASE_URL, DEFAULT_GRID_SIZE,
    DEFAULT_LOG_LEVEL, DEFAULT_TIMEOUT_SECS, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH,
};
