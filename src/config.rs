//! Configuration file support for the restoration client.
//!
//! This module provides serialization and deserialization of client settings:
//! where to send images, which page elements to drive, and how loud to log.

use serde::{Deserialize, Serialize};

use crate::constants::{HIDDEN_CLASS, RESTORE_ENDPOINT, UPLOAD_FIELD_NAME, elements};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }

    /// Convert to log crate's Level (used by console_log, which has no "off").
    pub fn to_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Ids of the page elements the browser client drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementIds {
    #[serde(default = "default_form_id")]
    pub form: String,
    #[serde(default = "default_file_input_id")]
    pub file_input: String,
    #[serde(default = "default_submit_button_id")]
    pub submit_button: String,
    #[serde(default = "default_loader_id")]
    pub loader: String,
    #[serde(default = "default_image_id")]
    pub image: String,
}

fn default_form_id() -> String {
    elements::FORM.to_string()
}

fn default_file_input_id() -> String {
    elements::FILE_INPUT.to_string()
}

fn default_submit_button_id() -> String {
    elements::SUBMIT_BUTTON.to_string()
}

fn default_loader_id() -> String {
    elements::LOADER.to_string()
}

fn default_image_id() -> String {
    elements::IMAGE.to_string()
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            form: default_form_id(),
            file_input: default_file_input_id(),
            submit_button: default_submit_button_id(),
            loader: default_loader_id(),
            image: default_image_id(),
        }
    }
}

/// Client configuration that can be loaded from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreConfig {
    /// Version of the configuration file format
    #[serde(default = "default_version")]
    pub version: u32,

    /// Base URL of the restoration server. Empty means same origin.
    #[serde(default)]
    pub server_url: String,

    /// Path of the restoration endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Multipart field carrying the image
    #[serde(default = "default_field_name")]
    pub field_name: String,

    /// Page element ids (browser only)
    #[serde(default)]
    pub elements: ElementIds,

    /// CSS class toggled on the loading indicator
    #[serde(default = "default_hidden_class")]
    pub hidden_class: String,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_endpoint() -> String {
    RESTORE_ENDPOINT.to_string()
}

fn default_field_name() -> String {
    UPLOAD_FIELD_NAME.to_string()
}

fn default_hidden_class() -> String {
    HIDDEN_CLASS.to_string()
}

impl RestoreConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            server_url: String::new(),
            endpoint: default_endpoint(),
            field_name: default_field_name(),
            elements: ElementIds::default(),
            hidden_class: default_hidden_class(),
            log_level: LogLevel::default(),
        }
    }

    /// Full URL the upload is posted to.
    ///
    /// Joins `server_url` and `endpoint` with exactly one slash. With an
    /// empty server URL the endpoint is returned as-is (same origin).
    pub fn request_url(&self) -> String {
        let base = self.server_url.trim_end_matches('/');
        if base.is_empty() {
            return self.endpoint.clone();
        }
        let path = self.endpoint.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "photo-restore-config.json"
    }

    /// Get the default config file path.
    /// Returns None on WASM (no filesystem access).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("photo-restore").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("photo-restore")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from an explicit file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load_from_path(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// LocalStorage key for WASM config loading.
    #[cfg(target_arch = "wasm32")]
    const LOCALSTORAGE_KEY: &'static str = "photo-restore-config";

    /// Try to load configuration from localStorage (WASM only).
    /// Returns None if not found or can't be parsed.
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_local_storage() -> Option<Self> {
        let window = web_sys::window()?;
        let storage = window.local_storage().ok()??;

        match storage.get_item(Self::LOCALSTORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from localStorage");
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config from localStorage: {}", e);
                    None
                }
            },
            Ok(None) => {
                log::debug!("No config found in localStorage");
                None
            }
            Err(e) => {
                log::warn!("Failed to read from localStorage: {:?}", e);
                None
            }
        }
    }
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
