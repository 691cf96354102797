//! Configuration file support for the profile editor.
//!
//! Settings are stored as JSON: in the user's config directory on native
//! builds and in `localStorage` in the browser.

use profile_api::ClientSettings;
use serde::{Deserialize, Serialize};

use crate::constants::routes;

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
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Navigation targets used by the profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Route opened after a successful save
    #[serde(default = "default_home_route")]
    pub home: String,

    /// Route unauthenticated visitors are redirected to
    #[serde(default = "default_login_route")]
    pub login: String,
}

fn default_home_route() -> String {
    routes::HOME.to_string()
}

fn default_login_route() -> String {
    routes::LOGIN.to_string()
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            home: default_home_route(),
            login: default_login_route(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Backend connection settings
    #[serde(default)]
    pub api: ClientSettings,

    /// Navigation targets
    #[serde(default)]
    pub routes: RouteConfig,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl EditorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            api: ClientSettings::default(),
            routes: RouteConfig::default(),
            log_level: LogLevel::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

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
        "profile-editor.json"
    }

    /// Load the stored configuration, falling back to defaults.
    pub fn load_or_default() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let loaded = Self::load_from_default_path();
        #[cfg(target_arch = "wasm32")]
        let loaded = Self::load_from_local_storage();

        loaded.unwrap_or_else(|| {
            log::debug!("Using default configuration");
            Self::default()
        })
    }

    /// Get the default config file path.
    /// Returns None on WASM (no filesystem access).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        crate::native::config_dir().map(|dir| dir.join(Self::default_filename()))
    }

    /// Parse stored JSON, logging and discarding anything unusable.
    fn parse_stored(json: &str, source: &str) -> Option<Self> {
        match Self::from_json(json) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", source);
                Some(config)
            }
            Err(e) => {
                log::warn!("Ignoring configuration from {}: {}", source, e);
                None
            }
        }
    }

    /// Configuration file in the user's config directory, if there is a
    /// readable one.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match std::fs::read_to_string(&path) {
            Ok(json) => Self::parse_stored(&json, &path.display().to_string()),
            Err(e) => {
                log::warn!("Failed to read config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// `localStorage` key holding the browser configuration.
    #[cfg(target_arch = "wasm32")]
    const LOCALSTORAGE_KEY: &'static str = "profile-editor-config";

    /// Configuration stored in `localStorage`, if any.
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_local_storage() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;

        match storage.get_item(Self::LOCALSTORAGE_KEY) {
            Ok(Some(json)) => Self::parse_stored(&json, "localStorage"),
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

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a stored configuration was rejected.
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
}
