//! Configuration file support for Agentation.
//!
//! This module provides serialization and deserialization of the overlay
//! settings: log level, placement metrics, path rendering, keybindings and the
//! host allow-list. Every section has defaults, so partial files load.

use agentation_ui::PlacementConfig;
use serde::{Deserialize, Serialize};

use crate::gate::HostGate;
use crate::keybindings::KeyBindings;
use crate::path::PathOptions;

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
    /// Get the display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

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

    /// Convert to log crate's Level (for loggers that take a maximum level).
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

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// File name of the native config file.
pub const CONFIG_FILENAME: &str = "agentation-config.json";

/// Default maximum length of a record's text snippet, in characters.
pub const DEFAULT_SNIPPET_MAX_CHARS: usize = 60;

/// Overlay configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentationConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// User preferences
    #[serde(default)]
    pub preferences: UserPreferences,

    /// Popup, tooltip and highlight metrics
    #[serde(default)]
    pub placement: PlacementConfig,

    /// Structural path rendering
    #[serde(default)]
    pub paths: PathOptions,

    /// Keybinding configuration
    #[serde(default)]
    pub keybindings: KeyBindings,

    /// Hosts the overlay may attach to
    #[serde(default)]
    pub host_gate: HostGate,
}

/// User preferences section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Maximum characters kept from a node's text content
    #[serde(default = "default_snippet_max_chars")]
    pub snippet_max_chars: usize,
}

fn default_snippet_max_chars() -> usize {
    DEFAULT_SNIPPET_MAX_CHARS
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            snippet_max_chars: default_snippet_max_chars(),
        }
    }
}

impl AgentationConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            preferences: UserPreferences::default(),
            placement: PlacementConfig::default(),
            paths: PathOptions::default(),
            keybindings: KeyBindings::default(),
            host_gate: HostGate::default(),
        }
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

    /// Config file location: `<config dir>/agentation/agentation-config.json`,
    /// or `~/.config/agentation/...` when the platform has no config dir.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        let base = dirs::config_dir().or_else(|| dirs::home_dir().map(|home| home.join(".config")))?;
        Some(base.join("agentation").join(CONFIG_FILENAME))
    }

    /// Read the config at `path`. A missing file is `Ok(None)`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Option<Self>, ConfigError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Self::from_json(&json).map(Some)
    }

    /// Write the config to `path`, creating parent directories.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load the config at [`AgentationConfig::default_path`], or seed that
    /// file with the defaults when none exists yet.
    ///
    /// Unreadable or invalid files fall back to defaults and are left alone.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_seed_default_path() -> Self {
        let Some(path) = Self::default_path() else {
            log::debug!("No config directory, using defaults");
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(Some(config)) => {
                log::info!("Loaded configuration from {:?}", path);
                config
            }
            Ok(None) => {
                let config = Self::default();
                match config.save_to(&path) {
                    Ok(()) => log::info!("Wrote default configuration to {:?}", path),
                    Err(e) => log::warn!("Could not write {:?}: {}", path, e),
                }
                config
            }
            Err(e) => {
                log::warn!("Ignoring config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// localStorage key the page owner writes the config JSON under.
    #[cfg(target_arch = "wasm32")]
    pub const STORAGE_KEY: &'static str = "agentation-config";

    /// Config stored under [`AgentationConfig::STORAGE_KEY`], if any parses.
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_local_storage() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        let json = match storage.get_item(Self::STORAGE_KEY) {
            Ok(json) => json?,
            Err(e) => {
                log::warn!("localStorage unavailable: {:?}", e);
                return None;
            }
        };
        Self::from_json(&json)
            .inspect(|_| log::info!("Loaded configuration from localStorage"))
            .inspect_err(|e| log::warn!("Ignoring stored configuration: {}", e))
            .ok()
    }
}

impl Default for AgentationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading or saving configuration.
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

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentation_ui::Key;

    #[test]
    fn test_default_roundtrip() {
        let config = AgentationConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(AgentationConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let json = r#"{
            "version": 1,
            "preferences": { "log_level": "debug" },
            "placement": { "popup_width": 300.0 }
        }"#;
        let config = AgentationConfig::from_json(json).unwrap();

        assert_eq!(config.preferences.log_level, LogLevel::Debug);
        assert_eq!(config.preferences.snippet_max_chars, 60);
        assert_eq!(config.placement.popup_width, 300.0);
        assert_eq!(config.placement.popup_height, 170.0);
        assert_eq!(config.paths.root_marker, "body");
        assert_eq!(config.keybindings.toggle, Key::Char('a'));
        assert!(config.host_gate.is_allowed("localhost"));
    }

    #[test]
    fn test_newer_version_rejected() {
        let json = r#"{ "version": 99 }"#;
        match AgentationConfig::from_json(json) {
            Err(ConfigError::VersionTooNew {
                file_version,
                supported_version,
            }) => {
                assert_eq!(file_version, 99);
                assert_eq!(supported_version, CONFIG_VERSION);
            }
            other => panic!("expected VersionTooNew, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        assert!(matches!(
            AgentationConfig::from_json("{ not json"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    #[cfg(not(target_arch = "wasm32"))]
    fn test_save_then_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILENAME);
        assert!(AgentationConfig::load_from(&path).unwrap().is_none());

        let mut config = AgentationConfig::default();
        config.preferences.log_level = LogLevel::Trace;
        config.placement.popup_width = 320.0;
        config.save_to(&path).unwrap();

        assert_eq!(AgentationConfig::load_from(&path).unwrap(), Some(config));
    }

    #[test]
    #[cfg(not(target_arch = "wasm32"))]
    fn test_load_from_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, r#"{ "version": 2 }"#).unwrap();
        assert!(matches!(
            AgentationConfig::load_from(&path),
            Err(ConfigError::VersionTooNew { .. })
        ));

        // A directory where the file should be is an I/O error, not "missing"
        assert!(matches!(
            AgentationConfig::load_from(dir.path()),
            Err(ConfigError::IoError(_))
        ));
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::default().name(), "Info");
    }
}
