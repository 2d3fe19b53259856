//! Client settings with XDG Base Directory compliance.
//!
//! This module provides settings management for the media server client,
//! stored as JSON under the XDG config directory.

use std::{
    env::var,
    fs::{create_dir_all, read_to_string, write},
    io::Error as StdError,
    path::PathBuf,
    time::Duration,
};

use {
    parking_lot::{RwLock, RwLockReadGuard},
    serde::{Deserialize, Serialize},
    serde_json::{Error as SerdeJsonError, from_str, to_string_pretty},
    thiserror::Error,
    tracing::debug,
};

/// Environment variable that overrides the configured server URL.
pub const SERVER_URL_ENV: &str = "CUBIE_SERVER_URL";

/// Error type for settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read or write settings file.
    #[error("IO error: {0}")]
    IoError(#[from] StdError),
    /// Failed to serialize or deserialize settings.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] SerdeJsonError),
    /// Invalid settings value.
    #[error("Invalid settings value: {reason}")]
    InvalidValue { reason: String },
}

/// Serializable client settings with default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Base URL of the media server, without a trailing slash.
    pub server_url: String,
    /// Whether the music feed is re-fetched on a timer.
    pub polling: bool,
    /// Interval between music polls in milliseconds.
    pub poll_interval_ms: u64,
    /// How long the transient error banner stays visible.
    pub error_banner_ms: u64,
    /// Optional per-request timeout. `None` keeps the transport default.
    pub request_timeout_ms: Option<u64>,
    /// Number of lyric characters shown in the track list preview.
    pub lyrics_preview_chars: usize,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:5000".to_string(),
            polling: true,
            poll_interval_ms: 3000,
            error_banner_ms: 5000,
            request_timeout_ms: None,
            lyrics_preview_chars: 100,
        }
    }
}

impl ClientSettings {
    /// Checks that the settings can drive a client.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidValue` for an empty server URL or a
    /// zero poll interval.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.server_url.trim().is_empty() {
            return Err(SettingsError::InvalidValue {
                reason: "server_url must not be empty".to_string(),
            });
        }
        if self.poll_interval_ms == 0 {
            return Err(SettingsError::InvalidValue {
                reason: "poll_interval_ms must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Poll interval as a `Duration`.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Error banner lifetime as a `Duration`.
    #[must_use]
    pub fn error_banner_duration(&self) -> Duration {
        Duration::from_millis(self.error_banner_ms)
    }

    /// Applies the `CUBIE_SERVER_URL` override if it is set and non-empty.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = var(SERVER_URL_ENV)
            && !url.trim().is_empty()
        {
            debug!("Overriding server URL from {SERVER_URL_ENV}: {url}");
            self.server_url = url;
        }
        self
    }
}

/// Handles loading, saving, and validation of client settings.
#[derive(Debug)]
pub struct SettingsManager {
    /// Thread-safe settings storage.
    settings: RwLock<ClientSettings>,
    /// Path to the configuration file on disk.
    config_path: PathBuf,
}

impl SettingsManager {
    /// Creates a new settings manager with the default config path.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if settings cannot be loaded from disk.
    pub fn new() -> Result<Self, SettingsError> {
        Self::with_config_path(get_config_path())
    }

    /// Creates a new settings manager with a custom config path.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Custom path for the settings file
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the file exists but cannot be read, parsed
    /// or validated.
    pub fn with_config_path(config_path: PathBuf) -> Result<Self, SettingsError> {
        if let Some(parent) = config_path.parent() {
            create_dir_all(parent)?;
        }

        let settings: ClientSettings = if config_path.exists() {
            debug!("Loading settings from existing file: {:?}", config_path);
            let contents = read_to_string(&config_path)?;
            from_str(&contents)?
        } else {
            debug!("Using default settings, no file at {:?}", config_path);
            ClientSettings::default()
        };
        settings.validate()?;

        Ok(SettingsManager {
            settings: RwLock::new(settings),
            config_path,
        })
    }

    /// Gets the current settings.
    pub fn get_settings(&self) -> RwLockReadGuard<'_, ClientSettings> {
        self.settings.read()
    }

    /// Gets the configuration file path.
    pub fn get_config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Validates, applies and saves new settings.
    ///
    /// # Arguments
    ///
    /// * `new_settings` - New settings to apply.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if validation fails or the file cannot be
    /// written. Invalid settings are never applied.
    pub fn update_settings(&self, new_settings: ClientSettings) -> Result<(), SettingsError> {
        new_settings.validate()?;
        *self.settings.write() = new_settings;
        self.save_settings()
    }

    fn save_settings(&self) -> Result<(), SettingsError> {
        debug!("Saving settings to file: {:?}", self.config_path);
        let contents = to_string_pretty(&*self.settings.read())?;
        write(&self.config_path, contents)?;
        Ok(())
    }
}

/// Returns the settings file path under the XDG config directory.
#[must_use]
pub fn get_config_path() -> PathBuf {
    let mut config_dir = get_xdg_config_home();
    config_dir.push("cubie-client");
    config_dir.push("settings.json");
    config_dir
}

/// Uses `XDG_CONFIG_HOME` if set, otherwise $HOME/.config
fn get_xdg_config_home() -> PathBuf {
    if let Ok(config_home) = var("XDG_CONFIG_HOME")
        && !config_home.is_empty()
    {
        return PathBuf::from(config_home);
    }

    if let Ok(home) = var("HOME") {
        let mut path = PathBuf::from(home);
        path.push(".config");
        return path;
    }

    PathBuf::from(".")
}
