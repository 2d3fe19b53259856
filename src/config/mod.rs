//! Client configuration and persistent settings.
//!
//! This module provides settings management with XDG Base Directory
//! compliance and environment overrides.

pub mod settings;

pub use settings::{ClientSettings, SettingsError, SettingsManager, get_config_path};
