//! Wire models for the media server REST API.
//!
//! These mirror the JSON the server emits. Optional fields default when
//! missing so that older servers still decode.

use serde::{Deserialize, Serialize};

/// A music track as listed by `GET /api/music`.
///
/// `filename` is the identity key and is unique within the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Track {
    /// File name on the server, also the streaming and deletion key.
    pub filename: String,
    /// Track title (the server falls back to the file stem).
    pub title: String,
    /// Artist name.
    #[serde(default)]
    pub artist: String,
    /// Duration in seconds.
    #[serde(default)]
    pub duration: Option<f64>,
    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub created: Option<String>,
    /// Last modification timestamp (ISO 8601).
    #[serde(default)]
    pub modified: Option<String>,
    /// Embedded lyrics. The server sends an empty string when there are none.
    #[serde(default)]
    pub lyrics: Option<String>,
}

impl Track {
    /// Lyrics text, treating an empty string as absent.
    #[must_use]
    pub fn lyrics_text(&self) -> Option<&str> {
        self.lyrics.as_deref().filter(|lyrics| !lyrics.is_empty())
    }
}

/// A picture as listed by `GET /api/pictures`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Picture {
    /// Full-size image URL.
    pub url: String,
    /// Thumbnail URL used by the grid.
    pub thumbnail_url: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Optional caption (IPTC/EXIF description).
    #[serde(default)]
    pub caption: Option<String>,
    /// Capture date in one of several formats (IPTC, EXIF, ISO).
    #[serde(default)]
    pub date_taken: Option<String>,
    /// Width in pixels.
    #[serde(default)]
    pub width: u32,
    /// Height in pixels.
    #[serde(default)]
    pub height: u32,
}

/// A document as listed by `GET /api/documents`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Document {
    /// Download URL.
    pub url: String,
    /// File name.
    pub filename: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Last modification timestamp (ISO 8601).
    #[serde(default)]
    pub modified: Option<String>,
}

/// Body of `DELETE /api/delete/{filename}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// `"success"` when the file was removed.
    pub status: String,
    /// Failure detail.
    #[serde(default)]
    pub message: Option<String>,
}

impl DeleteResponse {
    /// Whether the server reported a successful deletion.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HealthStatus {
    /// `"healthy"` when the server is up.
    pub status: String,
    /// Number of music files the server has indexed.
    pub files_count: usize,
    /// Music folder on the server.
    pub music_folder: String,
}

/// Body of `GET /api/config`, used for server discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Advertised service name.
    pub service_name: String,
    /// Music folder on the server.
    pub music_folder: String,
}

/// A WiFi network as reported by the server's scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Network {
    /// Network name. Hidden networks carry a placeholder.
    pub ssid: String,
    /// Security label such as `"WPA2"`.
    #[serde(default)]
    pub security: Option<String>,
    /// Encryption flag, `"on"` or `"off"`.
    #[serde(default)]
    pub encryption: Option<String>,
    /// Link quality as `"quality/max"`, e.g. `"55/70"`.
    #[serde(default)]
    pub signal: Option<String>,
    /// Whether the SSID is not broadcast.
    #[serde(default)]
    pub hidden: bool,
}

/// Body of `GET /api/wifi/networks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NetworksResponse {
    /// Scanned networks.
    #[serde(default)]
    pub networks: Vec<Network>,
    /// Failure detail on non-success responses.
    #[serde(default)]
    pub error: Option<String>,
}

/// Request body of `POST /api/wifi/configure`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WifiCredentials {
    /// Network to join.
    pub ssid: String,
    /// Passphrase, empty for open networks.
    pub password: String,
}

/// Body of `POST /api/wifi/configure`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConfigureResponse {
    /// Whether the configuration was applied.
    pub success: bool,
    /// Failure detail.
    pub error: Option<String>,
    /// The device is in hotspot mode and needs a reboot to join.
    pub reboot_required: bool,
}
