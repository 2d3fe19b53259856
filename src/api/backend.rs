//! Backend abstraction and its `reqwest` implementation.
//!
//! The `Backend` trait is the only seam between the client and the media
//! server. `HttpBackend` talks to a real server; tests script their own.

use std::time::Duration;

use {
    async_trait::async_trait,
    reqwest::{Client, Response},
    serde::de::DeserializeOwned,
    serde_json::from_slice,
    tracing::debug,
    urlencoding::encode,
};

use crate::{
    api::models::{
        ConfigureResponse, DeleteResponse, Document, HealthStatus, NetworksResponse, Picture,
        ServerConfig, Track, WifiCredentials,
    },
    config::ClientSettings,
    error::ApiError,
};

/// Relative streaming path for a track, with the filename percent-encoded.
#[must_use]
pub fn stream_path(filename: &str) -> String {
    format!("/music/{}", encode(filename))
}

/// Operations the client needs from the media server.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /api/music`.
    async fn music(&self) -> Result<Vec<Track>, ApiError>;

    /// `GET /api/pictures`.
    async fn pictures(&self) -> Result<Vec<Picture>, ApiError>;

    /// `GET /api/documents`.
    async fn documents(&self) -> Result<Vec<Document>, ApiError>;

    /// `DELETE /api/delete/{filename}`.
    ///
    /// Non-success statuses are errors. A 2xx body is returned as-is so the
    /// caller can inspect `status`.
    async fn delete_track(&self, filename: &str) -> Result<DeleteResponse, ApiError>;

    /// `POST /api/refresh`, asking the server to rescan its folders.
    async fn refresh(&self) -> Result<(), ApiError>;

    /// `GET /api/health`.
    async fn health(&self) -> Result<HealthStatus, ApiError>;

    /// `GET /api/config`.
    async fn server_config(&self) -> Result<ServerConfig, ApiError>;

    /// `GET /api/wifi/networks`.
    async fn wifi_networks(&self) -> Result<NetworksResponse, ApiError>;

    /// `POST /api/wifi/configure`.
    async fn configure_wifi(
        &self,
        credentials: &WifiCredentials,
    ) -> Result<ConfigureResponse, ApiError>;

    /// `POST /api/wifi/reboot`.
    async fn reboot(&self) -> Result<(), ApiError>;

    /// `POST /api/wifi/restart`.
    async fn restart(&self) -> Result<(), ApiError>;

    /// Source URL handed to the media element for a track.
    fn stream_url(&self, filename: &str) -> String {
        stream_path(filename)
    }
}

/// `reqwest`-backed implementation of [`Backend`].
#[derive(Debug, Clone)]
pub struct HttpBackend {
    /// Shared HTTP client for pooled requests.
    client: Client,
    /// Server base URL without a trailing slash.
    base_url: String,
}

impl HttpBackend {
    /// Creates a backend for the server named in the settings.
    ///
    /// # Arguments
    ///
    /// * `settings` - Client settings providing the server URL and timeout.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the HTTP client cannot be built.
    pub fn new(settings: &ClientSettings) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout_ms) = settings.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: settings.server_url.trim_end_matches('/').to_string(),
        })
    }

    /// Server base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!(path, "GET");
        let response = self.client.get(self.url(path)).send().await?;
        decode(response.error_for_status()?).await
    }

    async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        debug!(path, "POST");
        self.client
            .post(self.url(path))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Reads the whole body and decodes it as JSON.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await?;
    Ok(from_slice(&bytes)?)
}

/// Decodes a body that carries its own `error` field on failure statuses.
///
/// A failure status with an undecodable body is reported as the status.
async fn decode_with_error_body<T: DeserializeOwned>(
    response: Response,
) -> Result<(bool, T), ApiError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    match from_slice(&bytes) {
        Ok(body) => Ok((status.is_success(), body)),
        Err(_) if !status.is_success() => Err(ApiError::Status {
            code: status.as_u16(),
        }),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn music(&self) -> Result<Vec<Track>, ApiError> {
        self.get_json("/api/music").await
    }

    async fn pictures(&self) -> Result<Vec<Picture>, ApiError> {
        self.get_json("/api/pictures").await
    }

    async fn documents(&self) -> Result<Vec<Document>, ApiError> {
        self.get_json("/api/documents").await
    }

    async fn delete_track(&self, filename: &str) -> Result<DeleteResponse, ApiError> {
        let path = format!("/api/delete/{}", encode(filename));
        debug!(path = %path, "DELETE");
        let response = self.client.delete(self.url(&path)).send().await?;
        decode(response.error_for_status()?).await
    }

    async fn refresh(&self) -> Result<(), ApiError> {
        self.post_empty("/api/refresh").await
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get_json("/api/health").await
    }

    async fn server_config(&self) -> Result<ServerConfig, ApiError> {
        self.get_json("/api/config").await
    }

    async fn wifi_networks(&self) -> Result<NetworksResponse, ApiError> {
        debug!(path = "/api/wifi/networks", "GET");
        let response = self.client.get(self.url("/api/wifi/networks")).send().await?;
        let (ok, body): (bool, NetworksResponse) = decode_with_error_body(response).await?;
        if !ok {
            return Err(ApiError::Rejected {
                message: body
                    .error
                    .unwrap_or_else(|| "Failed to load networks".to_string()),
            });
        }
        Ok(body)
    }

    async fn configure_wifi(
        &self,
        credentials: &WifiCredentials,
    ) -> Result<ConfigureResponse, ApiError> {
        debug!(path = "/api/wifi/configure", ssid = %credentials.ssid, "POST");
        let response = self
            .client
            .post(self.url("/api/wifi/configure"))
            .json(credentials)
            .send()
            .await?;
        let (ok, body): (bool, ConfigureResponse) = decode_with_error_body(response).await?;
        if !ok {
            return Err(ApiError::Rejected {
                message: body
                    .error
                    .unwrap_or_else(|| "Failed to configure WiFi".to_string()),
            });
        }
        Ok(body)
    }

    async fn reboot(&self) -> Result<(), ApiError> {
        self.post_empty("/api/wifi/reboot").await
    }

    async fn restart(&self) -> Result<(), ApiError> {
        self.post_empty("/api/wifi/restart").await
    }

    fn stream_url(&self, filename: &str) -> String {
        self.url(&stream_path(filename))
    }
}
