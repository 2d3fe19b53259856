//! Domain-specific error types using `thiserror`.
//!
//! This module defines the main error enums for the different domains
//! within the client: backend API calls, playback, and UI operations.

use std::result::Result as StdResult;

use {anyhow::Error, reqwest::Error as ReqwestError, serde_json::Error as SerdeJsonError, thiserror::Error};

/// Backend API errors.
///
/// Every variant carries a plain message so that errors can be cloned into
/// banners and replayed by test backends.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Network or transport failure (connection refused, DNS, reset).
    #[error("Network error: {0}")]
    Transport(String),
    /// The server answered with a non-success status code.
    #[error("HTTP error! status: {code}")]
    Status { code: u16 },
    /// The response body was not the JSON shape we expected.
    #[error("Malformed response: {0}")]
    Decode(String),
    /// The server answered but reported an explicit failure.
    #[error("{message}")]
    Rejected { message: String },
}

impl From<ReqwestError> for ApiError {
    fn from(error: ReqwestError) -> Self {
        match error.status() {
            Some(status) => ApiError::Status {
                code: status.as_u16(),
            },
            None if error.is_decode() => ApiError::Decode(error.to_string()),
            None => ApiError::Transport(error.to_string()),
        }
    }
}

impl From<SerdeJsonError> for ApiError {
    fn from(error: SerdeJsonError) -> Self {
        ApiError::Decode(error.to_string())
    }
}

/// Playback errors raised by a media element.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// The media element failed to load or decode the source.
    #[error("{reason}")]
    Media { reason: String },
    /// No source has been assigned yet.
    #[error("No track loaded")]
    NoSource,
}

/// UI-related errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// An event referenced an action name the renderer never emits.
    #[error("Unknown action: {0}")]
    UnknownAction(String),
    /// A tab name that does not exist.
    #[error("Unknown tab: {0}")]
    UnknownTab(String),
}

/// Operational error context propagation with `anyhow`.
///
/// This type is used for operational errors that need rich context
/// but don't require specific handling logic.
pub type Result<T> = StdResult<T, Error>;
