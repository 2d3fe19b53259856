//! Cubie Client - media server companion
//!
//! Client-side state controller for a small self-hosted media server. It
//! fetches the music, pictures and documents collections over the server's
//! REST API, renders the active tab as markup fragments, drives a single
//! shared media element for sequential playback and manages the lyrics,
//! image and delete-confirmation overlays. A separate flow provisions the
//! device's WiFi through the same server.

pub mod api;
pub mod config;
pub mod error;
pub mod library;
pub mod playback;
pub mod state;
pub mod ui;
pub mod wifi;

#[cfg(test)]
mod testing;

// Re-export key types for convenience
pub use {
    api::{Backend, Document, HttpBackend, Picture, Track},
    config::{ClientSettings, SettingsManager},
    error::{ApiError, PlaybackError, UiError},
    library::{Feed, MediaCollections, Poller},
    playback::{HeadlessMediaElement, MediaElement, PlaybackController, PlaybackState},
    state::{AppState, AppStateEvent, Tab},
    ui::{Action, Fragment, Key, MediaApp},
    wifi::{ConnectOutcome, WifiError, WifiSetup},
};
