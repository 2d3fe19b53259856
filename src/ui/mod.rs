//! Client user interface: the application controller, per-tab renderers
//! and the overlays.
//!
//! Nothing here touches a real DOM. Renderers return markup fragments with
//! data attributes, and overlays expose plain text for the host to display.

#[cfg(test)]
mod app_tests;

pub mod application;
pub mod components;
pub mod dates;
pub mod fragment;
pub mod utils;
pub mod views;

pub use {
    application::{Key, MediaApp},
    components::{DeleteDialog, ErrorBanner, ImageView, ImageViewer, LyricsContent, LyricsOverlay},
    fragment::{Action, Fragment},
};
