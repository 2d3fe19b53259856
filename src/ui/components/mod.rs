//! Overlay and feedback components.
//!
//! Each component is a small state machine that the application drives.
//! They hold plain text for the host to display and never build markup
//! from user data.

pub mod banner;
pub mod delete_dialog;
pub mod image_viewer;
pub mod lyrics_overlay;

pub use {
    banner::ErrorBanner,
    delete_dialog::DeleteDialog,
    image_viewer::{ImageView, ImageViewer},
    lyrics_overlay::{LyricsContent, LyricsOverlay},
};
