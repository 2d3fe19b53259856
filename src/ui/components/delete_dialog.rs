//! Delete confirmation dialog.
//!
//! Opening the dialog only stages the deletion. The request is sent by the
//! application when the user confirms.

use crate::api::Track;

/// Confirmation dialog state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteDialog {
    text: Option<String>,
}

impl DeleteDialog {
    /// Opens the dialog for `track`.
    pub fn open(&mut self, track: &Track) {
        self.text = Some(confirmation_text(track));
    }

    /// Closes the dialog.
    pub fn close(&mut self) {
        self.text = None;
    }

    /// Whether the dialog is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.text.is_some()
    }

    /// Dialog text, when open. Hosts insert it as plain text.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// Question shown before deleting `track`.
#[must_use]
pub fn confirmation_text(track: &Track) -> String {
    format!(
        "Are you sure you want to delete \"{}\" by {}?",
        track.title, track.artist
    )
}
