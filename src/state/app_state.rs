//! Process-wide view state with change notifications.
//!
//! This module provides the `AppState` container that owns the single
//! `ViewState` instance and broadcasts change events to the host.

use std::{fmt, str::FromStr};

use {
    parking_lot::RwLock,
    tokio::sync::broadcast::{Receiver, Sender, channel},
};

use crate::error::UiError;

/// Top-level tab selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    /// Music list (default).
    #[default]
    Music,
    /// Pictures grid.
    Pictures,
    /// Documents list.
    Documents,
}

impl Tab {
    /// Name used in `data-tab` attributes.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Music => "music",
            Tab::Pictures => "pictures",
            Tab::Documents => "documents",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "music" => Ok(Tab::Music),
            "pictures" => Ok(Tab::Pictures),
            "documents" => Ok(Tab::Documents),
            other => Err(UiError::UnknownTab(other.to_string())),
        }
    }
}

/// Lyrics overlay font size.
///
/// Stepping saturates at both ends, there is no wraparound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum FontSize {
    /// Small text.
    Small,
    /// Medium text (default).
    #[default]
    Medium,
    /// Large text.
    Large,
}

impl FontSize {
    /// One step smaller, saturating at `Small`.
    #[must_use]
    pub fn smaller(self) -> Self {
        match self {
            FontSize::Large => FontSize::Medium,
            FontSize::Medium | FontSize::Small => FontSize::Small,
        }
    }

    /// One step larger, saturating at `Large`.
    #[must_use]
    pub fn larger(self) -> Self {
        match self {
            FontSize::Small => FontSize::Medium,
            FontSize::Medium | FontSize::Large => FontSize::Large,
        }
    }

    /// CSS class applied to the lyrics content.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            FontSize::Small => "font-small",
            FontSize::Medium => "font-medium",
            FontSize::Large => "font-large",
        }
    }
}

/// A deletion staged by the confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    /// Index in the snapshot that was rendered when staging.
    pub index: usize,
    /// Filename captured at staging time. The request is keyed on this.
    pub filename: String,
}

/// The single view-state instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Currently displayed tab.
    pub current_tab: Tab,
    /// Filename of the track in the playing or paused state.
    pub now_playing: Option<String>,
    /// Deletion awaiting confirmation.
    pub pending_delete: Option<PendingDelete>,
    /// Status line text ("Ready", "Playing", ...).
    pub status: String,
    /// Combined item count from the last `fetch_all`.
    pub file_count: Option<usize>,
    /// Whether the initial loading indicator is still shown.
    pub loading: bool,
}

/// View-state change events.
#[derive(Debug, Clone, PartialEq)]
pub enum AppStateEvent {
    /// The active tab changed.
    TabChanged(Tab),
    /// The active tab's fragment was re-rendered.
    FragmentRendered(Tab),
    /// The status line changed.
    StatusChanged(String),
    /// The now-playing track changed.
    NowPlayingChanged(Option<String>),
    /// The combined file count changed.
    FileCountChanged(usize),
    /// An error banner was raised.
    ErrorShown(String),
}

/// Owner of the view state with broadcast notifications.
#[derive(Debug)]
pub struct AppState {
    view: RwLock<ViewState>,
    state_tx: Sender<AppStateEvent>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates the view state, with the loading indicator shown.
    #[must_use]
    pub fn new() -> Self {
        let (state_tx, _) = channel(64);
        Self {
            view: RwLock::new(ViewState {
                loading: true,
                ..ViewState::default()
            }),
            state_tx,
        }
    }

    /// Subscribes to view-state changes.
    pub fn subscribe(&self) -> Receiver<AppStateEvent> {
        self.state_tx.subscribe()
    }

    /// Broadcasts an event. Having no subscribers is fine.
    pub fn notify(&self, event: AppStateEvent) {
        let _ = self.state_tx.send(event);
    }

    /// Returns a copy of the view state.
    #[must_use]
    pub fn snapshot(&self) -> ViewState {
        self.view.read().clone()
    }

    /// Currently displayed tab.
    #[must_use]
    pub fn current_tab(&self) -> Tab {
        self.view.read().current_tab
    }

    /// Filename of the now-playing track.
    #[must_use]
    pub fn now_playing(&self) -> Option<String> {
        self.view.read().now_playing.clone()
    }

    /// Switches tab.
    ///
    /// # Returns
    ///
    /// `false` if `tab` was already active.
    pub fn set_tab(&self, tab: Tab) -> bool {
        {
            let mut view = self.view.write();
            if view.current_tab == tab {
                return false;
            }
            view.current_tab = tab;
        }
        self.notify(AppStateEvent::TabChanged(tab));
        true
    }

    /// Updates the status line.
    pub fn set_status(&self, status: impl Into<String>) {
        let status = status.into();
        self.view.write().status = status.clone();
        self.notify(AppStateEvent::StatusChanged(status));
    }

    /// Updates the now-playing track.
    pub fn set_now_playing(&self, filename: Option<String>) {
        {
            let mut view = self.view.write();
            if view.now_playing == filename {
                return;
            }
            view.now_playing = filename.clone();
        }
        self.notify(AppStateEvent::NowPlayingChanged(filename));
    }

    /// Updates the combined file count.
    pub fn set_file_count(&self, count: usize) {
        self.view.write().file_count = Some(count);
        self.notify(AppStateEvent::FileCountChanged(count));
    }

    /// Stages or clears a pending deletion.
    pub fn set_pending_delete(&self, pending: Option<PendingDelete>) {
        self.view.write().pending_delete = pending;
    }

    /// Filename of the staged deletion, if any.
    #[must_use]
    pub fn pending_delete_filename(&self) -> Option<String> {
        self.view
            .read()
            .pending_delete
            .as_ref()
            .map(|pending| pending.filename.clone())
    }

    /// Takes the pending deletion, leaving none staged.
    pub fn take_pending_delete(&self) -> Option<PendingDelete> {
        self.view.write().pending_delete.take()
    }

    /// Hides the loading indicator after the first render.
    pub fn finish_loading(&self) {
        self.view.write().loading = false;
    }
}
