//! The media element seam.
//!
//! The host owns the actual audio output (an `<audio>` element, a native
//! player). The controller only needs to assign a source, start, pause and
//! ask whether playback is paused.

use tracing::{debug, info};

use crate::error::PlaybackError;

/// A single shared audio output.
///
/// Assigning a new source implicitly stops whatever was playing, which is
/// the only mutual exclusion the client relies on.
pub trait MediaElement: Send {
    /// Assigns a new source URL. Playback does not start until [`play`].
    ///
    /// [`play`]: MediaElement::play
    fn set_source(&mut self, url: &str);

    /// Starts or resumes playback of the current source.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError` if the source cannot be loaded or decoded.
    fn play(&mut self) -> Result<(), PlaybackError>;

    /// Pauses playback, keeping the position.
    fn pause(&mut self);

    /// Whether playback is currently paused (or never started).
    fn is_paused(&self) -> bool;
}

/// Media element for hosts without audio output.
///
/// It tracks source and paused state and logs transitions, which is what
/// the command-line client uses to exercise the controller.
#[derive(Debug, Clone)]
pub struct HeadlessMediaElement {
    source: Option<String>,
    paused: bool,
}

impl Default for HeadlessMediaElement {
    fn default() -> Self {
        Self {
            source: None,
            paused: true,
        }
    }
}

impl HeadlessMediaElement {
    /// Currently assigned source URL.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

impl MediaElement for HeadlessMediaElement {
    fn set_source(&mut self, url: &str) {
        debug!(url, "Media source assigned");
        self.source = Some(url.to_string());
        self.paused = true;
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        let Some(source) = &self.source else {
            return Err(PlaybackError::NoSource);
        };
        info!(source = %source, "Playing");
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        debug!("Media paused");
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}
