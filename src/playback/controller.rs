//! Playback state machine.
//!
//! `Stopped`, `Playing` and `Paused` over the shared media element. The
//! current track is remembered by filename as well as index so that a
//! re-fetch of the music collection can re-resolve its position.

use tracing::{debug, warn};

use crate::{api::Track, playback::media::MediaElement};

/// Current playback state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Nothing selected.
    #[default]
    Stopped,
    /// The track at `index` is playing.
    Playing {
        /// Position in the current music snapshot.
        index: usize,
        /// Identity of the track.
        filename: String,
    },
    /// The track at `index` is paused.
    Paused {
        /// Position in the current music snapshot.
        index: usize,
        /// Identity of the track.
        filename: String,
    },
}

/// Result of a `play_track` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Index out of range, nothing changed.
    Ignored,
    /// The current track was playing and is now paused.
    Paused,
    /// The current track was paused and resumed where it stopped.
    Resumed,
    /// A new track was loaded and started.
    Started(usize),
    /// Loading or starting failed. The track stays selected.
    Failed {
        /// Track that failed.
        index: usize,
        /// Reason reported by the media element.
        reason: String,
    },
}

/// Result of an end-of-track notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndOutcome {
    /// Moved on to the next track.
    Advanced(PlayOutcome),
    /// The last track finished, playback stopped.
    PlaylistEnded,
    /// Nothing was playing.
    Idle,
}

/// Playback state machine.
#[derive(Debug, Default)]
pub struct PlaybackController {
    state: PlaybackState,
}

impl PlaybackController {
    /// Creates a stopped controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Index of the current track, if any.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match &self.state {
            PlaybackState::Stopped => None,
            PlaybackState::Playing { index, .. } | PlaybackState::Paused { index, .. } => {
                Some(*index)
            }
        }
    }

    /// Filename of the current track, if any.
    #[must_use]
    pub fn current_filename(&self) -> Option<&str> {
        match &self.state {
            PlaybackState::Stopped => None,
            PlaybackState::Playing { filename, .. } | PlaybackState::Paused { filename, .. } => {
                Some(filename)
            }
        }
    }

    /// Plays, pauses or resumes the track at `index`.
    ///
    /// Calling it on the playing track pauses. Calling it again on the
    /// paused track resumes without reloading the source. Any other index
    /// loads that track. Out-of-range indices, including negative ones,
    /// are ignored.
    ///
    /// # Arguments
    ///
    /// * `tracks` - Current music snapshot.
    /// * `index` - Track to play.
    /// * `media` - The shared media element.
    /// * `source_for` - Builds the stream URL from a filename.
    pub fn play_track<M, F>(
        &mut self,
        tracks: &[Track],
        index: isize,
        media: &mut M,
        source_for: F,
    ) -> PlayOutcome
    where
        M: MediaElement + ?Sized,
        F: Fn(&str) -> String,
    {
        match usize::try_from(index) {
            Ok(index) => self.play_index(tracks, index, media, source_for),
            Err(_) => {
                debug!(index, "play_track ignored, negative index");
                PlayOutcome::Ignored
            }
        }
    }

    fn play_index<M, F>(
        &mut self,
        tracks: &[Track],
        index: usize,
        media: &mut M,
        source_for: F,
    ) -> PlayOutcome
    where
        M: MediaElement + ?Sized,
        F: Fn(&str) -> String,
    {
        let Some(track) = tracks.get(index) else {
            debug!(index, len = tracks.len(), "play_track ignored, index out of range");
            return PlayOutcome::Ignored;
        };

        if self.current_filename() == Some(track.filename.as_str()) {
            if !media.is_paused() {
                media.pause();
                self.state = PlaybackState::Paused {
                    index,
                    filename: track.filename.clone(),
                };
                return PlayOutcome::Paused;
            }

            if matches!(self.state, PlaybackState::Paused { .. }) {
                return match media.play() {
                    Ok(()) => {
                        self.state = PlaybackState::Playing {
                            index,
                            filename: track.filename.clone(),
                        };
                        PlayOutcome::Resumed
                    }
                    Err(e) => {
                        warn!(filename = %track.filename, error = %e, "Resume failed");
                        PlayOutcome::Failed {
                            index,
                            reason: e.to_string(),
                        }
                    }
                };
            }
        }

        self.state = PlaybackState::Playing {
            index,
            filename: track.filename.clone(),
        };
        media.set_source(&source_for(&track.filename));

        match media.play() {
            Ok(()) => PlayOutcome::Started(index),
            Err(e) => {
                warn!(filename = %track.filename, error = %e, "Error playing track");
                PlayOutcome::Failed {
                    index,
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Handles the natural end of the current track.
    ///
    /// Advances to the next index if there is one, otherwise stops.
    pub fn on_track_ended<M, F>(&mut self, tracks: &[Track], media: &mut M, source_for: F) -> EndOutcome
    where
        M: MediaElement + ?Sized,
        F: Fn(&str) -> String,
    {
        let Some(current) = self.current_index() else {
            return EndOutcome::Idle;
        };

        let next = current + 1;
        if next < tracks.len() {
            let outcome = self.play_index(tracks, next, media, source_for);
            EndOutcome::Advanced(outcome)
        } else {
            debug!("Playlist ended");
            self.state = PlaybackState::Stopped;
            EndOutcome::PlaylistEnded
        }
    }

    /// Mirrors a pause or play that the host performed directly on the
    /// media element (for example through its native controls).
    pub fn sync_paused(&mut self, paused: bool) {
        self.state = match std::mem::take(&mut self.state) {
            PlaybackState::Playing { index, filename } if paused => {
                PlaybackState::Paused { index, filename }
            }
            PlaybackState::Paused { index, filename } if !paused => {
                PlaybackState::Playing { index, filename }
            }
            other => other,
        };
    }

    /// Re-resolves the current index after the music collection changed.
    ///
    /// If the track vanished the last known index is kept, so end-of-track
    /// still advances from roughly the same place.
    pub fn reconcile(&mut self, tracks: &[Track]) {
        match &mut self.state {
            PlaybackState::Stopped => {}
            PlaybackState::Playing { index, filename } | PlaybackState::Paused { index, filename } => {
                match tracks.iter().position(|track| track.filename == *filename) {
                    Some(position) => *index = position,
                    None => debug!(filename = %filename, "Current track no longer listed"),
                }
            }
        }
    }
}
