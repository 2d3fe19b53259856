//! Fullscreen lyrics overlay.

use crate::{api::Track, state::FontSize};

/// Shown in place of missing lyrics.
pub const NO_LYRICS: &str = "No lyrics available";

/// Text shown by the overlay. Hosts insert these as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricsContent {
    /// Track title.
    pub title: String,
    /// Track artist.
    pub artist: String,
    /// Lyrics, or the placeholder.
    pub lyrics: String,
}

/// Lyrics overlay, closed or open on one track.
#[derive(Debug, Clone, Default)]
pub struct LyricsOverlay {
    open: Option<(usize, LyricsContent)>,
    font_size: FontSize,
}

impl LyricsOverlay {
    /// Opens the overlay on the track at `index`.
    ///
    /// The font size resets to medium each time the overlay opens.
    ///
    /// # Returns
    ///
    /// `false` (and no change) if `index` is out of range.
    pub fn show(&mut self, tracks: &[Track], index: usize) -> bool {
        let Some(track) = tracks.get(index) else {
            return false;
        };

        self.open = Some((
            index,
            LyricsContent {
                title: track.title.clone(),
                artist: track.artist.clone(),
                lyrics: track.lyrics_text().unwrap_or(NO_LYRICS).to_string(),
            },
        ));
        self.font_size = FontSize::Medium;
        true
    }

    /// Closes the overlay, whatever opened it.
    pub fn hide(&mut self) {
        self.open = None;
    }

    /// Whether the overlay is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Track index the overlay was opened on.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.open.as_ref().map(|(index, _)| *index)
    }

    /// Displayed text, when open.
    #[must_use]
    pub fn content(&self) -> Option<&LyricsContent> {
        self.open.as_ref().map(|(_, content)| content)
    }

    /// Current font size.
    #[must_use]
    pub fn font_size(&self) -> FontSize {
        self.font_size
    }

    /// Steps the font size down, saturating at small.
    pub fn smaller(&mut self) -> FontSize {
        self.font_size = self.font_size.smaller();
        self.font_size
    }

    /// Steps the font size up, saturating at large.
    pub fn larger(&mut self) -> FontSize {
        self.font_size = self.font_size.larger();
        self.font_size
    }
}
