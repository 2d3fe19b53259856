//! In-memory media collections with per-feed fetch epochs.
//!
//! Each feed is replaced wholesale by the newest successful response. Every
//! request takes an epoch before it is sent, and a response only lands if
//! its epoch is newer than the last one applied for that feed, so a slow
//! older request can never overwrite a newer result.

use tracing::debug;

use crate::{
    api::{Document, Picture, Track},
    state::Tab,
};

/// One of the three collections served by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feed {
    /// `/api/music`.
    Music,
    /// `/api/pictures`.
    Pictures,
    /// `/api/documents`.
    Documents,
}

impl Feed {
    /// Tab that displays this feed.
    #[must_use]
    pub fn tab(self) -> Tab {
        match self {
            Feed::Music => Tab::Music,
            Feed::Pictures => Tab::Pictures,
            Feed::Documents => Tab::Documents,
        }
    }

    fn slot(self) -> usize {
        match self {
            Feed::Music => 0,
            Feed::Pictures => 1,
            Feed::Documents => 2,
        }
    }
}

/// Request bookkeeping for one feed.
#[derive(Debug, Clone, Copy, Default)]
struct FeedEpoch {
    /// Last epoch handed out to a request.
    issued: u64,
    /// Epoch of the response currently held.
    applied: u64,
}

/// Snapshot of the three collections plus their fetch epochs.
#[derive(Debug, Clone, Default)]
pub struct MediaCollections {
    /// Music tracks, ordered as the server sent them.
    pub music: Vec<Track>,
    /// Pictures, ordered as the server sent them.
    pub pictures: Vec<Picture>,
    /// Documents, ordered as the server sent them.
    pub documents: Vec<Document>,
    epochs: [FeedEpoch; 3],
}

impl MediaCollections {
    /// Reserves the epoch for a request that is about to be sent.
    pub fn begin_fetch(&mut self, feed: Feed) -> u64 {
        let epoch = &mut self.epochs[feed.slot()];
        epoch.issued += 1;
        epoch.issued
    }

    /// Replaces the music collection if `epoch` is current.
    ///
    /// # Returns
    ///
    /// `true` if the response was applied, `false` if it was stale.
    pub fn apply_music(&mut self, epoch: u64, tracks: Vec<Track>) -> bool {
        if !self.accept(Feed::Music, epoch) {
            return false;
        }
        self.music = tracks;
        true
    }

    /// Replaces the picture collection if `epoch` is current.
    pub fn apply_pictures(&mut self, epoch: u64, pictures: Vec<Picture>) -> bool {
        if !self.accept(Feed::Pictures, epoch) {
            return false;
        }
        self.pictures = pictures;
        true
    }

    /// Replaces the document collection if `epoch` is current.
    pub fn apply_documents(&mut self, epoch: u64, documents: Vec<Document>) -> bool {
        if !self.accept(Feed::Documents, epoch) {
            return false;
        }
        self.documents = documents;
        true
    }

    fn accept(&mut self, feed: Feed, epoch: u64) -> bool {
        let slot = &mut self.epochs[feed.slot()];
        if epoch <= slot.applied {
            debug!(
                ?feed,
                epoch,
                applied = slot.applied,
                "Dropping stale response"
            );
            return false;
        }
        slot.applied = epoch;
        true
    }

    /// Combined number of items across all feeds.
    #[must_use]
    pub fn total_files(&self) -> usize {
        self.music.len() + self.pictures.len() + self.documents.len()
    }

    /// Position of a track in the current snapshot.
    #[must_use]
    pub fn track_index(&self, filename: &str) -> Option<usize> {
        self.music.iter().position(|track| track.filename == filename)
    }
}
