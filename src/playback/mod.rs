//! Single-flight playback over a host-provided media element.

pub mod controller;
pub mod media;

pub use {
    controller::{EndOutcome, PlayOutcome, PlaybackController, PlaybackState},
    media::{HeadlessMediaElement, MediaElement},
};
