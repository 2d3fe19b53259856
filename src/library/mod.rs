//! Client-side media library: fetched collections and background polling.

pub mod collections;
pub mod poller;

pub use {
    collections::{Feed, MediaCollections},
    poller::Poller,
};
