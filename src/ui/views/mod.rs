//! Per-tab renderers.
//!
//! Each view is a pure function from a collection snapshot to a
//! [`Fragment`](crate::ui::fragment::Fragment). Only the active tab is
//! rendered, and its fragment replaces the previous one wholesale.


pub mod documents_list;
pub mod music_list;
pub mod pictures_grid;

pub use music_list::{MusicListOptions, NowPlaying};
