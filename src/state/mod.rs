//! Centralized view state with change notifications.
//!
//! This module provides the single owned view-state object that the
//! renderer and the event handlers share.

pub mod app_state;

pub use app_state::{AppState, AppStateEvent, FontSize, PendingDelete, Tab, ViewState};
