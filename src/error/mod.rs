//! Error handling built on `thiserror` and `anyhow`.
//!
//! This module provides both domain-specific error types for precise error
//! handling and operational helpers for context propagation and reporting.

pub mod domain;
pub mod operational;

pub use {
    domain::{ApiError, PlaybackError, UiError},
    operational::{ErrorReporter, ResultExt},
};
