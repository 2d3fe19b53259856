//! Operational error context propagation with `anyhow`.
//!
//! This module provides extension traits and utilities for enhancing
//! error context and centralized error reporting.

use std::{error::Error as StdError, fmt::Display};

use {
    anyhow::{Context, Result as AnyhowResult},
    tracing::{debug, warn},
};

/// Extension trait for enhanced error context.
///
/// This trait provides methods to add contextual information to errors,
/// making debugging and user feedback more informative.
pub trait ResultExt<T, E> {
    /// Adds context to an error with a static string.
    fn add_context(self, context: &'static str) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static;

    /// Adds context to an error with a formatted string.
    fn add_contextf(self, format: impl Display) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn add_context(self, context: &'static str) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static,
    {
        self.context(context)
    }

    fn add_contextf(self, format: impl Display) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static,
    {
        self.context(format.to_string())
    }
}

/// Centralized error reporting and logging.
///
/// The `ErrorReporter` gives every call site the same shape of log line,
/// and turns an error into the text shown in the transient banner.
pub struct ErrorReporter;

impl ErrorReporter {
    /// Reports a debug-level error (background work such as polling).
    pub fn debug(error: &dyn Display, context: &str) {
        debug!(context = context, error = %error, "Background operation failed");
    }

    /// Reports a warning-level error (recoverable issues).
    pub fn warn(error: &dyn Display, context: &str) {
        warn!(context = context, error = %error, "Recoverable error");
    }

    /// Formats the banner text for a failed user action.
    ///
    /// # Arguments
    ///
    /// * `action` - Short description of what failed, e.g. "delete track".
    /// * `error` - The underlying error.
    ///
    /// # Returns
    ///
    /// A message of the form `Failed to {action}: {error}`.
    pub fn to_user_message(action: &str, error: &dyn Display) -> String {
        format!("Failed to {action}: {error}")
    }
}
