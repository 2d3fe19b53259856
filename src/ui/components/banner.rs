//! Transient error banner.
//!
//! A message stays visible for a fixed time after it was raised. Raising a
//! new message restarts the timer. Visibility is computed against a caller
//! supplied instant, so hosts can poll it from their own clock.

use std::time::{Duration, Instant};

/// Error banner with automatic dismissal.
#[derive(Debug, Clone)]
pub struct ErrorBanner {
    /// Current message and the instant it expires.
    message: Option<(String, Instant)>,
    /// How long a message stays visible.
    ttl: Duration,
}

impl ErrorBanner {
    /// Creates a hidden banner.
    ///
    /// # Arguments
    ///
    /// * `ttl` - How long each message stays visible.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { message: None, ttl }
    }

    /// Shows `message` starting at `now`.
    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        self.message = Some((message.into(), now + self.ttl));
    }

    /// Message visible at `now`, if any.
    #[must_use]
    pub fn visible(&self, now: Instant) -> Option<&str> {
        self.message
            .as_ref()
            .filter(|(_, expires_at)| now < *expires_at)
            .map(|(message, _)| message.as_str())
    }

    /// Hides the banner immediately.
    pub fn dismiss(&mut self) {
        self.message = None;
    }
}
