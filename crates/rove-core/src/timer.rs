#![forbid(unsafe_code)]

//! Cancellable deadlines for the engine's two timers: the type-ahead idle
//! reset and press-and-hold activation.
//!
//! There is no background thread. The host calls into the engine with the
//! current instant (on each event and on a periodic tick) and a deadline
//! reports whether it has elapsed. Cancelling is clearing the deadline.
//!
//! # Invariants
//!
//! 1. A cancelled deadline never reports expiry.
//! 2. [`Deadline::take_expired`] reports a given arming at most once.
//! 3. Re-arming replaces the previous deadline.

use std::time::Duration;

use web_time::Instant;

/// A single-shot deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// An unarmed deadline.
    #[must_use]
    pub const fn new() -> Self {
        Self { at: None }
    }

    /// Arm (or re-arm) the deadline `after` from `now`.
    pub fn arm(&mut self, now: Instant, after: Duration) {
        self.at = Some(now + after);
    }

    /// Disarm the deadline.
    pub fn cancel(&mut self) {
        self.at = None;
    }

    /// Whether the deadline is armed.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.at.is_some()
    }

    /// Whether the deadline is armed and has elapsed at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.at.is_some_and(|at| now >= at)
    }

    /// Disarm and return `true` if the deadline had elapsed at `now`.
    ///
    /// An armed deadline that has not elapsed stays armed.
    pub fn take_expired(&mut self, now: Instant) -> bool {
        if self.is_expired(now) {
            self.at = None;
            true
        } else {
            false
        }
    }

    /// Time left before expiry, or `None` if unarmed.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.at.map(|at| at.saturating_duration_since(now))
    }
}
