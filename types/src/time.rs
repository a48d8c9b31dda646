//! Timestamp type used by the exit game.
//!
//! Timestamps are Unix epoch seconds (UTC) as reported by the root chain.
//! The exit game never reads the clock itself; callers pass the time in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const EPOCH: Self = Self(0);

    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Current wall-clock time, clamped to the epoch if the system clock is earlier.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Seconds elapsed since this timestamp (relative to `now`).
    pub fn elapsed_since(&self, now: Timestamp) -> u64 {
        now.0.saturating_sub(self.0)
    }

    /// Whether `now` is strictly past `self + duration_secs`.
    pub fn has_expired(&self, duration_secs: u64, now: Timestamp) -> bool {
        now.0 > self.0.saturating_add(duration_secs)
    }

    /// Seconds to wait before [`Timestamp::has_expired`] holds, zero once it does.
    pub fn remaining(&self, duration_secs: u64, now: Timestamp) -> u64 {
        if self.has_expired(duration_secs, now) {
            return 0;
        }
        self.0
            .saturating_add(duration_secs)
            .saturating_sub(now.0)
            .saturating_add(1)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
