//! Nullable clock, deterministic time for testing.

use plasma_types::Timestamp;
use std::cell::Cell;

/// A clock whose time only advances when you tell it to.
pub struct NullClock {
    current: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: Cell::new(initial_secs),
        }
    }

    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.current.get())
    }

    /// Advance by `secs` and return the new time.
    pub fn advance(&self, secs: u64) -> Timestamp {
        self.current.set(self.current.get().saturating_add(secs));
        self.now()
    }

    pub fn set(&self, at: Timestamp) {
        self.current.set(at.as_secs());
    }
}

impl Default for NullClock {
    fn default() -> Self {
        Self::new(1_000_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_on_request_only() {
        let clock = NullClock::new(100);
        assert_eq!(clock.now(), Timestamp::new(100));
        assert_eq!(clock.now(), Timestamp::new(100));
        assert_eq!(clock.advance(7), Timestamp::new(107));
        clock.set(Timestamp::new(5));
        assert_eq!(clock.now().as_secs(), 5);
    }

    #[test]
    fn advance_saturates() {
        let clock = NullClock::new(u64::MAX - 1);
        assert_eq!(clock.advance(10).as_secs(), u64::MAX);
    }
}
