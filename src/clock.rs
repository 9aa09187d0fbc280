//! Time sources.
//!
//! The scheduler never reads time itself; callers pass `now` explicitly.
//! The TUI reads a monotonic wall clock, previews and tests a manual one.

use std::cell::Cell;
use std::time::Instant;

use crate::types::Millis;

/// Something that can tell the current time in milliseconds.
pub trait Clock {
    fn now(&self) -> Millis;
}

/// Milliseconds elapsed since construction, from `Instant`.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn start() -> Self {
        MonotonicClock {
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Virtual clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        ManualClock {
            now: Cell::new(start),
        }
    }

    /// Move forward by `by` ms and return the new time.
    pub fn advance(&self, by: Millis) -> Millis {
        let next = self.now.get().saturating_add(by);
        self.now.set(next);
        next
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new(10);
        assert_eq!(clock.advance(5), 15);
        assert_eq!(clock.now(), 15);
    }

    #[test]
    fn manual_clock_stands_still_until_told() {
        let clock = ManualClock::new(100);
        assert_eq!(clock.now(), 100);
        assert_eq!(clock.advance(0), 100);
        assert_eq!(clock.advance(40), 140);
    }

    #[test]
    fn monotonic_clock_starts_near_zero() {
        let clock = MonotonicClock::start();
        assert!(clock.now() < 1_000);
    }
}
