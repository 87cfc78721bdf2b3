//! Monotonic time sources.
//!
//! Every timestamp in the crate is a plain `f64` of seconds since an
//! arbitrary fixed origin, which keeps the timeline and analyzer free of
//! `Instant` arithmetic and makes them fully testable: hand the engine a
//! [`ManualClock`] and advance it by hand.

use std::cell::Cell;

use web_time::Instant;

use crate::Seconds;

/// A monotonic time source measured in seconds.
pub trait Clock {
    /// Seconds elapsed since the clock's fixed origin.
    fn now(&self) -> Seconds;
}

/// The real monotonic clock. Its origin is the moment of construction.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Seconds {
        self.origin.elapsed().as_secs_f64()
    }
}

/// A manually advanced clock for tests and deterministic replays.
///
/// Interior mutability lets a test keep driving the clock after handing it
/// to an engine:
///
/// ```rust
/// use cadence::{Clock, ManualClock, TypingEngine};
///
/// let mut engine = TypingEngine::with_clock("ab", ManualClock::default());
/// engine.handle_char('a');
/// engine.clock().advance(0.25);
/// engine.handle_char('b');
///
/// assert_eq!(engine.clock().now(), 0.25);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Cell<Seconds>,
}

impl ManualClock {
    /// Set the absolute time.
    pub fn set(&self, now: Seconds) {
        self.now.set(now);
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Seconds) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Seconds {
        self.now.get()
    }
}
