//! Keystroke records and the append-only session timeline.
//!
//! The timeline is the single source of truth for everything measured about
//! a session: the live rolling WPM shown while typing, the final net WPM,
//! accuracy, and the per-bucket WPM history behind the results graph. It
//! records every press, including incorrect ones; backspaces mutate engine
//! state but are never appended.

use crate::Seconds;
use crate::math::{self, AVERAGE_WORD_LENGTH};

/// The window used for the live rolling WPM readout.
pub const ROLLING_WINDOW_SEC: Seconds = 5.0;

/// The bucket width used for the WPM-over-time history.
pub const BUCKET_SEC: Seconds = 5.0;

/// A single key press, immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keystroke {
    /// The character the user actually typed.
    pub typed: char,
    /// The character the target expected at this position.
    pub expected: char,
    /// Clock reading at the moment of the press.
    pub timestamp: Seconds,
    /// Whether the press advanced the cursor.
    pub is_correct: bool,
    /// Cursor index at the moment of the press, not after it.
    pub position: usize,
}

/// Ordered log of every press in a session.
///
/// Timestamps are non-decreasing because entries are appended in press
/// order with a monotonic clock.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    start_time: Seconds,
    keystrokes: Vec<Keystroke>,
}

impl Timeline {
    /// Stamp the session start. Called by the engine on the first press.
    pub fn start(&mut self, now: Seconds) {
        self.start_time = now;
    }

    /// Clock reading of the first press.
    pub fn start_time(&self) -> Seconds {
        self.start_time
    }

    /// Append one press. O(1), no deduplication.
    pub fn record(
        &mut self,
        typed: char,
        expected: char,
        position: usize,
        is_correct: bool,
        now: Seconds,
    ) {
        self.keystrokes.push(Keystroke {
            typed,
            expected,
            timestamp: now,
            is_correct,
            position,
        });
    }

    /// All recorded presses, in press order.
    pub fn keystrokes(&self) -> &[Keystroke] {
        &self.keystrokes
    }

    pub fn is_empty(&self) -> bool {
        self.keystrokes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keystrokes.len()
    }

    /// Number of presses that advanced the cursor.
    pub fn correct_count(&self) -> usize {
        self.keystrokes.iter().filter(|k| k.is_correct).count()
    }

    /// Seconds since the session started.
    pub fn elapsed(&self, now: Seconds) -> Seconds {
        (now - self.start_time).max(0.0)
    }

    /// Net WPM over the last [`ROLLING_WINDOW_SEC`] seconds.
    ///
    /// The effective window is capped at the elapsed session time so the
    /// readout is not diluted at the start; under half a second of typing
    /// it reports `0.0` instead of a wild extrapolation.
    pub fn rolling_wpm(&self, now: Seconds, window_sec: Seconds) -> f64 {
        let effective_window = self.elapsed(now).min(window_sec);
        if effective_window < 0.5 {
            return 0.0;
        }
        let cutoff = now - window_sec;
        let correct_in_window = self
            .keystrokes
            .iter()
            .filter(|k| k.is_correct && k.timestamp >= cutoff)
            .count();
        math::net_wpm(correct_in_window, effective_window / 60.0)
    }

    /// Net WPM over the whole session. `0.0` under one second of typing.
    pub fn final_wpm(&self, elapsed: Seconds) -> f64 {
        if elapsed < 1.0 {
            return 0.0;
        }
        math::net_wpm(self.correct_count(), elapsed / 60.0)
    }

    /// Percentage of correct presses. `100.0` for an empty timeline.
    pub fn accuracy(&self) -> f64 {
        if self.keystrokes.is_empty() {
            return 100.0;
        }
        self.correct_count() as f64 / self.keystrokes.len() as f64 * 100.0
    }

    /// WPM per time bucket from session start to `elapsed`, for the graph.
    ///
    /// The span `[start, start + elapsed)` is partitioned into
    /// `max(1, floor(elapsed / bucket_sec))` equal-width buckets. The final
    /// bucket is closed on the right so every correct press lands in
    /// exactly one bucket and the counts sum to [`Self::correct_count`].
    pub fn wpm_buckets(&self, elapsed: Seconds, bucket_sec: Seconds) -> Vec<f64> {
        if self.keystrokes.is_empty() || elapsed <= 0.0 {
            return Vec::new();
        }

        let n_buckets = ((elapsed / bucket_sec) as usize).max(1);
        let width = elapsed / n_buckets as f64;

        (0..n_buckets)
            .map(|b| {
                let lo = self.start_time + b as f64 * width;
                let hi = lo + width;
                let last = b == n_buckets - 1;
                let chars = self
                    .keystrokes
                    .iter()
                    .filter(|k| {
                        k.is_correct
                            && k.timestamp >= lo
                            && (k.timestamp < hi || (last && k.timestamp <= hi))
                    })
                    .count();
                let wpm = (chars as f64 / AVERAGE_WORD_LENGTH as f64) / (bucket_sec / 60.0);
                math::round1(wpm)
            })
            .collect()
    }
}
