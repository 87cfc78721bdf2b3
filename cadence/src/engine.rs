//! The strict-mode session state machine.
//!
//! The cursor only advances when the correct character is typed. A wrong
//! key is recorded on the timeline and raises an error flag, but it never
//! blocks a following correct key at the same slot. Backspace moves the
//! cursor back one position and is not recorded.
//!
//! Strict advance-on-correct keeps the mapping from timeline index to
//! target index faithful for correct presses, which is what the digraph
//! analysis and the ghost racer rely on.

use crate::Seconds;
use crate::clock::{Clock, MonotonicClock};
use crate::timeline::{ROLLING_WINDOW_SEC, Timeline};

/// Lifecycle of a typing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Waiting for the first keypress.
    #[default]
    Idle,
    /// Actively typing.
    Running,
    /// Every character has been typed.
    Complete,
}

/// Display state of one target character, for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharState {
    /// Behind the cursor; already typed correctly.
    Typed,
    /// Under the cursor.
    Cursor,
    /// Under the cursor while the error flag is raised.
    CursorError,
    /// Ahead of the cursor.
    Upcoming,
}

/// Strict-mode typing engine.
///
/// Consumes characters and backspaces, owns the session [`Timeline`], and
/// exposes the live readouts the typing screen renders every frame. All
/// transitions are no-ops on invalid pre-state, so there is nothing to
/// return: feeding input to a completed engine simply does nothing.
///
/// # Examples
///
/// ```rust
/// use cadence::{CharState, SessionState, TypingEngine};
///
/// let mut engine = TypingEngine::new("ab");
/// engine.handle_char('x'); // recorded, cursor stays put
/// assert!(engine.has_error());
///
/// engine.handle_char('a'); // advances and clears the error
/// assert_eq!(engine.char_state(0), CharState::Typed);
///
/// engine.handle_char('b');
/// assert_eq!(engine.state(), SessionState::Complete);
/// ```
#[derive(Debug, Clone)]
pub struct TypingEngine<C: Clock = MonotonicClock> {
    target: Vec<char>,
    position: usize,
    state: SessionState,
    has_error: bool,
    last_error_char: Option<char>,
    timeline: Timeline,
    clock: C,
}

impl TypingEngine<MonotonicClock> {
    /// Create an engine over the given target text, timed by the real clock.
    pub fn new(target: &str) -> Self {
        Self::with_clock(target, MonotonicClock::default())
    }
}

impl<C: Clock> TypingEngine<C> {
    /// Create an engine with an explicit clock (tests, replays).
    pub fn with_clock(target: &str, clock: C) -> Self {
        Self {
            target: target.chars().collect(),
            position: 0,
            state: SessionState::default(),
            has_error: false,
            last_error_char: None,
            timeline: Timeline::default(),
            clock,
        }
    }

    /// Process one typed character. Ignored once the session is complete.
    ///
    /// The first press transitions Idle to Running and stamps the timeline
    /// start. Every press is recorded; only a correct one advances the
    /// cursor, and reaching the end of the target completes the session.
    pub fn handle_char(&mut self, typed: char) {
        if self.state == SessionState::Complete {
            return;
        }

        let now = self.clock.now();
        if self.state == SessionState::Idle {
            self.state = SessionState::Running;
            self.timeline.start(now);
        }

        let Some(&expected) = self.target.get(self.position) else {
            return;
        };

        let is_correct = typed == expected;
        self.timeline
            .record(typed, expected, self.position, is_correct, now);

        if is_correct {
            self.position += 1;
            self.has_error = false;
            self.last_error_char = None;
            if self.position == self.target.len() {
                self.state = SessionState::Complete;
            }
        } else {
            self.has_error = true;
            self.last_error_char = Some(typed);
        }
    }

    /// Move the cursor back one position. Ignored once complete.
    ///
    /// Always clears the error flag; never appended to the timeline.
    pub fn handle_backspace(&mut self) {
        if self.state == SessionState::Complete {
            return;
        }
        if self.position > 0 {
            self.position -= 1;
        }
        self.has_error = false;
        self.last_error_char = None;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Complete
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// The target text as characters.
    pub fn target(&self) -> &[char] {
        &self.target
    }

    pub fn target_len(&self) -> usize {
        self.target.len()
    }

    pub fn has_error(&self) -> bool {
        self.has_error
    }

    /// The wrong character currently sitting on the cursor, if any.
    pub fn last_error_char(&self) -> Option<char> {
        self.last_error_char
    }

    /// Completion in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        self.position as f64 / self.target.len().max(1) as f64
    }

    /// Live rolling WPM over the last few seconds.
    pub fn wpm(&self) -> f64 {
        self.timeline
            .rolling_wpm(self.clock.now(), ROLLING_WINDOW_SEC)
    }

    /// Percentage of correct presses so far.
    pub fn accuracy(&self) -> f64 {
        self.timeline.accuracy()
    }

    /// Seconds since the first press; `0.0` while idle.
    pub fn elapsed(&self) -> Seconds {
        if self.state == SessionState::Idle {
            return 0.0;
        }
        self.timeline.elapsed(self.clock.now())
    }

    /// Display state of the character at `index`.
    pub fn char_state(&self, index: usize) -> CharState {
        if index < self.position {
            CharState::Typed
        } else if index == self.position {
            if self.has_error {
                CharState::CursorError
            } else {
                CharState::Cursor
            }
        } else {
            CharState::Upcoming
        }
    }

    /// The session's keystroke log.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// The engine's time source.
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn engine(target: &str) -> TypingEngine<ManualClock> {
        TypingEngine::with_clock(target, ManualClock::default())
    }

    #[test]
    fn clean_run_completes() {
        let mut engine = engine("ab");
        engine.handle_char('a');
        engine.clock().advance(0.1);
        engine.handle_char('b');

        assert_eq!(engine.state(), SessionState::Complete);
        assert_eq!(engine.position(), 2);
        assert_eq!(engine.accuracy(), 100.0);
        assert_eq!(engine.timeline().len(), 2);
        assert!(engine.timeline().keystrokes().iter().all(|k| k.is_correct));
    }

    #[test]
    fn wrong_key_does_not_advance() {
        let mut engine = engine("ab");
        engine.handle_char('x');
        assert_eq!(engine.position(), 0);
        assert!(engine.has_error());
        assert_eq!(engine.last_error_char(), Some('x'));

        engine.handle_char('a');
        assert!(!engine.has_error());
        assert_eq!(engine.last_error_char(), None);
        engine.handle_char('b');

        assert_eq!(engine.state(), SessionState::Complete);
        assert_eq!(engine.position(), 2);
        assert_eq!(engine.timeline().len(), 3);

        let first = engine.timeline().keystrokes()[0];
        assert!(!first.is_correct);
        assert_eq!(first.expected, 'a');
        assert_eq!(first.typed, 'x');

        let expected = 2.0 / 3.0 * 100.0;
        assert!((engine.accuracy() - expected).abs() < 0.01);
    }

    #[test]
    fn backspace_moves_back_and_is_not_recorded() {
        let mut engine = engine("abc");
        engine.handle_char('a');
        engine.handle_char('b');
        engine.handle_backspace();
        assert_eq!(engine.position(), 1);
        assert!(!engine.has_error());

        engine.handle_char('b');
        engine.handle_char('c');

        assert_eq!(engine.state(), SessionState::Complete);
        assert_eq!(engine.position(), 3);
        assert_eq!(engine.timeline().len(), 4);
    }

    #[test]
    fn backspace_at_start_is_a_no_op() {
        let mut engine = engine("ab");
        engine.handle_backspace();
        assert_eq!(engine.position(), 0);
        assert_eq!(engine.state(), SessionState::Idle);
    }

    #[test]
    fn input_after_completion_is_ignored() {
        let mut engine = engine("a");
        engine.handle_char('a');
        assert_eq!(engine.state(), SessionState::Complete);

        engine.handle_char('z');
        engine.handle_backspace();
        assert_eq!(engine.state(), SessionState::Complete);
        assert_eq!(engine.position(), 1);
        assert_eq!(engine.timeline().len(), 1);
    }

    #[test]
    fn complete_iff_position_at_end() {
        let mut engine = engine("abc");
        for ch in ['a', 'b', 'c'] {
            assert_eq!(
                engine.state() == SessionState::Complete,
                engine.position() == engine.target_len()
            );
            engine.handle_char(ch);
        }
        assert_eq!(engine.state(), SessionState::Complete);
        assert_eq!(engine.position(), engine.target_len());
    }

    #[test]
    fn position_never_exceeds_target_length() {
        let mut engine = engine("ab");
        for ch in ['x', 'a', 'a', 'b', 'b', 'b'] {
            engine.handle_char(ch);
            assert!(engine.position() <= engine.target_len());
        }
    }

    #[test]
    fn idle_engine_has_empty_timeline_and_zero_elapsed() {
        let engine = engine("abc");
        assert_eq!(engine.state(), SessionState::Idle);
        assert!(engine.timeline().is_empty());
        assert_eq!(engine.elapsed(), 0.0);
        assert_eq!(engine.progress(), 0.0);
    }

    #[test]
    fn first_press_stamps_start_time() {
        let mut engine = engine("ab");
        engine.clock().set(42.0);
        engine.handle_char('a');
        assert_eq!(engine.state(), SessionState::Running);
        assert_eq!(engine.timeline().start_time(), 42.0);
    }

    #[test]
    fn char_states_track_cursor_and_error() {
        let mut engine = engine("abc");
        engine.handle_char('a');
        assert_eq!(engine.char_state(0), CharState::Typed);
        assert_eq!(engine.char_state(1), CharState::Cursor);
        assert_eq!(engine.char_state(2), CharState::Upcoming);

        engine.handle_char('x');
        assert_eq!(engine.char_state(1), CharState::CursorError);
    }

    #[test]
    fn progress_is_fraction_of_target() {
        let mut engine = engine("abcd");
        engine.handle_char('a');
        assert_eq!(engine.progress(), 0.25);
    }
}
