use cadence::{CharState, TypingEngine, analyzer};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::app::{Action, SessionSummary};
use crate::config::theme::Theme;
use crate::input::Key;
use crate::utils::{center, vertical_center_padding};
use crate::widgets::{counts_from_keystrokes, stats_bar};

/// Upper bound on the rendered line width.
const MAX_LINE_WIDTH: usize = 65;

/// Page: Typing
///
/// Displays the target text and feeds keystrokes to the engine. Esc
/// abandons the session; nothing partial is persisted.
pub struct Typing {
    engine: TypingEngine,
    source: String,
    zen: bool,
    /// Cumulative ms offsets of the best previous run, one per correct char.
    ghost: Vec<u64>,
}

impl Typing {
    /// Creates a new typing session over already-generated text.
    pub fn new(text: &str, source: String, zen: bool, ghost_timings: &[u64]) -> Self {
        let mut ghost = Vec::with_capacity(ghost_timings.len());
        let mut cumulative = 0;
        for &ms in ghost_timings {
            cumulative += ms;
            ghost.push(cumulative);
        }

        Self {
            engine: TypingEngine::new(text),
            source,
            zen,
            ghost,
        }
    }

    /// How many characters the ghost has typed at the given elapsed time,
    /// clamped to its own timeline length once exhausted.
    fn ghost_position(&self, elapsed_ms: f64) -> usize {
        self.ghost
            .iter()
            .take_while(|&&offset| offset as f64 <= elapsed_ms)
            .count()
    }

    fn ghost_delta(&self) -> Option<String> {
        if self.ghost.is_empty() {
            return None;
        }
        let ghost_pos = self.ghost_position(self.engine.elapsed() * 1000.0) as isize;
        let diff = ghost_pos - self.engine.position() as isize;
        Some(match diff {
            d if d > 0 => format!("ghost ahead by {d}"),
            d if d < 0 => format!("you ahead by {}", -d),
            _ => "tied with ghost".to_string(),
        })
    }

    fn summarize(&self) -> SessionSummary {
        let timeline = self.engine.timeline();
        let analysis = analyzer::analyse(timeline, self.engine.elapsed());

        // Millisecond gaps between consecutive correct keystrokes; this is
        // what a future ghost replays.
        let mut timings = Vec::new();
        let mut prev_ts: Option<f64> = None;
        for k in timeline.keystrokes().iter().filter(|k| k.is_correct) {
            if let Some(prev) = prev_ts {
                timings.push(((k.timestamp - prev) * 1000.0).max(0.0) as u64);
            }
            prev_ts = Some(k.timestamp);
        }

        SessionSummary {
            analysis,
            source: self.source.clone(),
            timings,
            key_counts: counts_from_keystrokes(timeline.keystrokes()),
        }
    }
}

// Rendering logic
impl Typing {
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let area = center(area, Constraint::Percentage(80), Constraint::Percentage(90));
        let width = (area.width as usize).clamp(20, MAX_LINE_WIDTH);

        let mut lines = vec![self.header_line(theme), Line::raw("")];
        lines.extend(self.text_lines(width, theme));
        lines.push(Line::raw(""));

        if self.zen && !self.engine.is_complete() {
            lines.push(Line::styled(
                "- zen -",
                Style::new().fg(theme.text_muted),
            ));
        } else {
            lines.push(stats_bar(
                self.engine.wpm(),
                self.engine.accuracy(),
                self.engine.elapsed(),
                self.engine.progress(),
                theme,
            ));
        }

        lines.push(Line::raw(""));
        lines.push(self.footer_line(theme));

        let height = lines.len() as u16;
        let paragraph = Paragraph::new(lines)
            .block(Block::new().padding(vertical_center_padding(area, height)));
        frame.render_widget(paragraph, area);
    }

    fn header_line(&self, theme: &Theme) -> Line<'static> {
        let mut spans = vec![Span::styled(
            self.source.clone(),
            Style::new().fg(theme.secondary),
        )];
        if self.zen {
            spans.push(Span::styled("  ·  zen", Style::new().fg(theme.text_muted)));
        }
        if let Some(delta) = self.ghost_delta() {
            spans.push(Span::styled(
                format!("  ·  {delta}"),
                Style::new().fg(theme.secondary),
            ));
        }
        Line::from(spans)
    }

    /// Word-wrap the target and style every character by its engine state.
    fn text_lines(&self, width: usize, theme: &Theme) -> Vec<Line<'static>> {
        let target = self.engine.target();
        let mut lines = Vec::new();
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut line_len = 0;

        let mut index = 0;
        while index < target.len() {
            // Length of the word starting here (up to the next space)
            let word_end = target[index..]
                .iter()
                .position(|&c| c == ' ')
                .map_or(target.len(), |offset| index + offset);
            let word_len = word_end - index;

            if line_len > 0 && line_len + word_len > width {
                lines.push(Line::from(std::mem::take(&mut spans)));
                line_len = 0;
            }

            for i in index..word_end {
                spans.push(self.char_span(target[i], i, theme));
            }
            line_len += word_len;
            index = word_end;

            // The space after the word stays on the current line
            if index < target.len() {
                spans.push(self.char_span(target[index], index, theme));
                line_len += 1;
                index += 1;
            }
        }
        if !spans.is_empty() {
            lines.push(Line::from(spans));
        }
        lines
    }

    fn char_span(&self, ch: char, index: usize, theme: &Theme) -> Span<'static> {
        match self.engine.char_state(index) {
            CharState::Typed => Span::styled(ch.to_string(), Style::new().fg(theme.dim)),
            CharState::Cursor => {
                let display = if ch == ' ' { '█' } else { ch };
                Span::styled(
                    display.to_string(),
                    Style::new().fg(theme.bg).bg(theme.primary).bold(),
                )
            }
            CharState::CursorError => Span::styled(
                "█".to_string(),
                Style::new().fg(theme.bg).bg(theme.error).bold(),
            ),
            CharState::Upcoming => {
                Span::styled(ch.to_string(), Style::new().fg(theme.text_muted))
            }
        }
    }

    fn footer_line(&self, theme: &Theme) -> Line<'static> {
        let mut spans = vec![
            Span::styled("Esc ", Style::new().fg(theme.primary)),
            Span::styled("abandon", Style::new().fg(theme.text_muted)),
        ];
        if self.engine.has_error() {
            spans.push(Span::styled(
                "   ✗ wrong key",
                Style::new().fg(theme.error).bold(),
            ));
        }
        Line::from(spans)
    }
}

// Event handlers
impl Typing {
    pub fn handle_key(&mut self, key: Key) -> Option<Action> {
        match key {
            Key::Esc => return Some(Action::Pop),
            Key::Backspace => self.engine.handle_backspace(),
            Key::Char(ch) => {
                self.engine.handle_char(ch);
                if self.engine.is_complete() {
                    return Some(Action::SessionComplete(Box::new(self.summarize())));
                }
            }
            _ => (),
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typing(text: &str, ghost: &[u64]) -> Typing {
        Typing::new(text, "words".to_string(), false, ghost)
    }

    fn type_str(page: &mut Typing, text: &str) -> Option<Action> {
        let mut last = None;
        for ch in text.chars() {
            last = page.handle_key(Key::Char(ch));
        }
        last
    }

    #[test]
    fn completing_the_text_emits_a_summary() {
        let mut page = typing("hi", &[]);
        let action = type_str(&mut page, "hi");

        match action {
            Some(Action::SessionComplete(summary)) => {
                assert_eq!(summary.source, "words");
                assert_eq!(summary.analysis.chars_typed, 2);
                assert_eq!(summary.analysis.total_errors, 0);
                assert_eq!(summary.timings.len(), 1);
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn escape_pops_without_a_summary() {
        let mut page = typing("hello", &[]);
        type_str(&mut page, "he");
        assert!(matches!(page.handle_key(Key::Esc), Some(Action::Pop)));
    }

    #[test]
    fn errors_are_recorded_in_the_summary() {
        let mut page = typing("ab", &[]);
        page.handle_key(Key::Char('x'));
        let action = type_str(&mut page, "ab");

        match action {
            Some(Action::SessionComplete(summary)) => {
                assert_eq!(summary.analysis.total_errors, 1);
                assert_eq!(summary.analysis.error_log, vec![('a', 'x')]);
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn ghost_position_follows_cumulative_offsets() {
        let page = typing("hello world", &[100, 100, 300]);
        // offsets become 100, 200, 500
        assert_eq!(page.ghost_position(0.0), 0);
        assert_eq!(page.ghost_position(150.0), 1);
        assert_eq!(page.ghost_position(250.0), 2);
        assert_eq!(page.ghost_position(500.0), 3);
        // Exhausted ghost parks at its end
        assert_eq!(page.ghost_position(10_000.0), 3);
    }

    #[test]
    fn ghost_delta_reports_relative_position() {
        let mut page = typing("abc", &[10_000]);
        assert_eq!(page.ghost_delta().as_deref(), Some("tied with ghost"));

        page.handle_key(Key::Char('a'));
        assert_eq!(page.ghost_delta().as_deref(), Some("you ahead by 1"));
    }

    #[test]
    fn no_ghost_no_delta() {
        let page = typing("abc", &[]);
        assert!(page.ghost_delta().is_none());
    }

    #[test]
    fn wrapping_keeps_every_character() {
        let page = typing("the quick brown fox jumps over the lazy dog", &[]);
        let lines = page.text_lines(10, &crate::config::theme::DEFAULT);
        assert!(lines.len() > 1);

        // Every target character is rendered exactly once across the
        // wrapped lines
        let total_chars: usize = lines
            .iter()
            .flat_map(|line| line.spans.iter())
            .map(|span| span.content.chars().count())
            .sum();
        assert_eq!(total_chars, page.engine.target().len());
    }
}
