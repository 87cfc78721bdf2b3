use std::collections::HashMap;

use cadence::SessionAnalysis;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
};

use crate::app::Action;
use crate::config::theme::Theme;
use crate::input::Key;
use crate::utils::{center, format_clock};
use crate::widgets::{keyboard_heatmap, progress_spans, wpm_graph};

/// The WPM that fills the performance mini-bar completely.
const WPM_BAR_SCALE: f64 = 150.0;
const GRAPH_WIDTH: usize = 40;
const GRAPH_HEIGHT: usize = 5;

/// Page: Results
///
/// The post-session report: performance, WPM graph, heatmap, mistakes,
/// slow transitions and a focus suggestion.
pub struct Results {
    analysis: SessionAnalysis,
    pb_wpm: f64,
    is_new_pb: bool,
    key_counts: HashMap<char, usize>,
}

impl Results {
    pub fn new(
        analysis: SessionAnalysis,
        pb_wpm: f64,
        is_new_pb: bool,
        key_counts: HashMap<char, usize>,
    ) -> Self {
        Self {
            analysis,
            pb_wpm,
            is_new_pb,
            key_counts,
        }
    }

    /// The weak spots a follow-up focus session should target.
    fn focus_targets(&self) -> (Vec<String>, Vec<char>) {
        let digraphs = self
            .analysis
            .slow_digraphs
            .iter()
            .take(2)
            .map(|d| d.digraph.clone())
            .collect();
        let chars = self.analysis.problem_keys.iter().take(3).copied().collect();
        (digraphs, chars)
    }

    fn has_focus_targets(&self) -> bool {
        !self.analysis.slow_digraphs.is_empty() || !self.analysis.problem_keys.is_empty()
    }
}

// Rendering logic
impl Results {
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let area = center(area, Constraint::Percentage(80), Constraint::Percentage(95));
        let a = &self.analysis;

        let mut lines = vec![
            Line::styled("SESSION COMPLETE", Style::new().fg(theme.primary).bold()).centered(),
            Line::raw(""),
        ];

        // Performance
        lines.push(section("PERFORMANCE", theme));
        lines.push(self.wpm_line(theme));
        lines.push(self.accuracy_line(theme));
        lines.push(Line::styled(
            format!(
                "  {}   ·   {} chars   ·   {} errors",
                format_clock(a.duration_sec),
                a.chars_typed,
                a.total_errors
            ),
            Style::new().fg(theme.text_muted),
        ));
        lines.push(Line::raw(""));

        // WPM over time
        if !a.wpm_buckets.is_empty() {
            lines.push(section("WPM OVER TIME", theme));
            lines.extend(wpm_graph(&a.wpm_buckets, GRAPH_WIDTH, GRAPH_HEIGHT, theme));
            lines.push(Line::raw(""));
        }

        // Keyboard heatmap
        if !self.key_counts.is_empty() {
            lines.push(section("KEYBOARD HEATMAP", theme));
            lines.extend(keyboard_heatmap(&self.key_counts, theme));
            lines.push(Line::raw(""));
        }

        // Top errors
        if !a.top_errors.is_empty() {
            lines.push(section("TOP MISTAKES", theme));
            for pair in &a.top_errors {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  '{}'", pair.expected),
                        Style::new().fg(theme.error).bold(),
                    ),
                    Span::styled(" <- typed ", Style::new().fg(theme.text_muted)),
                    Span::styled(format!("'{}'", pair.got), Style::new().fg(theme.secondary)),
                    Span::styled(format!("  x{}", pair.count), Style::new().fg(theme.text_muted)),
                ]));
            }
            lines.push(Line::raw(""));
        }

        // Slow digraphs
        if !a.slow_digraphs.is_empty() {
            lines.push(section("SLOW TRANSITIONS", theme));
            for digraph in &a.slow_digraphs {
                let sign = if digraph.deviation_ms >= 0.0 { "+" } else { "" };
                let deviation_colour = if digraph.deviation_ms > 0.0 {
                    theme.error
                } else {
                    theme.primary
                };
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  '{}'", digraph.digraph),
                        Style::new().fg(theme.secondary).bold(),
                    ),
                    Span::styled(
                        format!("  {:5.0}ms avg", digraph.avg_ms),
                        Style::new().fg(theme.text_muted),
                    ),
                    Span::styled(
                        format!("  {sign}{:.0}ms vs avg", digraph.deviation_ms),
                        Style::new().fg(deviation_colour),
                    ),
                ]));
            }
            lines.push(Line::raw(""));
        }

        // Problem keys
        if !a.problem_keys.is_empty() {
            lines.push(section("PROBLEM KEYS", theme));
            let mut spans = vec![Span::raw("  ")];
            for key in &a.problem_keys {
                spans.push(Span::styled(
                    format!(" {key} "),
                    Style::new().fg(theme.bg).bg(theme.error).bold(),
                ));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
            lines.push(Line::raw(""));
        }

        // Focus suggestion
        if self.has_focus_targets() {
            let (digraphs, chars) = self.focus_targets();
            let mut spans = vec![Span::styled(
                "  focus suggestion: ",
                Style::new().fg(theme.primary).bold(),
            )];
            if !digraphs.is_empty() {
                let list: Vec<String> = digraphs.iter().map(|d| format!("'{d}'")).collect();
                spans.push(Span::styled(
                    format!("digraphs {}", list.join(", ")),
                    Style::new().fg(theme.secondary),
                ));
            }
            if !chars.is_empty() {
                if !digraphs.is_empty() {
                    spans.push(Span::styled("  ·  ", Style::new().fg(theme.text_muted)));
                }
                let list: Vec<String> = chars.iter().map(|c| format!("'{c}'")).collect();
                spans.push(Span::styled(
                    format!("keys {}", list.join(", ")),
                    Style::new().fg(theme.secondary),
                ));
            }
            lines.push(Line::from(spans));
            lines.push(Line::styled(
                "  press f to practice them now",
                Style::new().fg(theme.text_muted),
            ));
            lines.push(Line::raw(""));
        }

        lines.push(action_bar(theme));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(paragraph.block(Block::new()), area);
    }

    fn wpm_line(&self, theme: &Theme) -> Line<'static> {
        let a = &self.analysis;
        let mut spans = vec![Span::styled(
            format!("  WPM       {:6.1}  ", a.wpm),
            Style::new().fg(theme.primary).bold(),
        )];
        spans.extend(progress_spans(
            (a.wpm / WPM_BAR_SCALE).min(1.0),
            20,
            theme.progress,
            theme.dim,
        ));
        if self.is_new_pb {
            spans.push(Span::styled(
                "  new personal best!",
                Style::new().fg(theme.secondary).bold(),
            ));
        } else {
            spans.push(Span::styled(
                format!("  (best: {:.1})", self.pb_wpm),
                Style::new().fg(theme.text_muted),
            ));
        }
        Line::from(spans)
    }

    fn accuracy_line(&self, theme: &Theme) -> Line<'static> {
        let a = &self.analysis;
        let colour = if a.accuracy >= 95.0 {
            theme.primary
        } else if a.accuracy >= 85.0 {
            theme.secondary
        } else {
            theme.error
        };
        let mut spans = vec![Span::styled(
            format!("  Accuracy  {:5.1}%  ", a.accuracy),
            Style::new().fg(colour).bold(),
        )];
        spans.extend(progress_spans(a.accuracy / 100.0, 20, colour, theme.dim));
        Line::from(spans)
    }
}

// Event handlers
impl Results {
    pub fn handle_key(&mut self, key: Key) -> Option<Action> {
        match key {
            Key::Char('r' | 'R') => Some(Action::Retry),
            Key::Char('f' | 'F') if self.has_focus_targets() => {
                let (digraphs, chars) = self.focus_targets();
                Some(Action::FocusFromResults { digraphs, chars })
            }
            Key::Char('m' | 'M') | Key::Esc => Some(Action::GoMenu),
            Key::Char('q' | 'Q') => Some(Action::Quit),
            _ => None,
        }
    }
}

fn section(label: &str, theme: &Theme) -> Line<'static> {
    Line::styled(
        format!("  ▸ {label}"),
        Style::new().fg(theme.secondary).bold(),
    )
}

fn action_bar(theme: &Theme) -> Line<'static> {
    let hint = Style::new().fg(theme.primary).bold();
    let muted = Style::new().fg(theme.text_muted);
    Line::from(vec![
        Span::styled("r ", hint),
        Span::styled("retry    ", muted),
        Span::styled("f ", hint),
        Span::styled("focus    ", muted),
        Span::styled("m ", hint),
        Span::styled("menu    ", muted),
        Span::styled("q ", hint),
        Span::styled("quit", muted),
    ])
    .centered()
}
