//! Progress bar and stats bar.

use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};

use crate::config::theme::Theme;
use crate::utils::format_clock;

/// Width of the mini progress bar embedded in the stats bar.
const MINI_BAR_WIDTH: usize = 20;

/// Spans for a progress bar: `filled` full blocks then `empty` shade blocks.
pub fn progress_spans(progress: f64, width: usize, fill: Color, empty: Color) -> Vec<Span<'static>> {
    let filled = (progress.clamp(0.0, 1.0) * width as f64) as usize;
    vec![
        Span::styled("█".repeat(filled), Style::new().fg(fill)),
        Span::styled("░".repeat(width - filled), Style::new().fg(empty)),
    ]
}

/// The inline stats strip shown under the typing text:
/// `{wpm:5.1} wpm · {acc:5.1}% · m:ss · <mini-bar> · {pct}%`.
pub fn stats_bar(
    wpm: f64,
    accuracy: f64,
    elapsed_sec: f64,
    progress: f64,
    theme: &Theme,
) -> Line<'static> {
    let separator = || Span::styled("   ·   ", Style::new().fg(theme.text_muted));

    let mut spans = vec![
        Span::styled(format!("{wpm:5.1}"), Style::new().fg(theme.primary).bold()),
        Span::styled(" wpm", Style::new().fg(theme.text_muted)),
        separator(),
        Span::styled(
            format!("{accuracy:5.1}"),
            Style::new().fg(theme.secondary).bold(),
        ),
        Span::styled("%", Style::new().fg(theme.text_muted)),
        separator(),
        Span::styled(format_clock(elapsed_sec), Style::new().fg(theme.text_muted)),
        separator(),
    ];

    let filled = (progress.clamp(0.0, 1.0) * MINI_BAR_WIDTH as f64) as usize;
    spans.push(Span::styled(
        "▓".repeat(filled),
        Style::new().fg(theme.primary),
    ));
    spans.push(Span::styled(
        "░".repeat(MINI_BAR_WIDTH - filled),
        Style::new().fg(theme.text_muted),
    ));
    spans.push(Span::styled(
        format!("  {:3}%", (progress.clamp(0.0, 1.0) * 100.0) as u16),
        Style::new().fg(theme.text_muted),
    ));

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use crate::config::theme;

    use super::*;

    fn block_count(spans: &[Span], block: char) -> usize {
        spans
            .iter()
            .map(|s| s.content.chars().filter(|&c| c == block).count())
            .sum()
    }

    #[test]
    fn progress_fill_matches_fraction() {
        let spans = progress_spans(0.5, 40, Color::Green, Color::Black);
        assert_eq!(block_count(&spans, '█'), 20);
        assert_eq!(block_count(&spans, '░'), 20);
    }

    #[test]
    fn progress_is_clamped() {
        let over = progress_spans(1.7, 10, Color::Green, Color::Black);
        assert_eq!(block_count(&over, '█'), 10);
        assert_eq!(block_count(&over, '░'), 0);

        let under = progress_spans(-0.3, 10, Color::Green, Color::Black);
        assert_eq!(block_count(&under, '█'), 0);
        assert_eq!(block_count(&under, '░'), 10);
    }

    #[test]
    fn stats_bar_formats_the_readouts() {
        let line = stats_bar(72.5, 96.2, 75.0, 0.45, &theme::DEFAULT);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains(" 72.5 wpm"));
        assert!(text.contains(" 96.2%"));
        assert!(text.contains("1:15"));
        assert!(text.contains("45%"));
        assert_eq!(block_count(&line.spans, '▓'), 9);
        assert_eq!(block_count(&line.spans, '░'), 11);
    }
}
