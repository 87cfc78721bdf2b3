//! ASCII keyboard heatmap.

use std::collections::HashMap;

use cadence::Keystroke;
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};

use crate::config::theme::Theme;

/// Standard QWERTY rows, lowercase.
const ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];
const ROW_INDENT: [&str; 3] = ["", " ", "  "];

/// Render three QWERTY rows coloured by relative key frequency, plus a
/// legend explaining the banding.
pub fn keyboard_heatmap(counts: &HashMap<char, usize>, theme: &Theme) -> Vec<Line<'static>> {
    let max_count = counts.values().copied().max().unwrap_or(0).max(1);

    let mut lines: Vec<Line<'static>> = ROWS
        .iter()
        .zip(ROW_INDENT)
        .map(|(row, indent)| {
            let mut spans = vec![Span::raw(format!("  {indent}"))];
            for key in row.chars() {
                let count = counts.get(&key).copied().unwrap_or(0);
                let colour = band_colour(count, max_count, theme);
                spans.push(Span::styled(
                    format!("{} ", key.to_ascii_uppercase()),
                    Style::new().fg(colour).bold(),
                ));
            }
            Line::from(spans)
        })
        .collect();

    lines.push(Line::raw(""));
    lines.push(legend(theme));
    lines
}

/// Derive a–z hit counts from correct keystrokes only.
pub fn counts_from_keystrokes(keystrokes: &[Keystroke]) -> HashMap<char, usize> {
    let mut counts = HashMap::new();
    for k in keystrokes {
        if k.is_correct && k.typed.is_ascii_alphabetic() {
            *counts.entry(k.typed.to_ascii_lowercase()).or_default() += 1;
        }
    }
    counts
}

fn band_colour(count: usize, max_count: usize, theme: &Theme) -> Color {
    if count == 0 {
        return theme.dim;
    }
    let ratio = count as f64 / max_count as f64;
    if ratio >= 0.75 {
        theme.primary
    } else if ratio >= 0.4 {
        theme.secondary
    } else {
        theme.text_muted
    }
}

fn legend(theme: &Theme) -> Line<'static> {
    let muted = Style::new().fg(theme.text_muted);
    Line::from(vec![
        Span::raw("  "),
        Span::styled("░ ", Style::new().fg(theme.dim)),
        Span::styled("unused  ", muted),
        Span::styled("▒ ", muted),
        Span::styled("rare  ", muted),
        Span::styled("▓ ", Style::new().fg(theme.secondary)),
        Span::styled("frequent  ", muted),
        Span::styled("█ ", Style::new().fg(theme.primary)),
        Span::styled("dominant", muted),
    ])
}

#[cfg(test)]
mod tests {
    use crate::config::theme;

    use super::*;

    fn counts(pairs: &[(char, usize)]) -> HashMap<char, usize> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn renders_three_rows_and_a_legend() {
        let lines = keyboard_heatmap(&counts(&[('e', 10)]), &theme::DEFAULT);
        assert_eq!(lines.len(), 5);

        let top: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(top.contains('Q'));
        assert!(top.contains('P'));
    }

    #[test]
    fn banding_thresholds() {
        let t = &theme::DEFAULT;
        assert_eq!(band_colour(0, 100, t), t.dim);
        assert_eq!(band_colour(10, 100, t), t.text_muted);
        assert_eq!(band_colour(50, 100, t), t.secondary);
        assert_eq!(band_colour(80, 100, t), t.primary);
        assert_eq!(band_colour(100, 100, t), t.primary);
    }

    #[test]
    fn hottest_key_gets_primary() {
        let t = &theme::DEFAULT;
        let lines = keyboard_heatmap(&counts(&[('e', 8), ('q', 1)]), t);
        let top_row = &lines[0].spans;

        // "  " indent span, then Q W E R T...
        let e_span = &top_row[3];
        assert_eq!(e_span.content.as_ref(), "E ");
        assert_eq!(e_span.style.fg, Some(t.primary));

        let q_span = &top_row[1];
        assert_eq!(q_span.content.as_ref(), "Q ");
        assert_eq!(q_span.style.fg, Some(t.text_muted));
    }

    #[test]
    fn counts_only_include_correct_alpha_presses() {
        let keystrokes = [
            Keystroke {
                typed: 'a',
                expected: 'a',
                timestamp: 0.1,
                is_correct: true,
                position: 0,
            },
            Keystroke {
                typed: 'A',
                expected: 'A',
                timestamp: 0.2,
                is_correct: true,
                position: 1,
            },
            Keystroke {
                typed: 'x',
                expected: 'b',
                timestamp: 0.3,
                is_correct: false,
                position: 2,
            },
            Keystroke {
                typed: ' ',
                expected: ' ',
                timestamp: 0.4,
                is_correct: true,
                position: 2,
            },
        ];
        let counts = counts_from_keystrokes(&keystrokes);
        assert_eq!(counts.get(&'a'), Some(&2));
        assert_eq!(counts.get(&'x'), None);
        assert_eq!(counts.len(), 1);
    }
}
