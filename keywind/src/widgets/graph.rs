//! ASCII WPM-over-time graph.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::config::theme::Theme;

/// Render the per-bucket WPM history as an ASCII line graph.
///
/// Rows are normalised between `max(0, min_nonzero - 5)` and the maximum
/// bucket value. Points are drawn as `█` and consecutive columns are
/// joined by filling every row between the previous and current point. A
/// left gutter shows interpolated integer y-labels and the bottom row is
/// the x-axis.
pub fn wpm_graph(buckets: &[f64], width: usize, height: usize, theme: &Theme) -> Vec<Line<'static>> {
    let muted = Style::new().fg(theme.dim);
    let line_style = Style::new().fg(theme.graph_line);

    if buckets.is_empty() || buckets.iter().all(|&v| v == 0.0) {
        return vec![Line::styled("  no data yet", muted)];
    }

    let columns = buckets.len().min(width.max(1));
    let buckets = &buckets[..columns];

    let max_wpm = buckets.iter().copied().fold(f64::MIN, f64::max).max(1.0);
    let min_nonzero = buckets
        .iter()
        .copied()
        .filter(|&v| v > 0.0)
        .fold(f64::MAX, f64::min);
    let min_wpm = (min_nonzero - 5.0).max(0.0);
    let span = (max_wpm - min_wpm).max(1.0);
    let height = height.max(2);

    let row_of = |value: f64| -> usize {
        let norm = (value - min_wpm) / span;
        (((1.0 - norm) * (height - 1) as f64) as usize).min(height - 1)
    };

    // grid[row][col] marks a point or a vertical join
    let mut grid = vec![vec![false; columns]; height];
    for (col, &value) in buckets.iter().enumerate() {
        let row = row_of(value);
        grid[row][col] = true;
        if col > 0 {
            let prev_row = row_of(buckets[col - 1]);
            let (lo, hi) = (row.min(prev_row), row.max(prev_row));
            for fill in lo..=hi {
                grid[fill][col] = true;
            }
        }
    }

    let mut lines = Vec::with_capacity(height + 1);
    for (row_idx, row) in grid.iter().enumerate() {
        let label_value =
            max_wpm - (row_idx as f64 / (height - 1).max(1) as f64) * (max_wpm - min_wpm);
        let mut spans = vec![Span::styled(
            format!("{:3}│", label_value as i64),
            muted,
        )];
        let plot: String = row.iter().map(|&on| if on { '█' } else { ' ' }).collect();
        spans.push(Span::styled(plot, line_style));
        lines.push(Line::from(spans));
    }

    lines.push(Line::styled(
        format!("   └{}→", "─".repeat(columns)),
        muted,
    ));
    lines
}

#[cfg(test)]
mod tests {
    use crate::config::theme;

    use super::*;

    fn rendered(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn empty_buckets_show_placeholder() {
        let lines = wpm_graph(&[], 40, 5, &theme::DEFAULT);
        assert_eq!(rendered(&lines), vec!["  no data yet"]);

        let lines = wpm_graph(&[0.0, 0.0], 40, 5, &theme::DEFAULT);
        assert_eq!(rendered(&lines), vec!["  no data yet"]);
    }

    #[test]
    fn graph_has_height_rows_plus_axis() {
        let lines = wpm_graph(&[30.0, 45.0, 60.0, 50.0], 40, 5, &theme::DEFAULT);
        assert_eq!(lines.len(), 6);

        let text = rendered(&lines);
        let axis = text.last().expect("axis row");
        assert!(axis.contains('└'));
        assert!(axis.ends_with('→'));
        assert_eq!(axis.chars().filter(|&c| c == '─').count(), 4);
    }

    #[test]
    fn every_column_is_plotted() {
        let buckets = [20.0, 60.0, 40.0];
        let lines = wpm_graph(&buckets, 40, 5, &theme::DEFAULT);
        let text = rendered(&lines);

        for col in 0..buckets.len() {
            let hit = text[..5]
                .iter()
                .any(|row| row.chars().nth(4 + col) == Some('█'));
            assert!(hit, "column {col} has no point");
        }
    }

    #[test]
    fn consecutive_points_are_joined_vertically() {
        // A jump from low to high fills every row between the two points
        let lines = wpm_graph(&[10.0, 60.0], 40, 5, &theme::DEFAULT);
        let text = rendered(&lines);
        let low_row = text[..5]
            .iter()
            .position(|row| row.chars().nth(4) == Some('█'))
            .expect("first column plotted");
        let joined = text[..5]
            .iter()
            .filter(|row| row.chars().nth(5) == Some('█'))
            .count();
        // The second column is filled from the top row down to the first
        // column's row.
        assert_eq!(joined, low_row + 1);
    }

    #[test]
    fn y_labels_span_max_down_to_min() {
        let lines = wpm_graph(&[30.0, 60.0], 40, 5, &theme::DEFAULT);
        let text = rendered(&lines);
        assert!(text[0].trim_start().starts_with("60"));
        // Bottom plot row label is min = 30 - 5 = 25
        assert!(text[4].trim_start().starts_with("25"));
    }

    #[test]
    fn width_caps_the_column_count() {
        let buckets: Vec<f64> = (1..=50).map(f64::from).collect();
        let lines = wpm_graph(&buckets, 10, 5, &theme::DEFAULT);
        let axis = rendered(&lines).pop().expect("axis");
        assert_eq!(axis.chars().filter(|&c| c == '─').count(), 10);
    }
}
