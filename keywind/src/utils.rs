use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block, BorderType, Padding},
};

/// A block with a rounded border
pub const ROUNDED_BLOCK: Block = Block::bordered().border_type(BorderType::Rounded);

/// Creates a centered area within the given Rect respective to the
/// horizontal and vertical constraints.
pub fn center(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area_horizontal] = Layout::horizontal([horizontal])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([vertical])
        .flex(Flex::Center)
        .areas(area_horizontal);
    area
}

/// Padding that pushes a widget of the given height to the vertical middle.
pub fn vertical_center_padding(area: Rect, widget_height: u16) -> Padding {
    Padding::top(area.height.saturating_sub(widget_height) / 2)
}

/// Format seconds as `m:ss`.
pub fn format_clock(elapsed_sec: f64) -> String {
    let total = elapsed_sec.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_splits_area() {
        let area = Rect::new(0, 0, 100, 40);
        let centered = center(area, Constraint::Percentage(50), Constraint::Percentage(50));
        assert_eq!(centered.width, 50);
        assert_eq!(centered.height, 20);
        assert_eq!(centered.x, 25);
        assert_eq!(centered.y, 10);
    }

    #[test]
    fn clock_formats_minutes_and_seconds() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(61.4), "1:01");
        assert_eq!(format_clock(600.0), "10:00");
        assert_eq!(format_clock(-3.0), "0:00");
    }

    #[test]
    fn vertical_padding_never_underflows() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(vertical_center_padding(area, 10).top, 0);
        assert_eq!(vertical_center_padding(area, 2).top, 1);
    }
}
