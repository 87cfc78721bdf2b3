use cadence::Category;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use strum::IntoEnumIterator;

use crate::app::{Action, ContentKind};
use crate::config::theme::{self, Theme};
use crate::fetch::Source;
use crate::input::Key;
use crate::utils::{center, vertical_center_padding};

const WORD_TARGETS: [usize; 3] = [25, 50, 100];
const TAGLINE: &str = "type better, every session";

/// Page: Main menu
///
/// Category select, then session length, with a theme picker on `t`.
pub struct Menu {
    stage: Stage,
    entries: Vec<Entry>,
    stats_line: String,
    entry_index: usize,
    length_index: usize,
    theme_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Categories,
    Length,
    Themes,
}

struct Entry {
    kind: ContentKind,
    label: &'static str,
    description: String,
}

impl Menu {
    /// Creates a new menu. `stats_line` and `focus_hint` come from the
    /// store and may be empty.
    pub fn new(stats_line: String, focus_hint: String) -> Self {
        let mut entries: Vec<Entry> = Category::iter()
            .map(|category| Entry {
                kind: ContentKind::Builtin(category),
                label: category.label(),
                description: category.description().to_string(),
            })
            .collect();
        entries.extend(Source::iter().map(|source| Entry {
            kind: ContentKind::External(source),
            label: source.label(),
            description: source.description().to_string(),
        }));
        entries.push(Entry {
            kind: ContentKind::Focus,
            label: "Focus Practice",
            description: if focus_hint.is_empty() {
                "targets your weak spots from recent sessions".to_string()
            } else {
                focus_hint
            },
        });

        Self {
            stage: Stage::Categories,
            entries,
            stats_line,
            entry_index: 0,
            length_index: 1,
            theme_index: 0,
        }
    }
}

// Rendering logic
impl Menu {
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let area = center(area, Constraint::Percentage(80), Constraint::Percentage(90));

        let mut lines = vec![Line::styled(TAGLINE, Style::new().fg(theme.text_muted)).centered()];
        if !self.stats_line.is_empty() {
            lines.push(Line::styled(self.stats_line.clone(), Style::new().fg(theme.secondary)).centered());
        }
        lines.push(Line::raw(""));

        match self.stage {
            Stage::Categories => self.render_categories(&mut lines, theme),
            Stage::Length => self.render_length(&mut lines, theme),
            Stage::Themes => self.render_themes(&mut lines, theme),
        }

        lines.push(Line::raw(""));
        lines.push(footer(self.stage, theme));

        let height = lines.len() as u16;
        let paragraph = Paragraph::new(lines)
            .block(Block::new().padding(vertical_center_padding(area, height)));
        frame.render_widget(paragraph, area);
    }

    fn render_categories(&self, lines: &mut Vec<Line<'static>>, theme: &Theme) {
        for (i, entry) in self.entries.iter().enumerate() {
            lines.push(entry_line(
                entry,
                i == self.entry_index,
                theme,
            ));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("  t ", Style::new().fg(theme.primary).bold()),
            Span::styled("change theme", Style::new().fg(theme.text_muted)),
        ]));
    }

    fn render_length(&self, lines: &mut Vec<Line<'static>>, theme: &Theme) {
        let entry = &self.entries[self.entry_index];
        lines.push(Line::styled(
            format!("  {}  -  session length:", entry.label),
            Style::new().fg(theme.primary),
        ));
        lines.push(Line::raw(""));
        for (i, target) in WORD_TARGETS.iter().enumerate() {
            let label = format!("about {target} words");
            lines.push(select_line(label, i == self.length_index, theme));
        }
    }

    fn render_themes(&self, lines: &mut Vec<Line<'static>>, theme: &Theme) {
        lines.push(Line::styled(
            "  select theme:",
            Style::new().fg(theme.secondary),
        ));
        lines.push(Line::raw(""));
        for (i, candidate) in theme::ALL.iter().enumerate() {
            let mut label = candidate.name.to_string();
            if candidate.name == theme.name {
                label.push_str("  (active)");
            }
            lines.push(select_line(label, i == self.theme_index, theme));
        }
    }
}

// Event handlers
impl Menu {
    pub fn handle_key(&mut self, key: Key) -> Option<Action> {
        match self.stage {
            Stage::Categories => self.handle_categories(key),
            Stage::Length => self.handle_length(key),
            Stage::Themes => self.handle_themes(key),
        }
    }

    fn handle_categories(&mut self, key: Key) -> Option<Action> {
        match key {
            Key::Up | Key::Char('k') => {
                previous_index(&mut self.entry_index, self.entries.len());
            }
            Key::Down | Key::Char('j') => {
                next_index(&mut self.entry_index, self.entries.len());
            }
            Key::Enter => self.stage = Stage::Length,
            Key::Char('t') => self.stage = Stage::Themes,
            Key::Char('q') => return Some(Action::Quit),
            _ => (),
        }
        None
    }

    fn handle_length(&mut self, key: Key) -> Option<Action> {
        match key {
            Key::Up | Key::Char('k') => {
                previous_index(&mut self.length_index, WORD_TARGETS.len());
            }
            Key::Down | Key::Char('j') => {
                next_index(&mut self.length_index, WORD_TARGETS.len());
            }
            Key::Enter => {
                return Some(Action::StartSession {
                    kind: self.entries[self.entry_index].kind,
                    word_target: WORD_TARGETS[self.length_index],
                });
            }
            Key::Backspace | Key::Esc => self.stage = Stage::Categories,
            Key::Char('q') => return Some(Action::Quit),
            _ => (),
        }
        None
    }

    fn handle_themes(&mut self, key: Key) -> Option<Action> {
        match key {
            Key::Up | Key::Char('k') => {
                previous_index(&mut self.theme_index, theme::ALL.len());
            }
            Key::Down | Key::Char('j') => {
                next_index(&mut self.theme_index, theme::ALL.len());
            }
            Key::Enter => {
                let chosen = theme::ALL[self.theme_index].name;
                self.stage = Stage::Categories;
                return Some(Action::ChangeTheme(chosen));
            }
            Key::Backspace | Key::Esc => self.stage = Stage::Categories,
            Key::Char('q') => return Some(Action::Quit),
            _ => (),
        }
        None
    }
}

fn entry_line(entry: &Entry, selected: bool, theme: &Theme) -> Line<'static> {
    if selected {
        Line::from(vec![
            Span::styled("  > ", Style::new().fg(theme.primary).bold()),
            Span::styled(entry.label, Style::new().fg(theme.primary).bold()),
            Span::styled(
                format!("  {}", entry.description),
                Style::new().fg(theme.secondary),
            ),
        ])
    } else {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(entry.label, Style::new().fg(theme.text_muted)),
        ])
    }
}

fn select_line(label: String, selected: bool, theme: &Theme) -> Line<'static> {
    if selected {
        Line::from(vec![
            Span::styled("  > ", Style::new().fg(theme.primary).bold()),
            Span::styled(label, Style::new().fg(theme.primary).bold()),
        ])
    } else {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(label, Style::new().fg(theme.text_muted)),
        ])
    }
}

fn footer(stage: Stage, theme: &Theme) -> Line<'static> {
    let hint = Style::new().fg(theme.primary);
    let muted = Style::new().fg(theme.text_muted);
    let mut spans = vec![
        Span::styled("  ↑↓ ", hint),
        Span::styled("navigate  ", muted),
        Span::styled("Enter ", hint),
        Span::styled("select  ", muted),
    ];
    if stage != Stage::Categories {
        spans.push(Span::styled("Backspace ", hint));
        spans.push(Span::styled("back  ", muted));
    }
    spans.push(Span::styled("q ", hint));
    spans.push(Span::styled("quit", muted));
    Line::from(spans).centered()
}

const fn next_index(index: &mut usize, len: usize) {
    *index = (*index + 1) % len;
}

const fn previous_index(index: &mut usize, len: usize) {
    *index = if *index == 0 { len - 1 } else { *index - 1 };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> Menu {
        Menu::new(String::new(), String::new())
    }

    #[test]
    fn lists_builtin_external_and_focus_entries() {
        let menu = menu();
        // 5 builtin categories + 2 live sources + focus
        assert_eq!(menu.entries.len(), 8);
        assert_eq!(menu.entries[0].kind, ContentKind::Builtin(Category::Words));
        assert_eq!(
            menu.entries[5].kind,
            ContentKind::External(Source::Wikipedia)
        );
        assert_eq!(menu.entries[7].kind, ContentKind::Focus);
    }

    #[test]
    fn navigation_wraps_around() {
        let mut menu = menu();
        assert!(menu.handle_key(Key::Up).is_none());
        assert_eq!(menu.entry_index, 7);
        menu.handle_key(Key::Down);
        assert_eq!(menu.entry_index, 0);
        menu.handle_key(Key::Char('j'));
        assert_eq!(menu.entry_index, 1);
    }

    #[test]
    fn enter_then_enter_launches_with_default_length() {
        let mut menu = menu();
        assert!(menu.handle_key(Key::Enter).is_none());
        assert_eq!(menu.stage, Stage::Length);

        let action = menu.handle_key(Key::Enter);
        match action {
            Some(Action::StartSession { kind, word_target }) => {
                assert_eq!(kind, ContentKind::Builtin(Category::Words));
                assert_eq!(word_target, 50);
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn backspace_returns_to_categories() {
        let mut menu = menu();
        menu.handle_key(Key::Enter);
        assert_eq!(menu.stage, Stage::Length);
        menu.handle_key(Key::Backspace);
        assert_eq!(menu.stage, Stage::Categories);
    }

    #[test]
    fn theme_picker_emits_change_theme() {
        let mut menu = menu();
        menu.handle_key(Key::Char('t'));
        assert_eq!(menu.stage, Stage::Themes);
        menu.handle_key(Key::Down);

        let action = menu.handle_key(Key::Enter);
        match action {
            Some(Action::ChangeTheme(name)) => assert_eq!(name, "nord"),
            other => panic!("unexpected action: {other:?}"),
        }
        assert_eq!(menu.stage, Stage::Categories);
    }

    #[test]
    fn q_quits_from_any_stage() {
        let mut menu = menu();
        assert!(matches!(menu.handle_key(Key::Char('q')), Some(Action::Quit)));
        menu.handle_key(Key::Enter);
        assert!(matches!(menu.handle_key(Key::Char('q')), Some(Action::Quit)));
    }

    #[test]
    fn focus_hint_becomes_the_focus_description() {
        let menu = Menu::new(String::new(), "digraphs: 'th'".to_string());
        assert_eq!(menu.entries[7].description, "digraphs: 'th'");
    }
}
