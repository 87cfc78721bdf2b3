//! The application shell: screen stack, frame loop and action dispatch.
//!
//! A single render thread owns every piece of mutable state. Keys arrive
//! from the input thread through a bounded queue and are drained once per
//! frame, in order; actions returned by the top screen mutate the stack
//! between dispatches, so keys queued behind a stack change go to the new
//! top. Store and network calls run synchronously inside action handling,
//! a few-second stall being acceptable there.

use std::collections::{HashMap, HashSet};
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use cadence::{Category, FocusData, SessionAnalysis, generator};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, ToLine};
use ratatui::widgets::Padding;
use tracing::warn;

use crate::config::theme::{self, Theme};
use crate::fetch::{Fetcher, Source};
use crate::input::{self, Key};
use crate::page::{Menu, Page, Results, Typing};
use crate::store::{ErrorEntry, NewSession, Store};
use crate::utils::ROUNDED_BLOCK;

/// Render rate of the frame loop.
const FPS: u64 = 24;

/// How many recent sessions feed the focus aggregation.
const FOCUS_SESSIONS: usize = 10;

/// What a screen asks the frame loop to do.
#[derive(Debug)]
pub enum Action {
    /// Discard the top screen.
    Pop,
    /// Stop the loop and exit cleanly.
    Quit,
    /// Generate or fetch text and push a typing screen.
    StartSession {
        kind: ContentKind,
        word_target: usize,
    },
    /// Persist a finished session and push the results screen.
    SessionComplete(Box<SessionSummary>),
    /// Re-run the last session text.
    Retry,
    /// Clear the stack back to the menu.
    GoMenu,
    /// Switch palettes and rebuild the menu.
    ChangeTheme(&'static str),
    /// Launch a focus session seeded by the report on screen.
    FocusFromResults {
        digraphs: Vec<String>,
        chars: Vec<char>,
    },
}

/// Where a session's target text comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Builtin(Category),
    External(Source),
    Focus,
}

impl ContentKind {
    /// The source tag persisted with a session.
    pub fn tag(self) -> String {
        match self {
            Self::Builtin(category) => category.to_string(),
            Self::External(source) => source.to_string(),
            Self::Focus => "focus".to_string(),
        }
    }
}

/// Everything the loop needs to persist and report a finished session.
#[derive(Debug)]
pub struct SessionSummary {
    pub analysis: SessionAnalysis,
    pub source: String,
    /// Ms gaps between consecutive correct keystrokes.
    pub timings: Vec<u64>,
    /// Correct a-z presses, for the heatmap.
    pub key_counts: HashMap<char, usize>,
}

/// Startup choices resolved from CLI flags and config.
pub struct LaunchOptions {
    pub theme: Theme,
    pub zen: bool,
    /// Skip the menu and start typing immediately.
    pub start: Option<ContentKind>,
    pub word_target: usize,
}

/// The app itself
pub struct App {
    theme: Theme,
    zen: bool,
    store: Store,
    fetcher: Fetcher,
    stack: Vec<Page>,
    running: bool,
    /// Transient one-line notice shown in the frame title.
    notice: Option<String>,
    last_kind: ContentKind,
    last_word_target: usize,
    last_text: Option<String>,
    start: Option<ContentKind>,
    /// Sources already fetched fresh this run; repeats are served from the
    /// cache without a network call.
    fetched_fresh: HashSet<Source>,
}

impl App {
    /// Creates a new `App`
    pub fn new(options: LaunchOptions, store: Store, fetcher: Fetcher) -> Self {
        Self {
            theme: options.theme,
            zen: options.zen,
            store,
            fetcher,
            stack: Vec::new(),
            running: false,
            notice: None,
            last_kind: ContentKind::Builtin(Category::Sentences),
            last_word_target: options.word_target,
            last_text: None,
            start: options.start,
            fetched_fresh: HashSet::new(),
        }
    }

    /// Runs the frame loop until quit. Closes the store on the way out.
    pub fn run(mut self) -> std::io::Result<()> {
        let mut terminal = ratatui::init();

        if let Some(kind) = self.start.take() {
            self.start_session(kind, self.last_word_target);
        } else {
            self.push_menu();
        }

        let keys = input::spawn_input_thread();
        let frame_budget = Duration::from_millis(1000 / FPS);
        self.running = true;

        while self.running && !self.stack.is_empty() {
            let frame_start = Instant::now();

            self.drain_keys(&keys);

            if self.running && !self.stack.is_empty() {
                terminal.draw(|frame| self.draw(frame))?;
            }

            std::thread::sleep(frame_budget.saturating_sub(frame_start.elapsed()));
        }

        ratatui::restore();

        if let Err(error) = self.store.close() {
            warn!(%error, "closing the session store failed");
        }
        Ok(())
    }

    /// Dispatch every queued key in FIFO order. Keys behind a stack change
    /// go to the new top; keys behind a quit are discarded.
    fn drain_keys(&mut self, keys: &Receiver<Key>) {
        while let Ok(key) = keys.try_recv() {
            if !self.running {
                return;
            }
            self.dispatch(key);
        }
    }

    fn dispatch(&mut self, key: Key) {
        if key == Key::CtrlC {
            self.running = false;
            return;
        }
        let Some(page) = self.stack.last_mut() else {
            return;
        };
        if let Some(action) = page.handle_key(key) {
            self.apply(action);
        }
    }

    /// Draws the next frame
    fn draw(&mut self, frame: &mut Frame) {
        let mut block = ROUNDED_BLOCK
            .padding(Padding::new(1, 1, 0, 0))
            .title_top("KEYWIND".to_line().bold().centered());

        if let Some(notice) = &self.notice {
            block = block.title_top(
                Line::styled(notice.clone(), Style::new().fg(self.theme.secondary))
                    .right_aligned(),
            );
        }

        let area = frame.area();
        let content: Rect = block.inner(area);
        frame.render_widget(block, area);

        if let Some(page) = self.stack.last_mut() {
            page.render(frame, content, &self.theme);
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Pop => {
                if self.stack.len() > 1 {
                    self.stack.pop();
                }
            }
            Action::GoMenu => {
                self.stack.clear();
                self.push_menu();
            }
            Action::ChangeTheme(name) => {
                self.theme = theme::by_name(name);
                self.stack.clear();
                self.push_menu();
            }
            Action::StartSession { kind, word_target } => {
                self.start_session(kind, word_target);
            }
            Action::SessionComplete(summary) => self.finish_session(*summary),
            Action::Retry => {
                let text = self
                    .last_text
                    .clone()
                    .unwrap_or_else(|| self.load_text(self.last_kind, self.last_word_target));
                self.stack.truncate(1);
                self.push_typing(&text, self.last_kind.tag());
            }
            Action::FocusFromResults { digraphs, chars } => {
                let focus = FocusData {
                    weak_digraphs: digraphs,
                    problem_chars: chars,
                };
                let text = generator::focus_text(&focus, self.last_word_target);
                self.last_kind = ContentKind::Focus;
                self.last_text = Some(text.clone());
                self.stack.truncate(1);
                self.push_typing(&text, ContentKind::Focus.tag());
            }
        }
    }

    fn start_session(&mut self, kind: ContentKind, word_target: usize) {
        self.notice = None;
        self.last_kind = kind;
        self.last_word_target = word_target;
        let text = self.load_text(kind, word_target);
        self.last_text = Some(text.clone());
        self.push_typing(&text, kind.tag());
    }

    /// Resolve target text for a session kind, falling back to generated
    /// sentences when a live source is unavailable.
    fn load_text(&mut self, kind: ContentKind, word_target: usize) -> String {
        match kind {
            ContentKind::Builtin(category) => generator::category_text(category, word_target),
            ContentKind::Focus => {
                let focus = self
                    .store
                    .focus_data(FOCUS_SESSIONS)
                    .unwrap_or_else(|error| {
                        warn!(%error, "focus aggregation failed");
                        FocusData::default()
                    });
                generator::focus_text(&focus, word_target)
            }
            ContentKind::External(source) => {
                // First session of a source goes to the network for fresh
                // text; later ones reuse the cached copy.
                let use_cache = !self.fetched_fresh.insert(source);
                match self.fetcher.fetch(source, use_cache) {
                    Ok(text) => text,
                    Err(error) => {
                        warn!(%error, %source, "external fetch failed");
                        self.notice = Some(format!("{source} unavailable, using sentences"));
                        generator::category_text(Category::Sentences, word_target)
                    }
                }
            }
        }
    }

    // Screen constructors

    fn push_menu(&mut self) {
        let stats_line = self
            .store
            .stats()
            .ok()
            .filter(|stats| stats.total_sessions > 0)
            .map(|stats| {
                format!(
                    "best {:.0} wpm  ·  {:.0} avg  ·  {} sessions",
                    stats.best_wpm, stats.avg_wpm, stats.total_sessions
                )
            })
            .unwrap_or_default();

        let focus_hint = self
            .store
            .focus_data(FOCUS_SESSIONS)
            .ok()
            .filter(|focus| !focus.is_empty())
            .map(|focus| focus.describe())
            .unwrap_or_default();

        self.stack.push(Menu::new(stats_line, focus_hint).into());
    }

    fn push_typing(&mut self, text: &str, source: String) {
        let ghost = self.store.ghost_timings(&source).unwrap_or_else(|error| {
            warn!(%error, "ghost lookup failed");
            Vec::new()
        });
        self.stack
            .push(Typing::new(text, source, self.zen, &ghost).into());
    }

    /// Persist the finished session and show the report. A failed save is
    /// logged and surfaced, but never blocks the results screen.
    fn finish_session(&mut self, summary: SessionSummary) {
        let best_before = self.store.best_wpm_for(&summary.source).unwrap_or(0.0);

        let record = NewSession {
            source: summary.source,
            wpm: summary.analysis.wpm,
            accuracy: summary.analysis.accuracy,
            duration: summary.analysis.duration_sec,
            chars_typed: summary.analysis.chars_typed,
            errors: summary
                .analysis
                .error_log
                .iter()
                .map(|&(expected, got)| ErrorEntry { expected, got })
                .collect(),
            timings: summary.timings,
        };
        if let Err(error) = self.store.save_session(&record) {
            warn!(%error, "saving the session failed");
            self.notice = Some("session could not be saved".to_string());
        }

        let is_new_pb = summary.analysis.wpm > best_before && best_before > 0.0;
        let pb = best_before.max(summary.analysis.wpm);
        self.stack.push(
            Results::new(summary.analysis, pb, is_new_pb, summary.key_counts).into(),
        );
    }
}
