//! Input pump.
//!
//! One dedicated thread blocks on terminal reads, maps each event to a key
//! token and pushes it into a bounded queue. The frame loop drains the
//! queue without blocking once per tick. Unmappable keys (modifiers,
//! function keys, releases) are dropped here, before any screen sees them.

use std::sync::mpsc::{Receiver, SyncSender, sync_channel};
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

/// Bound on the key queue; typing bursts never get close to this.
const QUEUE_BOUND: usize = 64;

/// A key token the screens understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Enter,
    Esc,
    Up,
    Down,
    /// Global interrupt; the loop quits regardless of the current screen.
    CtrlC,
}

/// Map a terminal key event to a token. `None` for releases, chords and
/// keys no screen consumes.
pub fn map_key(key: &KeyEvent) -> Option<Key> {
    if !key.is_press() {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Key::CtrlC);
    }
    match key.code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Esc),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        _ => None,
    }
}

/// Spawn the blocking reader thread.
///
/// The thread is not joined: it exits on its own when the receiver is
/// dropped or the terminal read fails.
pub fn spawn_input_thread() -> Receiver<Key> {
    let (tx, rx) = sync_channel(QUEUE_BOUND);
    thread::spawn(move || read_loop(&tx));
    rx
}

fn read_loop(tx: &SyncSender<Key>) {
    loop {
        match event::read() {
            Ok(Event::Key(key)) => {
                if let Some(mapped) = map_key(&key)
                    && tx.send(mapped).is_err()
                {
                    return;
                }
            }
            Ok(_) => {}
            Err(_) => return,
        }
    }
}
