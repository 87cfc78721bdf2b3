//! SQLite-backed session store.
//!
//! One table, WAL mode, opened once for the lifetime of the process and
//! written only from the main thread. The `errors` and `timings` columns
//! hold JSON blobs the schema treats as opaque; aggregation back into
//! [`FocusData`] happens on read.

use std::collections::HashMap;
use std::path::Path;

use cadence::FocusData;
use chrono::Local;
use derive_more::From;
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How many ranked weak digraphs / problem chars focus data carries.
const FOCUS_TOP_N: usize = 5;

const CREATE_SQL: &str = "
CREATE TABLE IF NOT EXISTS sessions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    ts          TEXT    NOT NULL,
    source      TEXT    NOT NULL,
    wpm         REAL    NOT NULL,
    accuracy    REAL    NOT NULL,
    duration    REAL    NOT NULL,
    chars_typed INTEGER NOT NULL,
    errors      TEXT    NOT NULL DEFAULT '[]',
    timings     TEXT    NOT NULL DEFAULT '[]'
);
";

#[derive(Debug, From, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(rusqlite::Error),

    #[error("failed to create data directory: {0}")]
    #[from(skip)]
    CreateDir(std::io::Error),

    #[error("failed to encode session blob: {0}")]
    Blob(serde_json::Error),
}

/// One `{expected, got}` entry in the persisted errors blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub expected: char,
    pub got: char,
}

/// A finished session about to be saved.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub source: String,
    pub wpm: f64,
    pub accuracy: f64,
    pub duration: f64,
    pub chars_typed: usize,
    pub errors: Vec<ErrorEntry>,
    /// Milliseconds between consecutive correct keystrokes.
    pub timings: Vec<u64>,
}

/// A persisted session row.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub id: i64,
    pub ts: String,
    pub source: String,
    pub wpm: f64,
    pub accuracy: f64,
    pub duration: f64,
    pub chars_typed: usize,
    pub errors: Vec<ErrorEntry>,
    pub timings: Vec<u64>,
}

/// Aggregate view used by the menu and the `stats` subcommand.
#[derive(Debug, Clone, Default)]
pub struct StatsSnapshot {
    pub total_sessions: usize,
    pub best_wpm: f64,
    pub avg_wpm: f64,
    pub avg_accuracy: f64,
    pub recent: Vec<SessionRecord>,
}

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the store at `path` and bring the schema up to date.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(StoreError::CreateDir)?;
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.execute_batch(CREATE_SQL)?;

        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Idempotent schema migration: inspect the column list and add what is
    /// missing. Databases created before the ghost racer lack `timings`.
    fn migrate(&self) -> Result<(), StoreError> {
        let mut stmt = self.conn.prepare("PRAGMA table_info(sessions)")?;
        let columns: Vec<String> = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<_, _>>()?;

        if !columns.iter().any(|c| c == "timings") {
            self.conn.execute(
                "ALTER TABLE sessions ADD COLUMN timings TEXT NOT NULL DEFAULT '[]'",
                [],
            )?;
        }
        Ok(())
    }

    /// Close the underlying connection, flushing the WAL.
    pub fn close(self) -> Result<(), StoreError> {
        self.conn.close().map_err(|(_, error)| error)?;
        Ok(())
    }

    /// Insert a finished session and return its row id.
    pub fn save_session(&self, session: &NewSession) -> Result<i64, StoreError> {
        let errors = serde_json::to_string(&session.errors).map_err(StoreError::Blob)?;
        let timings = serde_json::to_string(&session.timings).map_err(StoreError::Blob)?;

        self.conn.execute(
            "INSERT INTO sessions (ts, source, wpm, accuracy, duration, chars_typed, errors, timings)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
                session.source,
                round2(session.wpm),
                round2(session.accuracy),
                round2(session.duration),
                session.chars_typed as i64,
                errors,
                timings,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Totals plus the ten most recent sessions.
    pub fn stats(&self) -> Result<StatsSnapshot, StoreError> {
        let (total, best, avg_wpm, avg_accuracy) = self.conn.query_row(
            "SELECT COUNT(*), MAX(wpm), AVG(wpm), AVG(accuracy) FROM sessions",
            [],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, Option<f64>>(1)?,
                    row.get::<_, Option<f64>>(2)?,
                    row.get::<_, Option<f64>>(3)?,
                ))
            },
        )?;

        let mut stmt = self.conn.prepare(
            "SELECT id, ts, source, wpm, accuracy, duration, chars_typed, errors, timings
             FROM sessions ORDER BY id DESC LIMIT 10",
        )?;
        let recent = stmt
            .query_map([], row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StatsSnapshot {
            total_sessions: total as usize,
            best_wpm: round2(best.unwrap_or(0.0)),
            avg_wpm: round2(avg_wpm.unwrap_or(0.0)),
            avg_accuracy: round2(avg_accuracy.unwrap_or(0.0)),
            recent,
        })
    }

    /// Best WPM recorded for a source, `0.0` when none.
    pub fn best_wpm_for(&self, source: &str) -> Result<f64, StoreError> {
        let best = self.conn.query_row(
            "SELECT MAX(wpm) FROM sessions WHERE source = ?1",
            params![source],
            |row| row.get::<_, Option<f64>>(0),
        )?;
        Ok(best.unwrap_or(0.0))
    }

    /// Inter-key timings of the best run on a source, for the ghost racer.
    pub fn ghost_timings(&self, source: &str) -> Result<Vec<u64>, StoreError> {
        let blob: Option<String> = self
            .conn
            .query_row(
                "SELECT timings FROM sessions WHERE source = ?1 ORDER BY wpm DESC LIMIT 1",
                params![source],
                |row| row.get(0),
            )
            .optional()?;

        Ok(blob
            .map(|raw| serde_json::from_str(&raw).unwrap_or_default())
            .unwrap_or_default())
    }

    /// Aggregate the error blobs of the last `n_sessions` sessions into
    /// ranked weak spots.
    ///
    /// Single-character misses feed the problem-char ranking; digraphs are
    /// built from consecutive expected characters within one session's
    /// error list (misses that cluster together point at a transition).
    pub fn focus_data(&self, n_sessions: usize) -> Result<FocusData, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT errors FROM sessions ORDER BY id DESC LIMIT ?1")?;
        let blobs: Vec<String> = stmt
            .query_map(params![n_sessions as i64], |row| row.get(0))?
            .collect::<Result<_, _>>()?;

        let mut char_errors: HashMap<char, usize> = HashMap::new();
        let mut digraph_errors: HashMap<String, usize> = HashMap::new();

        for blob in &blobs {
            let errors: Vec<ErrorEntry> = serde_json::from_str(blob).unwrap_or_default();
            for entry in &errors {
                *char_errors.entry(entry.expected).or_default() += 1;
            }
            for pair in errors.windows(2) {
                let digraph: String = [pair[0].expected, pair[1].expected].into_iter().collect();
                *digraph_errors.entry(digraph).or_default() += 1;
            }
        }

        Ok(FocusData {
            weak_digraphs: rank(digraph_errors),
            problem_chars: rank(char_errors),
        })
    }
}

/// Top entries by count, worst first, ties broken by key for stability.
fn rank<K: Ord>(counts: HashMap<K, usize>) -> Vec<K> {
    let mut entries: Vec<(K, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(FOCUS_TOP_N);
    entries.into_iter().map(|(key, _)| key).collect()
}

fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<SessionRecord> {
    let errors_raw: String = row.get(7)?;
    let timings_raw: String = row.get(8)?;
    Ok(SessionRecord {
        id: row.get(0)?,
        ts: row.get(1)?,
        source: row.get(2)?,
        wpm: row.get(3)?,
        accuracy: row.get(4)?,
        duration: row.get(5)?,
        chars_typed: row.get::<_, i64>(6)? as usize,
        // A corrupt blob should not take the whole stats view down
        errors: serde_json::from_str(&errors_raw).unwrap_or_default(),
        timings: serde_json::from_str(&timings_raw).unwrap_or_default(),
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
