//! Post-session analysis of a keystroke timeline.
//!
//! Reduces a completed [`Timeline`] to a [`SessionAnalysis`]: ranked error
//! pairs, the slowest two-character transitions, problem keys by error
//! rate, and the WPM history. Everything here is pure and deterministic
//! given the recorded timestamps.

use std::collections::HashMap;

use crate::Seconds;
use crate::math;
use crate::timeline::{BUCKET_SEC, Keystroke, Timeline};

/// Ranked lists are cut to this many entries.
const TOP_N: usize = 5;

/// Inter-key intervals at or above this are treated as pauses, not typing.
const OUTLIER_MS: f64 = 2000.0;

/// Digraphs need at least this many samples to be ranked.
const MIN_DIGRAPH_SAMPLES: usize = 2;

/// How often one expected character was mistyped as another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPair {
    pub expected: char,
    pub got: char,
    pub count: usize,
}

/// Average inter-key interval for one two-character transition.
#[derive(Debug, Clone, PartialEq)]
pub struct DigraphTiming {
    pub digraph: String,
    pub avg_ms: f64,
    /// How much slower this transition is than the session average.
    pub deviation_ms: f64,
}

/// Immutable post-session report.
#[derive(Debug, Clone, Default)]
pub struct SessionAnalysis {
    /// Net WPM over the full session.
    pub wpm: f64,
    /// Percentage of correct presses.
    pub accuracy: f64,
    pub duration_sec: f64,
    /// Characters that advanced the cursor.
    pub chars_typed: usize,
    pub total_errors: usize,
    /// Most frequent `(expected, got)` mistakes, worst first.
    pub top_errors: Vec<ErrorPair>,
    /// Slowest transitions relative to the session average, worst first.
    pub slow_digraphs: Vec<DigraphTiming>,
    /// Expected characters ranked by error rate, worst first.
    pub problem_keys: Vec<char>,
    /// WPM per 5-second bucket from session start to end.
    pub wpm_buckets: Vec<f64>,
    /// Every `(expected, got)` miss in encounter order, for persistence.
    pub error_log: Vec<(char, char)>,
}

/// Analyse a completed timeline.
///
/// `elapsed` is the session duration in seconds, read from the engine's
/// clock at completion time.
pub fn analyse(timeline: &Timeline, elapsed: Seconds) -> SessionAnalysis {
    let keystrokes = timeline.keystrokes();
    let correct: Vec<&Keystroke> = keystrokes.iter().filter(|k| k.is_correct).collect();
    let errors: Vec<&Keystroke> = keystrokes.iter().filter(|k| !k.is_correct).collect();

    SessionAnalysis {
        wpm: timeline.final_wpm(elapsed),
        accuracy: timeline.accuracy(),
        duration_sec: elapsed,
        chars_typed: correct.len(),
        total_errors: errors.len(),
        top_errors: top_errors(&errors),
        slow_digraphs: slow_digraphs(&correct),
        problem_keys: problem_keys(keystrokes),
        wpm_buckets: timeline.wpm_buckets(elapsed, BUCKET_SEC),
        error_log: errors.iter().map(|k| (k.expected, k.typed)).collect(),
    }
}

fn top_errors(errors: &[&Keystroke]) -> Vec<ErrorPair> {
    let mut counts: HashMap<(char, char), usize> = HashMap::new();
    for k in errors {
        *counts.entry((k.expected, k.typed)).or_default() += 1;
    }

    let mut pairs: Vec<ErrorPair> = counts
        .into_iter()
        .map(|((expected, got), count)| ErrorPair {
            expected,
            got,
            count,
        })
        .collect();
    // Ties break alphabetically so the ranking is stable
    pairs.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(a.expected.cmp(&b.expected))
            .then(a.got.cmp(&b.got))
    });
    pairs.truncate(TOP_N);
    pairs
}

fn slow_digraphs(correct: &[&Keystroke]) -> Vec<DigraphTiming> {
    let mut samples: HashMap<(char, char), Vec<f64>> = HashMap::new();
    let mut accepted: Vec<f64> = Vec::new();

    for pair in correct.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);
        // A gap other than exactly one position means the user backtracked
        // and retyped; the interval says nothing about the transition.
        if curr.position != prev.position + 1 {
            continue;
        }
        let dt_ms = (curr.timestamp - prev.timestamp) * 1000.0;
        if dt_ms <= 0.0 || dt_ms >= OUTLIER_MS {
            continue;
        }
        samples
            .entry((prev.expected, curr.expected))
            .or_default()
            .push(dt_ms);
        accepted.push(dt_ms);
    }

    let overall_avg = math::mean(&accepted);
    let mut digraphs: Vec<DigraphTiming> = samples
        .into_iter()
        .filter(|(_, times)| times.len() >= MIN_DIGRAPH_SAMPLES)
        .map(|((a, b), times)| {
            let avg_ms = math::mean(&times);
            DigraphTiming {
                digraph: [a, b].into_iter().collect(),
                avg_ms,
                deviation_ms: avg_ms - overall_avg,
            }
        })
        .collect();

    digraphs.sort_by(|a, b| {
        b.deviation_ms
            .total_cmp(&a.deviation_ms)
            .then_with(|| a.digraph.cmp(&b.digraph))
    });
    digraphs.truncate(TOP_N);
    digraphs
}

fn problem_keys(keystrokes: &[Keystroke]) -> Vec<char> {
    let mut totals: HashMap<char, usize> = HashMap::new();
    let mut errors: HashMap<char, usize> = HashMap::new();
    for k in keystrokes {
        *totals.entry(k.expected).or_default() += 1;
        if !k.is_correct {
            *errors.entry(k.expected).or_default() += 1;
        }
    }

    let mut ranked: Vec<(char, f64)> = errors
        .into_iter()
        .map(|(ch, errs)| {
            let total = totals.get(&ch).copied().unwrap_or(0).max(1);
            (ch, errs as f64 / total as f64)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(TOP_N);
    ranked.into_iter().map(|(ch, _)| ch).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed a target through a strict cursor, recording at fixed timestamps.
    fn run(target: &str, presses: &[(char, Seconds)]) -> Timeline {
        let chars: Vec<char> = target.chars().collect();
        let mut timeline = Timeline::default();
        timeline.start(0.0);
        let mut position = 0;
        for &(typed, ts) in presses {
            let expected = chars[position];
            let is_correct = typed == expected;
            timeline.record(typed, expected, position, is_correct, ts);
            if is_correct {
                position += 1;
            }
        }
        timeline
    }

    #[test]
    fn error_pair_ranking() {
        // 'j' typed twice where 'h' was expected
        let timeline = run(
            "hello",
            &[
                ('j', 0.1),
                ('j', 0.2),
                ('h', 0.3),
                ('e', 0.4),
                ('l', 0.5),
                ('l', 0.6),
                ('o', 0.7),
            ],
        );
        let analysis = analyse(&timeline, 2.0);

        assert_eq!(analysis.top_errors.len(), 1);
        let top = analysis.top_errors[0];
        assert_eq!(top.expected, 'h');
        assert_eq!(top.got, 'j');
        assert_eq!(top.count, 2);

        assert_eq!(analysis.problem_keys, vec!['h']);
        assert_eq!(analysis.error_log, vec![('h', 'j'), ('h', 'j')]);
        assert_eq!(analysis.total_errors, 2);
        assert_eq!(analysis.chars_typed, 5);
    }

    #[test]
    fn slow_digraph_selection() {
        // "th the": both t->h transitions take 400ms, everything else 100ms.
        let timeline = run(
            "th the",
            &[
                ('t', 0.0),
                ('h', 0.4),
                (' ', 0.5),
                ('t', 0.6),
                ('h', 1.0),
                ('e', 1.1),
            ],
        );
        let analysis = analyse(&timeline, 1.5);

        let first = &analysis.slow_digraphs[0];
        assert_eq!(first.digraph, "th");
        assert!((first.avg_ms - 400.0).abs() < 1e-6);
        assert!(first.deviation_ms > 0.0);

        // Nothing is derived across non-adjacent positions
        assert!(analysis.slow_digraphs.iter().all(|d| d.digraph != "ht"));
    }

    #[test]
    fn digraphs_need_two_samples() {
        let timeline = run("abc", &[('a', 0.0), ('b', 0.1), ('c', 0.2)]);
        let analysis = analyse(&timeline, 1.0);
        // "ab" and "bc" have one sample each
        assert!(analysis.slow_digraphs.is_empty());
    }

    #[test]
    fn digraph_outliers_are_discarded() {
        // A 3-second pause between the two 'ab' transitions' halves
        let timeline = run(
            "abab",
            &[('a', 0.0), ('b', 3.0), ('a', 3.1), ('b', 3.2)],
        );
        let analysis = analyse(&timeline, 4.0);
        // Only the 100ms sample survives, leaving "ab" under the minimum
        assert!(analysis.slow_digraphs.is_empty());
        assert!(
            analysis
                .slow_digraphs
                .iter()
                .all(|d| d.avg_ms > 0.0 && d.avg_ms < 2000.0)
        );
    }

    #[test]
    fn backtrack_gap_is_skipped() {
        // Correct presses at positions 0 and 2 with nothing in between can
        // only come from a backspace dance; the pair must not form a digraph.
        let mut timeline = Timeline::default();
        timeline.start(0.0);
        timeline.record('a', 'a', 0, true, 0.1);
        timeline.record('c', 'c', 2, true, 0.2);
        timeline.record('a', 'a', 0, true, 0.3);
        timeline.record('c', 'c', 2, true, 0.4);
        let analysis = analyse(&timeline, 1.0);
        assert!(analysis.slow_digraphs.is_empty());
    }

    #[test]
    fn problem_keys_ranked_by_error_rate() {
        // 'q' missed once in one attempt (rate 1.0) ranks above 'e' missed
        // once in two attempts (rate 0.5).
        let mut timeline = Timeline::default();
        timeline.start(0.0);
        timeline.record('x', 'q', 0, false, 0.1);
        timeline.record('e', 'e', 1, true, 0.2);
        timeline.record('r', 'e', 2, false, 0.3);
        let analysis = analyse(&timeline, 1.0);
        assert_eq!(analysis.problem_keys, vec!['q', 'e']);
    }

    #[test]
    fn empty_timeline_analysis() {
        let analysis = analyse(&Timeline::default(), 0.0);
        assert_eq!(analysis.wpm, 0.0);
        assert_eq!(analysis.accuracy, 100.0);
        assert_eq!(analysis.chars_typed, 0);
        assert!(analysis.top_errors.is_empty());
        assert!(analysis.slow_digraphs.is_empty());
        assert!(analysis.problem_keys.is_empty());
        assert!(analysis.wpm_buckets.is_empty());
    }

    #[test]
    fn top_errors_cut_to_five() {
        let mut timeline = Timeline::default();
        timeline.start(0.0);
        for (i, expected) in ['a', 'b', 'c', 'd', 'e', 'f', 'g'].into_iter().enumerate() {
            timeline.record('z', expected, i, false, 0.1 * (i as f64 + 1.0));
        }
        let analysis = analyse(&timeline, 1.0);
        assert_eq!(analysis.top_errors.len(), 5);
        assert_eq!(analysis.problem_keys.len(), 5);
        assert_eq!(analysis.error_log.len(), 7);
    }
}
