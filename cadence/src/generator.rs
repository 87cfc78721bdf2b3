//! Target-text synthesis.
//!
//! Two independent generators: [`category_text`] shuffles a fixed pool into
//! a practice line, and [`focus_text`] builds text that over-represents the
//! digraphs and keys a user keeps missing.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::corpus::{CODE_SNIPPETS, COMMON_WORDS, Category, NUMBERS, QUOTES, SENTENCES};

/// Share of focus-mode words drawn from the high-scoring pool.
const FOCUS_HIGH_SHARE: f64 = 0.6;

/// Points a word earns for containing a weak digraph.
const DIGRAPH_SCORE: usize = 3;

/// Aggregated weak spots from recent sessions, worst first.
///
/// Produced by the session store and consumed by [`focus_text`]; never
/// persisted itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusData {
    pub weak_digraphs: Vec<String>,
    pub problem_chars: Vec<char>,
}

impl FocusData {
    pub fn is_empty(&self) -> bool {
        self.weak_digraphs.is_empty() && self.problem_chars.is_empty()
    }

    /// One-line description of what a focus session will target.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if !self.weak_digraphs.is_empty() {
            let digraphs: Vec<String> = self
                .weak_digraphs
                .iter()
                .take(3)
                .map(|d| format!("'{d}'"))
                .collect();
            parts.push(format!("digraphs: {}", digraphs.join(", ")));
        }
        if !self.problem_chars.is_empty() {
            let chars: Vec<String> = self
                .problem_chars
                .iter()
                .take(3)
                .map(|c| format!("'{c}'"))
                .collect();
            parts.push(format!("keys: {}", chars.join(", ")));
        }
        if parts.is_empty() {
            "general practice".to_string()
        } else {
            parts.join("  ")
        }
    }
}

/// Build a ready-to-type line for a category.
///
/// Returns roughly `word_target` space-separated tokens: the words pool is
/// drawn token by token (wrapping when exhausted), the other pools append
/// whole lines until the token target is met.
pub fn category_text(category: Category, word_target: usize) -> String {
    let mut rng = rand::thread_rng();
    match category {
        Category::Words => {
            let mut pool = COMMON_WORDS.to_vec();
            pool.shuffle(&mut rng);
            pool.iter()
                .cycle()
                .take(word_target.max(1))
                .copied()
                .collect::<Vec<_>>()
                .join(" ")
        }
        Category::Sentences => lines_until(SENTENCES, word_target, " ", &mut rng),
        Category::Quotes => lines_until(QUOTES, word_target, " ", &mut rng),
        Category::Code => lines_until(CODE_SNIPPETS, word_target, "  ", &mut rng),
        Category::Numbers => lines_until(NUMBERS, word_target, " ", &mut rng),
    }
}

/// Build practice text heavily biased toward the given weak spots.
///
/// Strategy: score every common word (+3 per contained weak digraph, +1 per
/// problem-char occurrence), then mix 60% high-scoring words with 40%
/// neutral filler, both sampled with replacement, and shuffle. The output
/// always has exactly `word_target` tokens. With nothing to target, falls
/// back to a sentences excerpt.
pub fn focus_text(focus: &FocusData, word_target: usize) -> String {
    let mut rng = rand::thread_rng();

    if focus.is_empty() {
        let excerpt = lines_until(SENTENCES, word_target, " ", &mut rng);
        return excerpt
            .split_whitespace()
            .take(word_target)
            .collect::<Vec<_>>()
            .join(" ");
    }

    let mut high = Vec::new();
    let mut filler = Vec::new();
    for &word in COMMON_WORDS {
        if score_word(word, &focus.weak_digraphs, &focus.problem_chars) > 0 {
            high.push(word);
        } else {
            filler.push(word);
        }
    }
    // Degenerate inputs can empty either pool; sampling still has to work
    if high.is_empty() {
        high.clone_from(&filler);
    }
    if filler.is_empty() {
        filler.clone_from(&high);
    }

    let n_high = ((word_target as f64) * FOCUS_HIGH_SHARE).ceil() as usize;
    let n_filler = word_target.saturating_sub(n_high);

    let mut selected: Vec<&str> = Vec::with_capacity(word_target);
    for _ in 0..n_high.min(word_target) {
        selected.push(high.choose(&mut rng).copied().unwrap_or("the"));
    }
    for _ in 0..n_filler {
        selected.push(filler.choose(&mut rng).copied().unwrap_or("the"));
    }

    selected.shuffle(&mut rng);
    selected.join(" ")
}

fn score_word(word: &str, digraphs: &[String], problem_chars: &[char]) -> usize {
    let mut score = 0;
    for digraph in digraphs {
        if word.contains(digraph.as_str()) {
            score += DIGRAPH_SCORE;
        }
    }
    for &ch in problem_chars {
        score += word.matches(ch).count();
    }
    score
}

/// Shuffle `pool` and append whole lines until the token target is reached.
fn lines_until<R: Rng>(pool: &[&str], word_target: usize, sep: &str, rng: &mut R) -> String {
    let mut lines = pool.to_vec();
    lines.shuffle(rng);

    let mut out = String::new();
    let mut tokens = 0;
    for line in lines {
        if tokens >= word_target {
            break;
        }
        if !out.is_empty() {
            out.push_str(sep);
        }
        out.push_str(line);
        tokens += line.split_whitespace().count();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_count(text: &str) -> usize {
        text.split_whitespace().count()
    }

    #[test]
    fn words_category_hits_target_exactly() {
        let text = category_text(Category::Words, 40);
        assert_eq!(token_count(&text), 40);
        assert!(!text.contains('\n'));
    }

    #[test]
    fn words_category_wraps_a_small_pool() {
        // More words than the pool holds still yields the full target
        let text = category_text(Category::Words, 500);
        assert_eq!(token_count(&text), 500);
    }

    #[test]
    fn line_categories_reach_target() {
        for category in [
            Category::Sentences,
            Category::Quotes,
            Category::Code,
            Category::Numbers,
        ] {
            let text = category_text(category, 30);
            assert!(
                token_count(&text) >= 30,
                "{category} produced too few tokens"
            );
            assert!(text.is_ascii());
        }
    }

    #[test]
    fn focus_output_has_exact_token_count() {
        let focus = FocusData {
            weak_digraphs: vec!["th".to_string()],
            problem_chars: vec!['q'],
        };
        let text = focus_text(&focus, 20);
        assert_eq!(token_count(&text), 20);
    }

    #[test]
    fn focus_output_is_biased_toward_weak_spots() {
        let focus = FocusData {
            weak_digraphs: vec!["th".to_string()],
            problem_chars: vec!['q'],
        };
        let targeted = focus_text(&focus, 20);
        let neutral = focus_text(&FocusData::default(), 20);

        let hits = |text: &str| {
            text.split_whitespace()
                .filter(|w| w.contains("th") || w.contains('q'))
                .count()
        };

        // 60% of the targeted output is sampled from words that contain a
        // weak pattern, so at least 12 of 20 tokens must hit.
        assert!(hits(&targeted) >= 12);
        assert!(hits(&targeted) > hits(&neutral));
    }

    #[test]
    fn focus_falls_back_to_sentences_when_empty() {
        let text = focus_text(&FocusData::default(), 25);
        assert_eq!(token_count(&text), 25);
    }

    #[test]
    fn focus_with_unmatchable_inputs_still_fills() {
        // No common word contains "zz", and '0' appears nowhere either
        let focus = FocusData {
            weak_digraphs: vec!["zz".to_string()],
            problem_chars: vec!['0'],
        };
        let text = focus_text(&focus, 15);
        assert_eq!(token_count(&text), 15);
    }

    #[test]
    fn describe_names_the_targets() {
        let focus = FocusData {
            weak_digraphs: vec!["th".to_string(), "he".to_string()],
            problem_chars: vec!['q'],
        };
        let line = focus.describe();
        assert!(line.contains("'th'"));
        assert!(line.contains("'q'"));
        assert_eq!(FocusData::default().describe(), "general practice");
    }
}
