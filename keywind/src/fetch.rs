//! External content client.
//!
//! Two live sources, each a single synchronous GET with a hard deadline.
//! Successful results are normalised to single-line lower-case ASCII and
//! written through to a content-addressed cache file, so `use_cache` calls
//! never touch the network. Callers treat any error as "unavailable" and
//! fall back to generated text.

use std::fs;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

const TIMEOUT_SEC: u64 = 4;
const USER_AGENT: &str = "keywind/0.1";

const WIKIPEDIA_URL: &str = "https://en.wikipedia.org/api/rest_v1/page/random/summary";
const QUOTE_URL: &str = "https://api.quotable.io/quotes/random";

const WIKIPEDIA_MIN_CHARS: usize = 40;
const WIKIPEDIA_MAX_WORDS: usize = 200;
const QUOTE_MIN_CHARS: usize = 20;

/// Citation markers like `[1]` or `[note 2]` left in article extracts.
static CITATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\w+\s*\d*\]").expect("citation pattern is valid"));

/// Live text sources.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum Source {
    Wikipedia,
    Quote,
}

impl Source {
    /// Human-readable name for menus.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wikipedia => "Wikipedia",
            Self::Quote => "Live Quote",
        }
    }

    /// One-line description for menus.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Wikipedia => "random article extract, varied real-world text",
            Self::Quote => "a fresh random quote, fetched live",
        }
    }
}

/// Errors from live text sources
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] minreq::Error),

    #[error("response had no usable text")]
    EmptyExtract,

    #[error("extract too short after cleaning")]
    TooShort,
}

/// Wrapper for parsing the summary endpoint's response
#[derive(Deserialize)]
struct Summary {
    #[serde(default)]
    extract: String,
}

/// A quote object from the quotes API
#[derive(Deserialize)]
struct QuoteItem {
    #[serde(default)]
    content: String,
    #[serde(default)]
    author: String,
}

/// Client with a per-user on-disk cache.
pub struct Fetcher {
    cache_dir: PathBuf,
}

impl Fetcher {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Fetch text for a source.
    ///
    /// With `use_cache`, a previously cached result is returned without a
    /// network call. On success the (fresh) result is cached; cache write
    /// failures are ignored because the in-memory text is still usable.
    pub fn fetch(&self, source: Source, use_cache: bool) -> Result<String, FetchError> {
        if use_cache && let Some(text) = self.cache_get(source) {
            return Ok(text);
        }

        let text = match source {
            Source::Wikipedia => fetch_wikipedia()?,
            Source::Quote => fetch_quote()?,
        };

        self.cache_set(source, &text);
        Ok(text)
    }

    fn cache_path(&self, source: Source) -> PathBuf {
        let mut hasher = DefaultHasher::new();
        source.to_string().hash(&mut hasher);
        let digest = format!("{:016x}", hasher.finish());
        self.cache_dir
            .join(format!("{source}_{}.txt", &digest[..10]))
    }

    fn cache_get(&self, source: Source) -> Option<String> {
        fs::read_to_string(self.cache_path(source))
            .ok()
            .filter(|text| !text.is_empty())
    }

    fn cache_set(&self, source: Source, text: &str) {
        let result = fs::create_dir_all(&self.cache_dir)
            .and_then(|()| fs::write(self.cache_path(source), text));
        if let Err(error) = result {
            debug!(%error, %source, "cache write failed");
        }
    }
}

fn fetch_wikipedia() -> Result<String, FetchError> {
    let summary: Summary = get_json(WIKIPEDIA_URL)?;
    if summary.extract.len() < WIKIPEDIA_MIN_CHARS {
        return Err(FetchError::TooShort);
    }

    let text = truncate_words(&clean(&summary.extract), WIKIPEDIA_MAX_WORDS);
    if text.len() < WIKIPEDIA_MIN_CHARS {
        return Err(FetchError::TooShort);
    }
    Ok(text)
}

fn fetch_quote() -> Result<String, FetchError> {
    // The API answers with a list of quote objects
    let items: Vec<QuoteItem> = get_json(QUOTE_URL)?;
    let item = items.first().ok_or(FetchError::EmptyExtract)?;
    if item.content.is_empty() {
        return Err(FetchError::EmptyExtract);
    }

    let text = clean(&format!("{} {}", item.content, item.author));
    if text.len() < QUOTE_MIN_CHARS {
        return Err(FetchError::TooShort);
    }
    Ok(text)
}

fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let response = minreq::get(url)
        .with_timeout(TIMEOUT_SEC)
        .with_header("User-Agent", USER_AGENT)
        .send()?;
    let parsed = response.json::<T>()?;
    Ok(parsed)
}

/// Drop non-ASCII characters, strip citation markers, collapse whitespace
/// runs to single spaces and lower-case the result.
fn clean(text: &str) -> String {
    let ascii: String = text.chars().filter(char::is_ascii).collect();
    let stripped = CITATION_RE.replace_all(&ascii, "");
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn truncate_words(text: &str, max_words: usize) -> String {
    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}
