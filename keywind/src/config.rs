use serde::{Deserialize, Serialize};

pub mod theme;

/// Application configuration.
///
/// Merged from serialized defaults, an optional `config.toml` in the
/// per-user config directory, and `KEYWIND_`-prefixed environment
/// variables. CLI flags override all of it.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Default colour theme name.
    pub theme: String,
    /// Default word target for sessions.
    pub words: usize,
    /// Start in zen mode (stats hidden while typing).
    pub zen: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: theme::DEFAULT.name.to_string(),
            words: 50,
            zen: false,
        }
    }
}
