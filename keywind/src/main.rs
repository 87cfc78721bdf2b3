mod app;
mod config;
mod fetch;
mod input;
mod page;
mod store;
mod utils;
mod widgets;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use app::{App, ContentKind, LaunchOptions};
use cadence::Category;
use config::{Config, theme};
use fetch::{Fetcher, Source};
use store::Store;

/// A terminal typing trainer that adapts to your weak spots.
#[derive(Debug, Parser)]
#[command(name = "keywind", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Colour theme: cyberpunk, nord, dracula, monokai or minimal
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Zen mode: no stats during typing, shown only on completion
    #[arg(long)]
    zen: bool,

    /// Start immediately with text targeting your recent weak spots
    #[arg(long, conflicts_with = "mode")]
    focus: bool,

    /// Skip the menu and start a session: words, sentences, quotes, code,
    /// numbers, wikipedia or quote
    #[arg(long, value_name = "CATEGORY")]
    mode: Option<String>,

    /// Approximate word count for --mode / --focus sessions
    #[arg(long, value_name = "N")]
    words: Option<usize>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print session stats and exit (no TUI)
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

struct AppDirs {
    db_path: PathBuf,
    cache_dir: PathBuf,
    config_path: PathBuf,
    data_dir: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let dirs = resolve_dirs()?;

    init_logging(&dirs.data_dir);

    if let Some(Command::Stats { json }) = cli.command {
        return print_stats(&dirs.db_path, json);
    }

    // Defaults, overridden by config.toml, overridden by env vars
    let mut figment = Figment::from(Serialized::defaults(Config::default()));
    if dirs.config_path.exists() {
        figment = figment.merge(Toml::file(&dirs.config_path));
    }
    let config: Config = figment.merge(Env::prefixed("KEYWIND_")).extract()?;

    let start = if cli.focus {
        Some(ContentKind::Focus)
    } else {
        cli.mode.as_deref().map(parse_mode).transpose()?
    };

    let options = LaunchOptions {
        theme: theme::by_name(cli.theme.as_deref().unwrap_or(&config.theme)),
        zen: cli.zen || config.zen,
        start,
        word_target: cli.words.unwrap_or(config.words),
    };

    // The store is the one thing the app cannot run without
    let store = Store::open(&dirs.db_path)
        .map_err(|error| format!("failed to open the session store: {error}"))?;
    let fetcher = Fetcher::new(dirs.cache_dir);

    App::new(options, store, fetcher).run()?;
    Ok(())
}

fn resolve_dirs() -> Result<AppDirs, Box<dyn std::error::Error>> {
    let dirs = ProjectDirs::from("com", "keywind", "keywind")
        .ok_or("could not determine a home directory")?;
    let data_dir = dirs.data_dir().to_path_buf();
    Ok(AppDirs {
        db_path: data_dir.join("sessions.db"),
        cache_dir: data_dir.join("cache"),
        config_path: dirs.config_dir().join("config.toml"),
        data_dir,
    })
}

/// File logging, enabled only when `KEYWIND_LOG` is set; stderr would
/// corrupt the TUI.
fn init_logging(data_dir: &Path) {
    use tracing_subscriber::EnvFilter;

    if std::env::var_os("KEYWIND_LOG").is_none() {
        return;
    }
    if std::fs::create_dir_all(data_dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join("keywind.log"))
    else {
        return;
    };

    let filter = EnvFilter::try_from_env("KEYWIND_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn parse_mode(mode: &str) -> Result<ContentKind, Box<dyn std::error::Error>> {
    if mode == "focus" {
        return Ok(ContentKind::Focus);
    }
    if let Ok(category) = Category::from_str(mode) {
        return Ok(ContentKind::Builtin(category));
    }
    if let Ok(source) = Source::from_str(mode) {
        return Ok(ContentKind::External(source));
    }
    Err(format!(
        "unknown category '{mode}' (expected words, sentences, quotes, code, numbers, wikipedia or quote)"
    )
    .into())
}

fn print_stats(db_path: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open(db_path)
        .map_err(|error| format!("failed to open the session store: {error}"))?;
    let stats = store.stats()?;

    if json {
        let output = serde_json::json!({
            "total_sessions": stats.total_sessions,
            "best_wpm": stats.best_wpm,
            "avg_wpm": stats.avg_wpm,
            "avg_accuracy": stats.avg_accuracy,
            "recent": stats.recent.iter().map(|s| serde_json::json!({
                "id": s.id,
                "ts": s.ts,
                "source": s.source,
                "wpm": s.wpm,
                "accuracy": s.accuracy,
                "duration": s.duration,
            })).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if stats.total_sessions == 0 {
        println!("no sessions recorded yet - run keywind and start typing");
        return Ok(());
    }

    println!();
    println!("  keywind stats");
    println!();
    println!("  best wpm        {:.1}", stats.best_wpm);
    println!("  average wpm     {:.1}", stats.avg_wpm);
    println!("  avg accuracy    {:.1}%", stats.avg_accuracy);
    println!("  sessions        {}", stats.total_sessions);
    println!();
    println!(
        "  {:<12} {:<10} {:>6} {:>9} {:>9}",
        "date", "source", "wpm", "accuracy", "duration"
    );
    for session in &stats.recent {
        let date = session.ts.get(..10).unwrap_or(&session.ts);
        println!(
            "  {:<12} {:<10} {:>6.1} {:>8.1}% {:>9}",
            date,
            session.source,
            session.wpm,
            session.accuracy,
            utils::format_clock(session.duration),
        );
    }
    println!();
    Ok(())
}
