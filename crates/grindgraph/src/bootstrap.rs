use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// `~/.grindgraph`, or `./.grindgraph` when the home directory is unknown.
pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".grindgraph")
}

/// Ensure the standard `~/.grindgraph/` directory hierarchy exists.
///
/// Creates the following directories if absent (including any missing parents):
/// - `~/.grindgraph/`
/// - `~/.grindgraph/logs/`
pub fn ensure_directories() -> anyhow::Result<()> {
    let app_dir = app_dir();
    std::fs::create_dir_all(&app_dir)?;
    std::fs::create_dir_all(app_dir.join("logs"))?;
    Ok(())
}

/// Default log file, `~/.grindgraph/logs/grindgraph.log`.
pub fn default_log_path() -> PathBuf {
    app_dir().join("logs").join("grindgraph.log")
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` name (`WARNING`, `CRITICAL`, ...) to an [`EnvFilter`] directive.
///
/// Unknown names pass through lowercased so `EnvFilter` can still accept
/// full directives such as `grind_data=trace`.
pub fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber, appending to `log_file`.
///
/// The terminal belongs to the TUI, so nothing is written to stdout or
/// stderr. Falls back to `"info"` if the level string is not recognised.
pub fn setup_logging(log_level: &str, log_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    let filter =
        EnvFilter::try_new(level_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let writer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(filter)
        .with(writer)
        .init();

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
