//! File logging.
//!
//! The terminal is owned by the renderer, so log records go to a file in
//! the platform data directory instead of stderr.

use std::fs::{self, File};
use std::path::PathBuf;

use color_eyre::eyre::{Result, WrapErr};
use glimmer_config::{Config, LogSettings};
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE: &str = "glimmer.log";

/// Keeps the background log writer alive until dropped.
pub struct LogGuard {
    _guard: WorkerGuard,
    pub path: PathBuf,
}

/// Install the global subscriber. Returns `None` when logging is disabled.
pub fn init(settings: &LogSettings) -> Result<Option<LogGuard>> {
    if !settings.enabled {
        return Ok(None);
    }

    let dir = Config::log_dir().wrap_err("failed to locate the log directory")?;
    fs::create_dir_all(&dir)
        .wrap_err_with(|| format!("failed to create log directory {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = File::create(&path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    // RUST_LOG takes precedence over the configured level
    let filter = EnvFilter::builder()
        .with_default_directive(parse_level(&settings.level).into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .wrap_err("failed to install the log subscriber")?;

    Ok(Some(LogGuard {
        _guard: guard,
        path,
    }))
}

fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::INFO)
}
