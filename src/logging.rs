//! Tracing configuration and log routing.
//!
//! Console output goes to stdout for the HTTP server and to stderr for the CLI and MCP
//! binaries, whose stdout carries results or protocol frames. A plain-text file log is appended
//! to `TEXT_SUMMARY_LOG_FILE`, or to `logs/text-summary.log` when the variable is unset.
use std::{
    fs::OpenOptions,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_ENV: &str = "TEXT_SUMMARY_LOG_FILE";
const DEFAULT_LOG_FILE: &str = "logs/text-summary.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Stream receiving console log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTarget {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

/// Configure tracing with console output on stdout plus file logging.
pub fn init_tracing() {
    init_tracing_with(ConsoleTarget::Stdout);
}

/// Configure tracing with the given console stream plus file logging.
///
/// `RUST_LOG` controls filtering and defaults to `info`. Installing twice is a no-op.
pub fn init_tracing_with(console: ConsoleTarget) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console_layer = match console {
        ConsoleTarget::Stdout => fmt::layer().with_target(false).compact().boxed(),
        ConsoleTarget::Stderr => fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .boxed(),
    };
    let file_layer = open_log_writer(&log_file_path()).map(|writer| {
        fmt::layer()
            .with_writer(writer)
            .with_target(true)
            .with_ansi(false)
            .compact()
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

fn log_file_path() -> PathBuf {
    std::env::var_os(LOG_FILE_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
}

/// Open `path` for appending behind a non-blocking writer, creating parent directories.
///
/// Failures are reported on stderr and disable file logging only.
fn open_log_writer(path: &Path) -> Option<NonBlocking> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        if let Err(err) = std::fs::create_dir_all(parent) {
            eprintln!("Failed to create log directory {}: {err}", parent.display());
            return None;
        }
    }

    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let _ = LOG_GUARD.set(guard);
            Some(non_blocking)
        }
        Err(err) => {
            eprintln!("Failed to open log file {}: {err}", path.display());
            None
        }
    }
}
