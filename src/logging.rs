//! Process-wide logging setup.
//!
//! Everything goes to stdout through a compact formatter; `RUST_LOG` picks the
//! verbosity and falls back to `info`. A second sink appends to a log file when
//! one can be opened: `QUIVER_LOG_FILE` names the path explicitly, otherwise
//! `logs/quiver.log` is used. File writes go through a non-blocking channel so
//! request handlers never wait on disk.

use std::path::PathBuf;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Keeps the background log writer alive until the process exits; dropping it
/// would silently stop flushing the file sink.
static FLUSH_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global tracing subscriber.
///
/// Never fails: if the log file cannot be opened the process runs with the
/// stdout sink alone and reports why on stderr.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout = fmt::layer().with_target(false).compact();
    let base = tracing_subscriber::registry().with(filter).with(stdout);

    match open_log_file() {
        Some(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let _ = FLUSH_GUARD.set(guard);
            let file_sink = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .compact();
            base.with(file_sink).init();
        }
        None => base.init(),
    }
}

/// Open the log file in append mode, creating it on first use.
fn open_log_file() -> Option<std::fs::File> {
    let path = log_path()?;
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
    {
        Ok(file) => Some(file),
        Err(err) => {
            eprintln!("could not open log file {}: {err}", path.display());
            None
        }
    }
}

/// Resolve where logs should land.
///
/// `QUIVER_LOG_FILE` wins when set; otherwise the default lives under a
/// `logs/` directory created on demand.
fn log_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("QUIVER_LOG_FILE") {
        return Some(PathBuf::from(path));
    }
    if let Err(err) = std::fs::create_dir_all("logs") {
        eprintln!("could not create logs directory: {err}");
        return None;
    }
    Some(PathBuf::from("logs").join("quiver.log"))
}
