//! Logging setup.
//!
//! - JSON file log, rolled daily, under `<data dir>/logs`
//! - `log` crate records bridged into `tracing`
//! - Older rolled files gzip-compressed in the background
//!
//! Filtering follows `RUST_LOG`, defaulting to `info`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Base name of the rolling log file.
pub const LOG_FILE_NAME: &str = "ancestry-roller.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn prepare_log_dir(log_dir: &Path) {
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }
}

/// Default log directory when no data dir is configured.
pub fn default_log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("ancestry-roller").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Initialize logging with a stdout layer and the JSON file layer.
///
/// Returns a `WorkerGuard` that must live until shutdown so buffered records
/// are flushed.
pub fn init(log_dir: &Path) -> WorkerGuard {
    prepare_log_dir(log_dir);

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_filter(env_filter());

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_filter(env_filter());

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .init();

    finish_init(log_dir);
    guard
}

/// Initialize logging for TUI mode.
///
/// Same as [`init`] without the stdout layer; ratatui owns the terminal.
pub fn init_tui(log_dir: &Path) -> WorkerGuard {
    prepare_log_dir(log_dir);

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_filter(env_filter());

    tracing_subscriber::registry().with(file_layer).init();

    finish_init(log_dir);
    guard
}

fn finish_init(log_dir: &Path) {
    // Already installed when tracing-subscriber's tracing-log feature is on.
    let _ = tracing_log::LogTracer::init();

    // After init so the compressor's own log lines land in the file.
    let log_dir = log_dir.to_path_buf();
    std::thread::spawn(move || {
        compress_old_logs(&log_dir);
    });
}

/// Whether `name` is a rolled log from an earlier day.
fn is_stale_log(name: &str, today_suffix: &str) -> bool {
    name.strip_prefix(LOG_FILE_NAME)
        .and_then(|rest| rest.strip_prefix('.'))
        .map(|date| date != today_suffix && !date.ends_with(".gz"))
        .unwrap_or(false)
}

/// Gzip every rolled log file except today's.
pub fn compress_old_logs(log_dir: &Path) {
    let today_suffix = chrono::Local::now().format("%Y-%m-%d").to_string();

    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if is_stale_log(name, &today_suffix) {
            match compress_file(&path) {
                Ok(()) => log::info!("Compressed old log: {:?}", path),
                Err(e) => log::warn!("Failed to compress old log {:?}: {}", path, e),
            }
        }
    }
}

fn compress_file(path: &Path) -> io::Result<()> {
    let file = fs::File::open(path)?;
    let mut reader = io::BufReader::new(file);

    let mut gz_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No filename"))?
        .to_os_string();
    gz_name.push(".gz");
    let gz_path = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?
        .join(gz_name);

    if gz_path.exists() {
        return Ok(());
    }

    let output = fs::File::create(&gz_path)?;
    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)?;
    Ok(())
}
