//! Logging Module
//!
//! Sets up `tracing` with:
//! - A JSON file layer with daily rolling files
//! - An optional pretty stdout layer
//! - `log` crate events redirected into `tracing`
//! - Background gzip compression of rotated files

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "pack-wizard.log";

/// Where log output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// File plus pretty stdout
    FileAndStdout,
    /// File only, for hosts that own the terminal
    FileOnly,
}

/// Initialize the logging system.
///
/// Filters come from `RUST_LOG`, defaulting to `info`. Returns a `WorkerGuard`
/// that must be kept alive for the duration of the application so buffered logs
/// are flushed on shutdown.
pub fn init(log_dir: &Path, output: LogOutput) -> WorkerGuard {
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter.clone());

    let stdout_layer = match output {
        LogOutput::FileAndStdout => Some(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stdout)
                .pretty()
                .with_filter(env_filter),
        ),
        LogOutput::FileOnly => None,
    };

    // try_init: a host or test harness may already have installed a subscriber
    if let Err(e) = tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
    {
        eprintln!("Failed to install tracing subscriber: {}", e);
    }

    if let Err(e) = tracing_log::LogTracer::init() {
        // Already set when try_init installed the default log bridge
        log::debug!("LogTracer not installed: {}", e);
    }

    let log_dir_clone = log_dir.to_path_buf();
    std::thread::spawn(move || {
        compress_old_logs(log_dir_clone);
    });

    log::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_PREFIX)
    );

    guard
}

/// Rotated files older than today that are not yet compressed
fn should_compress(name: &str, today_suffix: &str) -> bool {
    name.starts_with(&format!("{LOG_FILE_PREFIX}."))
        && !name.ends_with(today_suffix)
        && !name.ends_with(".gz")
}

/// Compress old log files in the background
fn compress_old_logs(log_dir: PathBuf) {
    let today_suffix = chrono::Local::now().format("%Y-%m-%d").to_string();

    let Ok(entries) = fs::read_dir(&log_dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !should_compress(name, &today_suffix) {
            continue;
        }
        match compress_file(&path) {
            Ok(()) => log::info!("Compressed old log: {:?}", path),
            Err(e) => log::warn!("Failed to compress old log {:?}: {}", path, e),
        }
    }
}

fn compress_file(path: &Path) -> io::Result<()> {
    let file = fs::File::open(path)?;
    let mut reader = io::BufReader::new(file);

    let mut gz_path_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No filename"))?
        .to_os_string();
    gz_path_name.push(".gz");
    let parent_dir = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?;
    let gz_path = parent_dir.join(gz_path_name);

    // Skip if already exists
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
