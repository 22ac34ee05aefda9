//! Logging utilities
//!
//! Provides logging setup and the logger handed to the storage core.

use chrono::Local;
use env_logger::{Builder, Env, Target};
use log::{Log, Metadata, Record};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Name of the log file for a process started now.
pub fn log_file_name() -> String {
    format!(
        "file-storage-main-logs_{}.txt",
        Local::now().format("%Y-%m-%d___%H-%M-%S")
    )
}

/// Setup logging into a fresh file under `log_dir`.
///
/// `RUST_LOG` filters as usual, defaulting to `info`. Returns the path of
/// the created file.
pub fn setup_logging(log_dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(log_dir)?;

    let path = log_dir.join(log_file_name());
    let file = File::create(&path)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();

    Ok(path)
}

/// Log to stderr, for failures that happen before the log file exists.
///
/// Returns `false` when a logger is already installed; that logger keeps
/// receiving records.
pub fn setup_stderr_logging() -> bool {
    Builder::from_env(Env::default().default_filter_or("info"))
        .try_init()
        .is_ok()
}

/// Forwards records to whatever logger is installed globally.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalLogger;

impl Log for GlobalLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        log::logger().enabled(metadata)
    }

    fn log(&self, record: &Record) {
        log::logger().log(record);
    }

    fn flush(&self) {
        log::logger().flush();
    }
}
