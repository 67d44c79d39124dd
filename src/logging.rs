//! Run log and console logging
//!
//! `RunLog` is the per-run debug log written next to the cache file. It is
//! truncated when created and every call appends one timestamped line. Each
//! line is mirrored to the console through `tracing`.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::data::iso_timestamp;
use crate::error::RunError;

/// Installs the console subscriber. Output goes to stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_console() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Append-only log file for a single run
#[derive(Debug)]
pub struct RunLog {
    path: PathBuf,
    file: File,
}

impl RunLog {
    /// Creates the log file, truncating any previous run's log
    pub fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        File::create(&path)?;
        let file = OpenOptions::new().append(true).open(&path)?;
        Ok(Self { path, file })
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records a progress line
    pub fn info(&mut self, message: impl AsRef<str>) {
        let message = message.as_ref();
        tracing::info!("{}", message);
        self.append(message);
    }

    /// Records a warning line
    pub fn warn(&mut self, message: impl AsRef<str>) {
        let message = message.as_ref();
        tracing::warn!("{}", message);
        self.append(message);
    }

    /// Records a failed run: the error message, then one line per cause
    pub fn failure(&mut self, error: &RunError) {
        let mut chain = error.chain().into_iter();
        if let Some(message) = chain.next() {
            let line = format!("Error: {}", message);
            tracing::error!("{}", line);
            self.append(&line);
        }
        for cause in chain {
            let line = format!("Caused by: {}", cause);
            tracing::error!("{}", line);
            self.append(&line);
        }
    }

    /// Appends `[timestamp] message`. Write failures are reported but never abort the run.
    fn append(&mut self, message: &str) {
        let line = format!("[{}] {}\n", iso_timestamp(Utc::now()), message);
        if let Err(e) = self.file.write_all(line.as_bytes()) {
            tracing::warn!("Failed to write to {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn log_in_temp_dir() -> (RunLog, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let log = RunLog::create(temp_dir.path().join("debug-log.txt")).expect("create log");
        (log, temp_dir)
    }

    #[test]
    fn test_create_truncates_previous_log() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("debug-log.txt");
        fs::write(&path, "old run\n").unwrap();

        let _log = RunLog::create(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_lines_are_appended_with_bracketed_timestamp() {
        let (mut log, _temp_dir) = log_in_temp_dir();

        log.info("Starting data fetch");
        log.warn("Something odd");

        let content = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] Starting data fetch"));
        assert!(lines[1].ends_with("] Something odd"));

        // [2024-07-15T08:30:00.123Z]
        let stamp = &lines[0][1..lines[0].find(']').unwrap()];
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
        assert!(stamp.ends_with('Z'));
    }

    #[test]
    fn test_failure_logs_message_and_causes() {
        let (mut log, _temp_dir) = log_in_temp_dir();
        let source = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();

        log.failure(&RunError::InvalidGeometry { index: 0, source });

        let content = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Error: Invalid area_json in alert at index 0"));
        assert!(lines[1].contains("Caused by: "));
    }
}
