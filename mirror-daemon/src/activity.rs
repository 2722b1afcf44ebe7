//! Activity log: the user-visible record of every copy, removal and failed
//! pass.
//!
//! Each line is written to the console and appended to the log file with
//! identical text:
//!
//! ```text
//! [2024-05-01 12:00:00] Copied /data/src/a.txt to /data/replica/a.txt
//! ```

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::{io_err, DaemonError};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One timestamped activity line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
}

impl LogEntry {
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.message
        )
    }
}

/// Console + append-only file sink.
///
/// The file is opened in append mode for every line and closed again, so an
/// external truncation or rotation is picked up on the next write. If the
/// file cannot be written the line still reaches the console.
pub struct ActivityLog {
    path: PathBuf,
    console: Box<dyn Write + Send>,
}

impl ActivityLog {
    /// Sink writing to stdout and `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_console(path, Box::new(io::stdout()))
    }

    pub fn with_console(path: impl Into<PathBuf>, console: Box<dyn Write + Send>) -> Self {
        Self {
            path: path.into(),
            console,
        }
    }

    /// Timestamp `message` and write it to both destinations.
    pub fn record(&mut self, message: impl Into<String>) -> LogEntry {
        let entry = LogEntry::now(message);
        let line = entry.to_string();

        if let Err(err) = writeln!(self.console, "{line}").and_then(|()| self.console.flush()) {
            tracing::warn!(error = %err, "failed to write activity line to console");
        }
        if let Err(err) = append_line(&self.path, &line) {
            tracing::warn!(error = %err, "activity log file unavailable; console only");
        }
        entry
    }
}

fn append_line(path: &Path, line: &str) -> Result<(), DaemonError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| io_err(path, e))?;
    writeln!(file, "{line}").map_err(|e| io_err(path, e))
}
