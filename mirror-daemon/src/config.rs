use std::path::PathBuf;
use std::time::Duration;

use crate::error::DaemonError;

/// Validated runtime settings for the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorConfig {
    pub source: PathBuf,
    pub replica: PathBuf,
    pub interval: Duration,
    pub log_file: PathBuf,
}

impl MirrorConfig {
    pub fn new(
        source: impl Into<PathBuf>,
        replica: impl Into<PathBuf>,
        interval_secs: u64,
        log_file: impl Into<PathBuf>,
    ) -> Result<Self, DaemonError> {
        if interval_secs == 0 {
            return Err(DaemonError::InvalidInterval(interval_secs));
        }
        Ok(Self {
            source: source.into(),
            replica: replica.into(),
            interval: Duration::from_secs(interval_secs),
            log_file: log_file.into(),
        })
    }
}
