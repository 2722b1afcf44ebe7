use std::path::PathBuf;

use thiserror::Error;

/// Error surface for scheduler setup and single-pass runs.
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("sync error: {0}")]
    Sync(#[from] mirror_sync::SyncError),

    #[error("sync interval must be a positive number of seconds, got {0}")]
    InvalidInterval(u64),
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> DaemonError {
    DaemonError::Io {
        path: path.into(),
        source,
    }
}
