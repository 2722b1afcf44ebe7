//! Error types for mirror-sync.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while differencing or applying a sync pass.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The source root was absent when the pass started.
    #[error("source folder '{}' does not exist", path.display())]
    SourceMissing { path: PathBuf },

    /// The source root exists but is not a directory.
    #[error("source '{}' is not a directory", path.display())]
    SourceNotDirectory { path: PathBuf },

    /// Directory enumeration failed (permission denied, entry vanished, ...).
    #[error("failed to walk {}: {source}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
