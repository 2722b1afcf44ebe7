//! Filesystem adapter that applies [`SyncAction`](crate::SyncAction)s.
//!
//! ## `copy_file` protocol
//!
//! 1. Create the destination's parent directories.
//! 2. Copy bytes straight onto the destination, overwriting it.
//! 3. Stamp the source's access and modification times onto the copy.
//!
//! Nothing is staged beside the destination, so a copy never touches any
//! replica path other than its own.

use std::fmt;
use std::path::{Path, PathBuf};

use filetime::FileTime;

use crate::error::{io_err, SyncError};

/// An action that completed successfully, with absolute paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppliedAction {
    Copied { from: PathBuf, to: PathBuf },
    Removed { path: PathBuf },
}

impl fmt::Display for AppliedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppliedAction::Copied { from, to } => {
                write!(f, "Copied {} to {}", from.display(), to.display())
            }
            AppliedAction::Removed { path } => write!(f, "Removed {}", path.display()),
        }
    }
}

/// Copy `source_root/relative` to `replica_root/relative`, preserving mtime.
pub fn copy_file(
    source_root: &Path,
    replica_root: &Path,
    relative: &Path,
) -> Result<AppliedAction, SyncError> {
    let from = source_root.join(relative);
    let to = replica_root.join(relative);

    if let Some(parent) = to.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    let metadata = std::fs::metadata(&from).map_err(|e| io_err(&from, e))?;
    let atime = FileTime::from_last_access_time(&metadata);
    let mtime = FileTime::from_last_modification_time(&metadata);

    std::fs::copy(&from, &to).map_err(|e| io_err(&to, e))?;
    filetime::set_file_times(&to, atime, mtime).map_err(|e| io_err(&to, e))?;

    tracing::debug!("copied {} -> {}", from.display(), to.display());
    Ok(AppliedAction::Copied { from, to })
}

/// Remove `replica_root/relative`.
pub fn remove_file(replica_root: &Path, relative: &Path) -> Result<AppliedAction, SyncError> {
    let path = replica_root.join(relative);
    std::fs::remove_file(&path).map_err(|e| io_err(&path, e))?;

    tracing::debug!("removed {}", path.display());
    Ok(AppliedAction::Removed { path })
}
