//! Recursive directory scanning.
//!
//! A [`FileTree`] is rebuilt from disk on every pass; nothing is cached
//! between scans.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::WalkDir;

use crate::error::{io_err, SyncError};

/// A regular file discovered under a tree root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the root the file was found under.
    pub relative: PathBuf,
    pub modified: SystemTime,
    pub len: u64,
}

/// Relative path → entry, ordered so derived action lists are deterministic.
pub type FileTree = BTreeMap<PathBuf, FileEntry>;

/// Walk `root` recursively and collect every regular file.
///
/// Symlinks are not followed and, like directories and special files, are
/// not recorded.
pub fn scan(root: &Path) -> Result<FileTree, SyncError> {
    let mut tree = FileTree::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|source| SyncError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let metadata = entry.metadata().map_err(|source| SyncError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        let modified = metadata.modified().map_err(|e| io_err(entry.path(), e))?;
        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_path_buf();

        tree.insert(
            relative.clone(),
            FileEntry {
                relative,
                modified,
                len: metadata.len(),
            },
        );
    }

    tracing::debug!("scanned {} file(s) under {}", tree.len(), root.display());
    Ok(tree)
}

/// Like [`scan`], but a missing root is an empty tree rather than an error.
pub fn scan_or_empty(root: &Path) -> Result<FileTree, SyncError> {
    match std::fs::symlink_metadata(root) {
        Ok(_) => scan(root),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(FileTree::new()),
        Err(err) => Err(io_err(root, err)),
    }
}
