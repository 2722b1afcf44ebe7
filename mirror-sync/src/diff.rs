//! Tree differencing: decide what a pass must copy and delete.
//!
//! Change detection is modification-time only. A replica file is refreshed
//! when the source's mtime is strictly newer; equal mtimes are treated as
//! up to date, so edits within the same timestamp tick go unnoticed.

use std::path::{Path, PathBuf};

use crate::error::SyncError;
use crate::tree::{self, FileTree};

/// A single action derived for one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// Copy `source_root/p` over `replica_root/p`.
    Copy(PathBuf),
    /// Remove `replica_root/p`.
    Delete(PathBuf),
}

impl SyncAction {
    pub fn relative_path(&self) -> &Path {
        match self {
            SyncAction::Copy(path) | SyncAction::Delete(path) => path,
        }
    }
}

/// Ordered copy and delete lists for one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    pub copies: Vec<SyncAction>,
    pub deletes: Vec<SyncAction>,
}

impl SyncPlan {
    pub fn is_empty(&self) -> bool {
        self.copies.is_empty() && self.deletes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.copies.len() + self.deletes.len()
    }
}

/// Compare two scanned trees by relative path.
pub fn diff_trees(source: &FileTree, replica: &FileTree) -> SyncPlan {
    let copies = source
        .values()
        .filter(|entry| match replica.get(&entry.relative) {
            None => true,
            Some(existing) => entry.modified > existing.modified,
        })
        .map(|entry| SyncAction::Copy(entry.relative.clone()))
        .collect();

    let deletes = replica
        .keys()
        .filter(|path| !source.contains_key(*path))
        .map(|path| SyncAction::Delete(path.clone()))
        .collect();

    SyncPlan { copies, deletes }
}

/// Scan both roots and derive the plan. Touches nothing on disk.
///
/// A missing replica root is treated as empty; creating it is the caller's
/// job.
pub fn plan(source_root: &Path, replica_root: &Path) -> Result<SyncPlan, SyncError> {
    if !source_root.exists() {
        return Err(SyncError::SourceMissing {
            path: source_root.to_path_buf(),
        });
    }
    if !source_root.is_dir() {
        return Err(SyncError::SourceNotDirectory {
            path: source_root.to_path_buf(),
        });
    }

    let source = tree::scan(source_root)?;
    let replica = tree::scan_or_empty(replica_root)?;
    let plan = diff_trees(&source, &replica);
    tracing::debug!(
        "planned {} copy and {} delete action(s)",
        plan.copies.len(),
        plan.deletes.len()
    );
    Ok(plan)
}
