//! One complete sync pass: ensure replica, plan, copy, delete.

use std::path::Path;
use std::time::{Duration, Instant};

use crate::{
    apply::{self, AppliedAction},
    diff,
    error::io_err,
    SyncError,
};

/// Counts for a pass that ran to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub copied: usize,
    pub removed: usize,
    pub duration: Duration,
}

impl PassSummary {
    pub fn is_noop(&self) -> bool {
        self.copied == 0 && self.removed == 0
    }
}

/// Run a single pass from `source_root` onto `replica_root`.
///
/// `on_applied` is called right after each action lands, so callers can log
/// progress even when a later action fails. The first failure stops the pass
/// and is returned; actions already applied stay applied.
pub fn run_pass<F>(
    source_root: &Path,
    replica_root: &Path,
    mut on_applied: F,
) -> Result<PassSummary, SyncError>
where
    F: FnMut(&AppliedAction),
{
    let started = Instant::now();

    std::fs::create_dir_all(replica_root).map_err(|e| io_err(replica_root, e))?;

    let plan = diff::plan(source_root, replica_root)?;
    let mut summary = PassSummary::default();

    for action in &plan.copies {
        let applied = apply::copy_file(source_root, replica_root, action.relative_path())?;
        on_applied(&applied);
        summary.copied += 1;
    }

    for action in &plan.deletes {
        let applied = apply::remove_file(replica_root, action.relative_path())?;
        on_applied(&applied);
        summary.removed += 1;
    }

    summary.duration = started.elapsed();
    tracing::debug!(
        "pass finished: {} copied, {} removed in {}ms",
        summary.copied,
        summary.removed,
        summary.duration.as_millis()
    );
    Ok(summary)
}
