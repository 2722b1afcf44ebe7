//! # mirror-sync
//!
//! One-way tree differencing and the filesystem adapter that applies it.
//!
//! Call [`diff::plan`] to see what a pass would do, or
//! [`pipeline::run_pass`] to bring a replica in line with its source.

pub mod apply;
pub mod diff;
pub mod error;
pub mod pipeline;
pub mod tree;

pub use apply::AppliedAction;
pub use diff::{SyncAction, SyncPlan};
pub use error::SyncError;
pub use pipeline::{run_pass, PassSummary};
pub use tree::{FileEntry, FileTree};
