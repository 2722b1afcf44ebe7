//! Sync scheduler: periodic one-way passes with an append-only activity log.

pub mod activity;
pub mod config;
mod error;
mod scheduler;

pub use activity::{ActivityLog, LogEntry};
pub use config::MirrorConfig;
pub use error::DaemonError;
pub use scheduler::{run_single_pass, start_blocking, Scheduler};
